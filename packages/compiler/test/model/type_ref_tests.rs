//! Type reference parsing tests

use adapter_compiler::model::{TypeRef, Variance};
use adapter_compiler::GenerationError;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TypeRef {
        input.parse().unwrap()
    }

    #[test]
    fn should_parse_plain_name() {
        let t = parse("com.example.Data");
        assert_eq!(t, TypeRef::new("com.example.Data"));
        assert_eq!(t.package_name(), "com.example");
        assert_eq!(t.simple_name(), "Data");
    }

    #[test]
    fn should_parse_nested_arguments_and_nullability() {
        let t = parse("kotlin.collections.Map<kotlin.String, kotlin.collections.List<com.example.Data?>>?");
        assert!(t.nullable);
        assert_eq!(t.arguments.len(), 2);
        assert_eq!(t.arguments[0], TypeRef::new("kotlin.String"));

        let list = &t.arguments[1];
        assert_eq!(list.name, "kotlin.collections.List");
        assert_eq!(list.arguments[0], TypeRef::new("com.example.Data").with_nullable(true));
    }

    #[test]
    fn should_parse_star_projection() {
        let t = parse("kotlinx.coroutines.flow.Flow<*>");
        assert!(t.arguments[0].is_star());
    }

    #[test]
    fn should_tolerate_whitespace() {
        assert_eq!(
            parse(" kotlin.Pair < kotlin.Int ,kotlin.Long > "),
            TypeRef::parameterized(
                "kotlin.Pair",
                vec![TypeRef::new("kotlin.Int"), TypeRef::new("kotlin.Long")]
            )
        );
    }

    #[test]
    fn should_print_canonical_form() {
        let source = "kotlin.collections.Map<kotlin.String, com.example.Data?>?";
        assert_eq!(parse(source).to_string(), source);
    }

    #[test]
    fn should_reject_malformed_references() {
        for input in ["", "com.", "List<", "List<kotlin.Int", "1abc", "a b", "List<>"] {
            let result = input.parse::<TypeRef>();
            assert!(
                matches!(result, Err(GenerationError::InvalidTypeReference { .. })),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn should_round_trip_through_json_string() {
        let t: TypeRef = serde_json::from_str("\"kotlinx.coroutines.flow.Flow<com.example.Status>\"").unwrap();
        assert_eq!(t.first_argument(), Some(&TypeRef::new("com.example.Status")));
        assert_eq!(
            serde_json::to_string(&t).unwrap(),
            "\"kotlinx.coroutines.flow.Flow<com.example.Status>\""
        );
    }

    #[test]
    fn should_report_bad_reference_in_json() {
        let err = serde_json::from_str::<TypeRef>("\"Flow<\"").unwrap_err();
        assert!(err.to_string().contains("invalid type reference"));
    }

    #[test]
    fn should_parse_function_type() {
        let t = parse("(kotlin.Int) -> kotlin.Unit");
        let function = t.function.as_deref().expect("function type");

        assert!(!function.suspend);
        assert_eq!(function.parameters, vec![TypeRef::new("kotlin.Int")]);
        assert_eq!(function.return_type, TypeRef::unit());
        assert_eq!(t.to_string(), "(kotlin.Int) -> kotlin.Unit");
    }

    #[test]
    fn should_parse_suspend_function_type() {
        let t = parse("suspend () -> com.example.Data");
        let function = t.function.as_deref().expect("function type");

        assert!(function.suspend);
        assert!(function.parameters.is_empty());
        assert_eq!(t.to_string(), "suspend () -> com.example.Data");
    }

    #[test]
    fn should_parse_function_type_with_receiver() {
        let t = parse("com.example.Builder.(kotlin.String, kotlin.Int) -> kotlin.Unit");
        let function = t.function.as_deref().expect("function type");

        assert_eq!(function.receiver, Some(TypeRef::new("com.example.Builder")));
        assert_eq!(function.parameters.len(), 2);
        assert_eq!(
            t.to_string(),
            "com.example.Builder.(kotlin.String, kotlin.Int) -> kotlin.Unit"
        );
    }

    #[test]
    fn should_drop_parameter_names_in_function_types() {
        assert_eq!(
            parse("(id: kotlin.String, count: kotlin.Int) -> kotlin.Unit").to_string(),
            "(kotlin.String, kotlin.Int) -> kotlin.Unit"
        );
    }

    #[test]
    fn should_parse_nullable_function_type() {
        let t = parse("((kotlin.Int) -> kotlin.Unit)?");
        assert!(t.is_function());
        assert!(t.nullable);
        assert_eq!(t.to_string(), "((kotlin.Int) -> kotlin.Unit)?");

        let returns_nullable = parse("(kotlin.Int) -> kotlin.Unit?");
        assert!(!returns_nullable.nullable);
    }

    #[test]
    fn should_parse_function_type_as_argument() {
        let t = parse("kotlin.collections.List<suspend (kotlin.Int) -> kotlin.Unit>");
        assert!(t.arguments[0].is_function());
        assert_eq!(
            t.to_string(),
            "kotlin.collections.List<suspend (kotlin.Int) -> kotlin.Unit>"
        );
    }

    #[test]
    fn should_parse_use_site_variance() {
        let t = parse("kotlin.collections.List<out com.example.Data>");
        assert_eq!(t.arguments[0].variance, Variance::Out);
        assert_eq!(t.arguments[0].name, "com.example.Data");
        assert_eq!(t.to_string(), "kotlin.collections.List<out com.example.Data>");

        let comparator = parse("kotlin.Comparator<in com.example.Data>");
        assert_eq!(comparator.arguments[0].variance, Variance::In);
    }

    #[test]
    fn should_not_mistake_names_for_variance_keywords() {
        let t = parse("kotlin.collections.List<outer.Type, inner.Type>");
        assert_eq!(t.arguments[0], TypeRef::new("outer.Type"));
        assert_eq!(t.arguments[1], TypeRef::new("inner.Type"));
    }

    #[test]
    fn should_reject_malformed_function_types() {
        for input in ["(kotlin.Int", "(kotlin.Int, kotlin.Long)", "suspend kotlin.Int", "() ->"] {
            let result = input.parse::<TypeRef>();
            assert!(
                matches!(result, Err(GenerationError::InvalidTypeReference { .. })),
                "expected '{}' to be rejected",
                input
            );
        }
    }
}
