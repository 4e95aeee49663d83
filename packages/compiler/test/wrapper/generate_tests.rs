//! Adapter generation tests
//!
//! Whole-pipeline runs from request to adapter descriptor.

use adapter_compiler::logging::{LogLevel, NullLogger, RecordingLogger};
use adapter_compiler::model::{
    AdapterRequest, MemberBody, MemberDeclaration, Modifiers, Parameter, SupertypeSubstitution,
    TypeDescriptor, TypeRef,
};
use adapter_compiler::output::output_ast as o;
use adapter_compiler::wrapper::AdapterMember;
use adapter_compiler::{generate_adapter, AdapterDescriptor, GenerationError, GeneratorConfig};

#[cfg(test)]
mod tests {
    use super::*;

    fn t(name: &str) -> TypeRef {
        name.parse().unwrap()
    }

    fn repo() -> TypeDescriptor {
        TypeDescriptor::new("com.example.Repo")
            .with_supertypes([t("com.example.DataSource")])
            .with_members([
                MemberDeclaration::function(
                    "load",
                    [Parameter::new("id", t("kotlin.String"))],
                    t("com.example.Data"),
                )
                .with_modifiers(Modifiers::SUSPEND | Modifiers::OVERRIDE),
                MemberDeclaration::property(
                    "status",
                    t("kotlinx.coroutines.flow.Flow<com.example.Status>"),
                    false,
                )
                .with_modifiers(Modifiers::OVERRIDE),
                MemberDeclaration::function(
                    "sum",
                    [Parameter::new("a", t("kotlin.Int")), Parameter::new("b", t("kotlin.Int"))],
                    t("kotlin.Int"),
                ),
                MemberDeclaration::function("helper", [], TypeRef::unit())
                    .with_modifiers(Modifiers::PRIVATE),
            ])
    }

    fn data_source_native() -> TypeDescriptor {
        TypeDescriptor::new("com.example.DataSourceNative")
            .abstract_type()
            .with_members([
                MemberDeclaration::function(
                    "load",
                    [Parameter::new("id", t("kotlin.String"))],
                    t("io.adapter.runtime.AsyncOperationHandle<com.example.Data>"),
                )
                .with_modifiers(Modifiers::ABSTRACT)
                .with_body(MemberBody::Absent),
                MemberDeclaration::property(
                    "status",
                    t("io.adapter.runtime.StreamHandle<com.example.Status>"),
                    false,
                )
                .with_modifiers(Modifiers::ABSTRACT),
            ])
    }

    fn request() -> AdapterRequest {
        AdapterRequest::new(repo(), "RepoNative").with_substitution(SupertypeSubstitution::new(
            t("com.example.DataSource"),
            data_source_native(),
        ))
    }

    fn generate(request: &AdapterRequest) -> AdapterDescriptor {
        generate_adapter(request, &GeneratorConfig::default(), &NullLogger).unwrap()
    }

    fn returned(member: &AdapterMember) -> &o::Expression {
        let o::Statement::Return(ret) = &member.body;
        &ret.value
    }

    #[test]
    fn should_generate_adapter_with_substituted_supertype() {
        let adapter = generate(&request());

        assert_eq!(adapter.name, "com.example.RepoNative");
        assert_eq!(adapter.wrapped_type, t("com.example.Repo"));
        assert_eq!(adapter.supertypes, vec![t("com.example.DataSourceNative")]);
        let names: Vec<&str> = adapter.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["load", "status", "sum"]);
    }

    #[test]
    fn should_expose_suspend_function_as_async_handle() {
        let adapter = generate(&request());
        let load = adapter.member("load").unwrap();

        assert_eq!(load.modifiers, Modifiers::OVERRIDE);
        assert_eq!(
            load.return_type,
            t("io.adapter.runtime.AsyncOperationHandle<com.example.Data>")
        );
        match returned(load) {
            o::Expression::Instantiate(inst) => {
                assert_eq!(inst.args.len(), 2);
                assert_eq!(inst.args[0], *o::variable("contextProvider"));
                assert!(inst.trailing_thunk().is_some());
            }
            other => panic!("expected handle construction, got {:?}", other),
        }
    }

    #[test]
    fn should_expose_stream_property_as_stream_handle() {
        let adapter = generate(&request());
        let status = adapter.member("status").unwrap();

        assert!(status.is_property());
        assert!(!status.is_mutable());
        assert!(status.modifiers.contains(Modifiers::OVERRIDE));
        assert_eq!(status.return_type, t("io.adapter.runtime.StreamHandle<com.example.Status>"));
    }

    #[test]
    fn should_forward_sync_members_unchanged() {
        let adapter = generate(&request());
        let sum = adapter.member("sum").unwrap();

        assert_eq!(sum.return_type, t("kotlin.Int"));
        assert!(!sum.modifiers.contains(Modifiers::OVERRIDE));
        assert_eq!(
            *returned(sum),
            *o::variable("wrapped")
                .prop("sum")
                .call_fn(vec![*o::variable("a"), *o::variable("b")])
        );
    }

    #[test]
    fn should_omit_private_members() {
        let adapter = generate(&request());
        assert!(adapter.member("helper").is_none());
    }

    #[test]
    fn should_not_mark_override_without_substitution() {
        let adapter = generate(&AdapterRequest::new(repo(), "RepoNative"));

        assert_eq!(adapter.supertypes, vec![t("com.example.DataSource")]);
        assert!(adapter
            .members
            .iter()
            .all(|m| !m.modifiers.contains(Modifiers::OVERRIDE)));
    }

    #[test]
    fn should_build_constructors_and_fields() {
        let adapter = generate(&request());

        let primary: Vec<&str> = adapter
            .primary_constructor
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(primary, vec!["wrapped", "contextProvider"]);
        assert!(adapter.primary_constructor.parameters[1].type_.nullable);

        assert_eq!(adapter.secondary_constructor.parameters.len(), 1);
        assert_eq!(
            adapter.secondary_constructor.delegate_args,
            Some(vec![*o::variable("wrapped"), *o::null_expr()])
        );

        assert_eq!(adapter.fields.len(), 2);
        assert!(adapter.fields.iter().all(|f| f.modifiers == Modifiers::PRIVATE));
    }

    #[test]
    fn should_pass_default_provider_from_secondary_constructor() {
        let config = GeneratorConfig {
            default_context_provider: Some("io.adapter.runtime.mainProvider".to_string()),
            ..GeneratorConfig::default()
        };
        let from_config = generate_adapter(&request(), &config, &NullLogger).unwrap();
        let provider = o::import_ref(o::ExternalReference::new("io.adapter.runtime", "mainProvider"));
        assert_eq!(
            from_config.secondary_constructor.delegate_args.as_ref().unwrap()[1],
            *provider
        );

        let overridden = request().with_default_context_provider("com.example.testProvider");
        let from_request = generate_adapter(&overridden, &config, &NullLogger).unwrap();
        let provider = o::import_ref(o::ExternalReference::new("com.example", "testProvider"));
        assert_eq!(
            from_request.secondary_constructor.delegate_args.as_ref().unwrap()[1],
            *provider
        );
    }

    #[test]
    fn should_honor_configured_field_names() {
        let config = GeneratorConfig {
            wrapped_field_name: "inner".to_string(),
            context_provider_field_name: "dispatcher".to_string(),
            ..GeneratorConfig::default()
        };
        let adapter = generate_adapter(&request(), &config, &NullLogger).unwrap();

        assert_eq!(
            *returned(adapter.member("sum").unwrap()),
            *o::variable("inner")
                .prop("sum")
                .call_fn(vec![*o::variable("a"), *o::variable("b")])
        );
        let fields: Vec<&str> = adapter.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["inner", "dispatcher"]);
    }

    #[test]
    fn should_be_deterministic() {
        let request = request();
        assert_eq!(generate(&request), generate(&request));
    }

    #[test]
    fn should_reject_private_abstract_member() {
        let broken = repo().abstract_type().with_members([MemberDeclaration::function(
            "secret",
            [],
            TypeRef::unit(),
        )
        .with_modifiers(Modifiers::PRIVATE | Modifiers::ABSTRACT)
        .with_body(MemberBody::Absent)]);

        let err = generate_adapter(&AdapterRequest::new(broken, "RepoNative"), &GeneratorConfig::default(), &NullLogger)
            .unwrap_err();
        match err {
            GenerationError::MalformedMember { type_name, member, .. } => {
                assert_eq!(type_name, "com.example.Repo");
                assert_eq!(member, "secret");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn should_reject_adapter_named_like_original() {
        let err = generate_adapter(&AdapterRequest::new(repo(), "Repo"), &GeneratorConfig::default(), &NullLogger)
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidIdentifier { .. }));
    }

    #[test]
    fn should_log_classification_at_debug_level() {
        let logger = RecordingLogger::new(LogLevel::Debug);
        generate_adapter(&request(), &GeneratorConfig::default(), &logger).unwrap();

        let records = logger.records();
        assert!(records.contains(&(LogLevel::Debug, "Repo.load: async operation".to_string())));
        assert!(records.contains(&(LogLevel::Debug, "Repo.status: stream operation".to_string())));
        assert!(records.iter().any(|(level, msg)| *level == LogLevel::Info
            && msg.starts_with("generated com.example.RepoNative")));
    }

    #[test]
    fn should_mark_override_from_generated_interface_when_substitution_does_not_apply() {
        let logger = RecordingLogger::new(LogLevel::Warn);
        let unrelated = AdapterRequest::new(repo(), "RepoNative").with_substitution(
            SupertypeSubstitution::new(t("com.example.Other"), data_source_native()),
        );

        let adapter = generate_adapter(&unrelated, &GeneratorConfig::default(), &logger).unwrap();

        assert_eq!(adapter.supertypes, vec![t("com.example.DataSource")]);
        assert!(adapter.member("load").unwrap().modifiers.contains(Modifiers::OVERRIDE));
        assert!(adapter.member("status").unwrap().modifiers.contains(Modifiers::OVERRIDE));
        assert!(!adapter.member("sum").unwrap().modifiers.contains(Modifiers::OVERRIDE));
        assert_eq!(logger.records().len(), 1);
        assert_eq!(logger.records()[0].0, LogLevel::Warn);
    }

    #[test]
    fn should_mark_override_for_members_declared_by_generated_type() {
        let closeable_repo = TypeDescriptor::new("com.example.Repo")
            .with_supertypes([t("java.io.Closeable")])
            .with_members([MemberDeclaration::function(
                "load",
                [Parameter::new("id", t("kotlin.String"))],
                t("com.example.Data"),
            )
            .with_modifiers(Modifiers::SUSPEND)]);
        let request = AdapterRequest::new(closeable_repo, "RepoNative").with_substitution(
            SupertypeSubstitution::new(t("com.example.DataSource"), data_source_native()),
        );

        let adapter = generate(&request);

        assert_eq!(adapter.supertypes, vec![t("java.io.Closeable")]);
        assert_eq!(adapter.member("load").unwrap().modifiers, Modifiers::OVERRIDE);
    }

    #[test]
    fn should_forward_nullable_stream_as_plain_value() {
        let original = TypeDescriptor::new("com.example.Repo").with_members([
            MemberDeclaration::property(
                "maybe",
                t("kotlinx.coroutines.flow.Flow<com.example.Status>?"),
                false,
            ),
        ]);

        let adapter = generate(&AdapterRequest::new(original, "RepoNative"));
        let maybe = adapter.member("maybe").unwrap();

        assert_eq!(maybe.return_type, t("kotlinx.coroutines.flow.Flow<com.example.Status>?"));
        assert_eq!(*returned(maybe), *o::variable("wrapped").prop("maybe"));
    }

    #[test]
    fn should_accept_function_typed_parameters() {
        let original = TypeDescriptor::new("com.example.Repo").with_members([
            MemberDeclaration::function(
                "subscribe",
                [Parameter::new("cb", t("(kotlin.Int) -> kotlin.Unit"))],
                TypeRef::unit(),
            ),
            MemberDeclaration::function(
                "listen",
                [Parameter::new("cb", t("suspend (com.example.Data) -> kotlin.Unit"))],
                TypeRef::unit(),
            )
            .with_modifiers(Modifiers::SUSPEND),
        ]);

        let adapter = generate(&AdapterRequest::new(original, "RepoNative"));

        let subscribe = adapter.member("subscribe").unwrap();
        assert!(subscribe.parameters[0].type_.is_function());
        assert_eq!(subscribe.parameters[0].type_.to_string(), "(kotlin.Int) -> kotlin.Unit");
        let listen = adapter.member("listen").unwrap();
        assert_eq!(
            listen.return_type,
            t("io.adapter.runtime.AsyncOperationHandle<kotlin.Unit>")
        );
    }

    #[test]
    fn should_qualify_fields_shadowed_by_parameter_names() {
        let original = TypeDescriptor::new("com.example.Repo").with_members([
            MemberDeclaration::function(
                "merge",
                [Parameter::new("wrapped", t("com.example.Repo"))],
                t("com.example.Repo"),
            ),
        ]);

        let adapter = generate(&AdapterRequest::new(original, "RepoNative"));

        assert_eq!(
            *returned(adapter.member("merge").unwrap()),
            *o::this_expr()
                .prop("wrapped")
                .prop("merge")
                .call_fn(vec![*o::variable("wrapped")])
        );
    }
}
