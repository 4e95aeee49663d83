//! Interface Resolver
//!
//! Computes the supertypes an adapter declares:
//! 1. all supertypes of the original, in declaration order;
//! 2. the substituted supertype replaced in place by its generated mirror;
//! 3. the generated mirror appended when the wrapped type itself is the one
//!    that was mirrored.

use crate::model::{SupertypeSubstitution, TypeDescriptor, TypeRef};
use indexmap::IndexSet;

pub fn resolve(
    original: &TypeDescriptor,
    substitution: Option<&SupertypeSubstitution>,
) -> IndexSet<TypeRef> {
    let Some(substitution) = substitution else {
        return original.supertypes.iter().cloned().collect();
    };

    let generated = substitution.generated_ref();
    let mut resolved: IndexSet<TypeRef> = original
        .supertypes
        .iter()
        .map(|supertype| {
            if *supertype == substitution.original {
                generated.clone()
            } else {
                supertype.clone()
            }
        })
        .collect();

    if original.type_ref() == substitution.original {
        resolved.insert(generated);
    }
    resolved
}
