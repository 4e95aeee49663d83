//! Signature Matcher
//!
//! Decides whether an adapter member overrides a member of the generated
//! interface. Types are not compared: the generated interface mirrors the
//! original call with handle types, so only names line up.

use crate::model::{DeclarationKind, MemberDeclaration, TypeDescriptor};

pub fn overrides(candidate: &MemberDeclaration, target: Option<&TypeDescriptor>) -> bool {
    target.is_some_and(|target| {
        target
            .members
            .iter()
            .any(|member| has_same_signature(candidate, member))
    })
}

fn has_same_signature(a: &MemberDeclaration, b: &MemberDeclaration) -> bool {
    if a.name != b.name {
        return false;
    }
    match (a.kind, b.kind) {
        (DeclarationKind::Function, DeclarationKind::Function) => {
            a.parameter_names().eq(b.parameter_names())
        }
        (DeclarationKind::Property { .. }, DeclarationKind::Property { .. }) => true,
        _ => false,
    }
}
