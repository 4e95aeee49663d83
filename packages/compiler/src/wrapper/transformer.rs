//! Member Transformer
//!
//! Rewrites one non-private member of the wrapped type into the adapter's
//! delegating member. Name and parameters are kept; modifiers, return type
//! and body follow the member's kind.

use super::classifier::{classify, MemberKind};
use super::signature::overrides;
use crate::config::{FieldNames, RuntimeTypes};
use crate::model::{
    DeclarationKind, MemberDeclaration, Modifiers, Parameters, TypeDescriptor, TypeRef, Variance,
};
use crate::output::output_ast::{self as o, ExternalReference};
use serde::Serialize;

/// Modifiers that never survive into the adapter. `override` is recomputed
/// against the generated interface.
const STRIPPED: Modifiers = Modifiers::SUSPEND
    .union(Modifiers::ABSTRACT)
    .union(Modifiers::OVERRIDE);

/// A member of the generated adapter. Its body always forwards to the
/// wrapped instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterMember {
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclarationKind,
    pub parameters: Parameters,
    pub return_type: TypeRef,
    pub modifiers: Modifiers,
    pub body: o::Statement,
}

impl AdapterMember {
    pub fn is_property(&self) -> bool {
        matches!(self.kind, DeclarationKind::Property { .. })
    }

    pub fn is_mutable(&self) -> bool {
        matches!(self.kind, DeclarationKind::Property { mutable: true })
    }
}

pub fn transform(
    member: &MemberDeclaration,
    generated: Option<&TypeDescriptor>,
    fields: &FieldNames,
    runtime: &RuntimeTypes,
) -> AdapterMember {
    let kind = classify(member, &runtime.stream);

    let mut modifiers = member.modifiers.difference(STRIPPED);
    if overrides(member, generated) {
        modifiers |= Modifiers::OVERRIDE;
    }

    let return_type = match kind {
        MemberKind::AsyncOperation => runtime.async_handle_of(member.return_type.clone()),
        MemberKind::StreamOperation => runtime.stream_handle_of(stream_element(&member.return_type)),
        MemberKind::SyncOperation | MemberKind::SyncProperty => member.return_type.clone(),
    };

    // Adapters only forward reads.
    let declaration_kind = match member.kind {
        DeclarationKind::Function => DeclarationKind::Function,
        DeclarationKind::Property { .. } => DeclarationKind::Property { mutable: false },
    };

    AdapterMember {
        name: member.name.clone(),
        kind: declaration_kind,
        parameters: member.parameters.clone(),
        return_type,
        modifiers,
        body: delegation_body(member, kind, fields, runtime),
    }
}

/// Element type of the stream; `Flow<out T>` yields `T`.
fn stream_element(stream: &TypeRef) -> TypeRef {
    match stream.first_argument() {
        Some(element) if !element.is_star() => element.clone().with_variance(Variance::Invariant),
        _ => TypeRef::star(),
    }
}

/// Read of a stored field, qualified with `this` when a parameter of
/// `member` has the same name.
fn field(member: &MemberDeclaration, name: &str) -> Box<o::Expression> {
    if member.parameter_names().any(|p| p == name) {
        o::this_expr().prop(name)
    } else {
        o::variable(name)
    }
}

/// `wrapped.name(args...)` for functions, `wrapped.name` for properties.
fn original_invocation(member: &MemberDeclaration, fields: &FieldNames) -> Box<o::Expression> {
    let target = field(member, &fields.wrapped).prop(member.name.as_str());
    if member.is_function() {
        let args = member
            .parameters
            .iter()
            .map(|p| *o::variable(p.name.as_str()))
            .collect();
        target.call_fn(args)
    } else {
        target
    }
}

fn delegation_body(
    member: &MemberDeclaration,
    kind: MemberKind,
    fields: &FieldNames,
    runtime: &RuntimeTypes,
) -> o::Statement {
    let invocation = original_invocation(member, fields);
    let provider = field(member, &fields.context_provider);

    let value = match kind {
        MemberKind::AsyncOperation => {
            o::import_ref(ExternalReference::from_type(&runtime.async_handle))
                .instantiate(vec![*provider, *o::thunk(invocation)])
        }
        MemberKind::StreamOperation => {
            o::import_ref(ExternalReference::from_type(&runtime.stream_handle))
                .instantiate(vec![*provider, *invocation])
        }
        MemberKind::SyncOperation | MemberKind::SyncProperty => invocation,
    };
    o::return_stmt(value)
}
