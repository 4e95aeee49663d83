//! Adapter Assembler
//!
//! Composes constructors, stored fields, resolved supertypes and transformed
//! members into the final adapter descriptor.

use crate::config::{FieldNames, RuntimeTypes};
use crate::model::type_ref::split_qualified;
use super::transformer::AdapterMember;
use crate::model::{Modifiers, Parameter, Parameters, TypeDescriptor, TypeRef};
use crate::output::output_ast::{self as o, ExternalReference};
use indexmap::IndexSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub parameters: Parameters,
    /// Arguments passed to the primary constructor, for secondary ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_args: Option<Vec<o::Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TypeRef,
    pub modifiers: Modifiers,
    pub initializer: o::Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterDescriptor {
    /// Fully qualified name; the adapter lives in the wrapped type's package.
    pub name: String,
    pub wrapped_type: TypeRef,
    pub primary_constructor: Constructor,
    pub secondary_constructor: Constructor,
    pub fields: Vec<Field>,
    pub supertypes: Vec<TypeRef>,
    pub members: Vec<AdapterMember>,
}

impl AdapterDescriptor {
    pub fn package_name(&self) -> &str {
        split_qualified(&self.name).0
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.name.clone())
    }

    pub fn member(&self, name: &str) -> Option<&AdapterMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

pub fn assemble(
    name: &str,
    original: &TypeDescriptor,
    members: Vec<AdapterMember>,
    supertypes: IndexSet<TypeRef>,
    default_provider: Option<&ExternalReference>,
    fields: &FieldNames,
    runtime: &RuntimeTypes,
) -> AdapterDescriptor {
    let wrapped_type = original.type_ref();
    let provider_type = runtime.optional_context_provider();

    let wrapped_param = Parameter::new(fields.wrapped.clone(), wrapped_type.clone());
    let provider_param = Parameter::new(fields.context_provider.clone(), provider_type.clone());

    let primary_constructor = Constructor {
        parameters: [wrapped_param.clone(), provider_param].into_iter().collect(),
        delegate_args: None,
    };

    let fallback = match default_provider {
        Some(reference) => o::import_ref(reference.clone()),
        None => o::null_expr(),
    };
    let secondary_constructor = Constructor {
        parameters: [wrapped_param].into_iter().collect(),
        delegate_args: Some(vec![*o::variable(fields.wrapped.as_str()), *fallback]),
    };

    let stored = |field_name: &str, type_: TypeRef| Field {
        name: field_name.to_string(),
        type_,
        modifiers: Modifiers::PRIVATE,
        initializer: *o::variable(field_name),
    };

    let package = original.package_name();
    let qualified_name = if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    };

    AdapterDescriptor {
        name: qualified_name,
        wrapped_type: wrapped_type.clone(),
        primary_constructor,
        secondary_constructor,
        fields: vec![
            stored(&fields.wrapped, wrapped_type),
            stored(&fields.context_provider, provider_type),
        ],
        supertypes: supertypes.into_iter().collect(),
        members,
    }
}
