//! Model Module
//!
//! Input and output descriptors exchanged with the surrounding stages.

pub mod declaration;
pub mod type_ref;

pub use declaration::{
    DeclarationKind, MemberBody, MemberDeclaration, Modifiers, Parameter, Parameters,
    SupertypeSubstitution, TypeDescriptor,
};
pub use type_ref::{FunctionType, TypeRef, Variance};

use serde::{Deserialize, Serialize};

/// One adapter to generate, as handed over by the extraction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterRequest {
    pub original: TypeDescriptor,
    #[serde(default)]
    pub substitution: Option<SupertypeSubstitution>,
    pub adapter_name: String,
    /// Qualified top-level member used by the secondary constructor.
    /// Overrides the configured default when present.
    #[serde(default)]
    pub default_context_provider: Option<String>,
}

impl AdapterRequest {
    pub fn new(original: TypeDescriptor, adapter_name: impl Into<String>) -> Self {
        AdapterRequest {
            original,
            substitution: None,
            adapter_name: adapter_name.into(),
            default_context_provider: None,
        }
    }

    pub fn with_substitution(mut self, substitution: SupertypeSubstitution) -> Self {
        self.substitution = Some(substitution);
        self
    }

    pub fn with_default_context_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_context_provider = Some(provider.into());
        self
    }
}
