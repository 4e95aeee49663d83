//! Error Module
//!
//! Errors reported while turning a type description into an adapter.
//! Generation is all-or-nothing: the first malformed declaration aborts the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("malformed member '{member}' in type '{type_name}': {reason}")]
    MalformedMember {
        type_name: String,
        member: String,
        reason: String,
    },

    #[error("invalid {role} '{identifier}' in type '{type_name}'")]
    InvalidIdentifier {
        type_name: String,
        role: &'static str,
        identifier: String,
    },

    #[error("invalid type reference '{input}': {reason}")]
    InvalidTypeReference { input: String, reason: String },

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

impl GenerationError {
    pub fn malformed(
        type_name: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GenerationError::MalformedMember {
            type_name: type_name.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_type_ref(input: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerationError::InvalidTypeReference {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
