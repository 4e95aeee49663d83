//! Input Validation
//!
//! Rejects malformed descriptors from the extraction stage before any
//! transformation runs. Every error names the offending member and type.

use crate::error::{GenerationError, Result};
use crate::model::{AdapterRequest, MemberBody, MemberDeclaration, Modifiers, TypeDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static QUALIFIED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
});

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

pub fn is_qualified_name(name: &str) -> bool {
    QUALIFIED_NAME_RE.is_match(name)
}

pub fn validate_request(request: &AdapterRequest) -> Result<()> {
    let original = &request.original;
    validate_type(original)?;

    if !is_identifier(&request.adapter_name) {
        return Err(invalid(original, "adapter name", &request.adapter_name));
    }
    if request.adapter_name == original.simple_name() {
        return Err(invalid(
            original,
            "adapter name (same as the wrapped type)",
            &request.adapter_name,
        ));
    }

    if let Some(substitution) = &request.substitution {
        validate_type(&substitution.generated)?;
    }
    if let Some(provider) = &request.default_context_provider {
        if !is_qualified_name(provider) {
            return Err(invalid(original, "default context provider", provider));
        }
    }
    Ok(())
}

pub fn validate_type(descriptor: &TypeDescriptor) -> Result<()> {
    if !is_qualified_name(&descriptor.name) {
        return Err(invalid(descriptor, "type name", &descriptor.name));
    }
    descriptor
        .members
        .iter()
        .try_for_each(|member| validate_member(descriptor, member))
}

/// Checks one declaration, private ones included: invalid members are
/// reported, never dropped.
pub fn validate_member(owner: &TypeDescriptor, member: &MemberDeclaration) -> Result<()> {
    if !is_identifier(&member.name) {
        return Err(invalid(owner, "member name", &member.name));
    }

    let malformed = |reason: &str| GenerationError::malformed(&owner.name, &member.name, reason);
    let modifiers = member.modifiers;

    if modifiers.contains(Modifiers::PRIVATE | Modifiers::ABSTRACT) {
        return Err(malformed("modifiers 'private' and 'abstract' are incompatible"));
    }
    if modifiers.contains(Modifiers::PRIVATE | Modifiers::OVERRIDE) {
        return Err(malformed("modifiers 'private' and 'override' are incompatible"));
    }
    if modifiers.contains(Modifiers::ABSTRACT) {
        if !owner.is_abstract {
            return Err(malformed("abstract member in a concrete type"));
        }
        if member.body != MemberBody::Absent {
            return Err(malformed("abstract member cannot have a body"));
        }
    }

    if member.is_property() {
        if !member.parameters.is_empty() {
            return Err(malformed("property cannot declare parameters"));
        }
        if modifiers.contains(Modifiers::SUSPEND) {
            return Err(malformed("property cannot be suspending"));
        }
    }

    let mut seen = HashSet::new();
    for parameter in &member.parameters {
        if !is_identifier(&parameter.name) {
            return Err(invalid(owner, "parameter name", &parameter.name));
        }
        if !seen.insert(parameter.name.as_str()) {
            return Err(malformed(&format!("duplicate parameter '{}'", parameter.name)));
        }
    }
    Ok(())
}

fn invalid(owner: &TypeDescriptor, role: &'static str, identifier: &str) -> GenerationError {
    GenerationError::InvalidIdentifier {
        type_name: owner.name.clone(),
        role,
        identifier: identifier.to_string(),
    }
}
