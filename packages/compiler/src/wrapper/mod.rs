//! Wrapper Module
//!
//! Turns the description of a type with suspending members and streams into
//! the description of an adapter that exposes them through handles.
//!
//! A generation run is a pure function of its request and configuration:
//! the input is validated, supertypes are resolved, every non-private member
//! is transformed, and the pieces are assembled into an [`AdapterDescriptor`].

pub mod assembler;
pub mod classifier;
pub mod interfaces;
pub mod signature;
pub mod transformer;
pub mod validation;

pub use assembler::{assemble, AdapterDescriptor, Constructor, Field};
pub use classifier::{classify, MemberKind};
pub use interfaces::resolve;
pub use signature::overrides;
pub use transformer::{transform, AdapterMember};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::logging::Logger;
use crate::model::AdapterRequest;
use crate::output::output_ast::ExternalReference;

pub fn generate_adapter(
    request: &AdapterRequest,
    config: &GeneratorConfig,
    logger: &dyn Logger,
) -> Result<AdapterDescriptor> {
    let runtime = config.runtime_types()?;
    let fields = config.field_names()?;
    validation::validate_request(request)?;

    let original = &request.original;
    let supertypes = resolve(original, request.substitution.as_ref());

    let generated = request.substitution.as_ref().map(|s| &s.generated);
    if let Some(substitution) = &request.substitution {
        if !supertypes.contains(&substitution.generated_ref()) {
            logger.warn(&format!(
                "substitution of '{}' does not apply to the supertypes of '{}'",
                substitution.original, original.name
            ));
        }
    }

    let members = original
        .non_private_members()
        .map(|member| {
            logger.debug(&format!(
                "{}.{}: {}",
                original.simple_name(),
                member.name,
                classify(member, &runtime.stream)
            ));
            transform(member, generated, &fields, &runtime)
        })
        .collect::<Vec<_>>();

    let default_provider = match request.default_context_provider.as_deref() {
        Some(provider) => Some(ExternalReference::member(provider)),
        None => config.default_context_provider_ref()?,
    };

    let adapter = assemble(
        &request.adapter_name,
        original,
        members,
        supertypes,
        default_provider.as_ref(),
        &fields,
        &runtime,
    );

    logger.info(&format!(
        "generated {} from {} ({} members, {} supertypes)",
        adapter.name,
        original.name,
        adapter.members.len(),
        adapter.supertypes.len()
    ));
    Ok(adapter)
}
