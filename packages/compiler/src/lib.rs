#![deny(clippy::all)]

//! Adapter Compiler
//!
//! Generates delegating adapter types that expose suspending functions and
//! streams of a wrapped type as explicit handles bound to an execution
//! context provider.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod wrapper;

// Re-exports
pub use config::GeneratorConfig;
pub use error::{GenerationError, Result};
pub use model::{AdapterRequest, MemberDeclaration, SupertypeSubstitution, TypeDescriptor, TypeRef};
pub use output::emit_adapter;
pub use wrapper::{generate_adapter, AdapterDescriptor};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
