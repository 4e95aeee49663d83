#![deny(clippy::all)]

//! Adapter Compiler CLI
//!
//! Drives the adapter compiler over request files on disk.

pub use adapter_compiler as compiler;

pub mod config;
pub mod perform_generate;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
