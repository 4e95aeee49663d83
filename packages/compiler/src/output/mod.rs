//! Output Module
//!
//! Output AST for synthesized code and the emitters that render it.

pub mod abstract_emitter;
pub mod kotlin_emitter;
pub mod output_ast;

pub use kotlin_emitter::emit_adapter;
