//! Grammar definitions for command text

pub mod ast;

// Re-export AST types
pub use ast::nodes::*;
