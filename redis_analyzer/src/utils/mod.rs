//! Shared types and utilities for the tokenizer, parser and validator

pub mod span;

pub use span::{Position, SourceMap, Span};
