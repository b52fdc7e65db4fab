//! Token model for command text
//!
//! Tokens are the vocabulary shared by the tokenizer and the parser. Each
//! token carries its kind, the literal slice it was read from and the
//! position where it starts.
//!
//! ## Token kinds
//!
//! - **Special**: `EOF` and `ILLEGAL` (one unrecognized character)
//! - **Literals**: `IDENT`, `STRING`, `INT`, `FLOAT`
//! - **Separators**: `NEWLINE` ends a command
//! - **Symbols**: `* ? [ ] ( ) , : | + -`
//! - **Keywords**: `EX PX NX XX WITHSCORES LIMIT COUNT MATCH TYPE`, matched
//!   case-insensitively against identifier text

pub mod token;

pub use token::{lookup_ident, Token, TokenKind, KEYWORDS};
