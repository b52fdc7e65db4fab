//! Token kinds, keyword lookup and the positioned token type

use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every lexical category the tokenizer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // === SPECIAL ===
    Illegal,
    Eof,

    // === IDENTIFIERS AND LITERALS ===
    Ident,
    String,
    Int,
    Float,

    // === SEPARATORS ===
    Newline,

    // === SYMBOLS ===
    Asterisk,  // *
    Question,  // ?
    BracketL,  // [
    BracketR,  // ]
    ParenL,    // (
    ParenR,    // )
    Comma,     // ,
    Colon,     // :
    Pipe,      // |
    Plus,      // +
    Minus,     // -

    // === RESERVED KEYWORDS ===
    Ex,
    Px,
    Nx,
    Xx,
    Withscores,
    Limit,
    Count,
    Match,
    Type,
}

/// Reserved option keywords and their token kinds
pub const KEYWORDS: [(&str, TokenKind); 9] = [
    ("EX", TokenKind::Ex),
    ("PX", TokenKind::Px),
    ("NX", TokenKind::Nx),
    ("XX", TokenKind::Xx),
    ("WITHSCORES", TokenKind::Withscores),
    ("LIMIT", TokenKind::Limit),
    ("COUNT", TokenKind::Count),
    ("MATCH", TokenKind::Match),
    ("TYPE", TokenKind::Type),
];

impl TokenKind {
    /// Upper-snake display name used in parser messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Ident => "IDENT",
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Newline => "NEWLINE",
            Self::Asterisk => "ASTERISK",
            Self::Question => "QUESTION",
            Self::BracketL => "BRACKET_L",
            Self::BracketR => "BRACKET_R",
            Self::ParenL => "PAREN_L",
            Self::ParenR => "PAREN_R",
            Self::Comma => "COMMA",
            Self::Colon => "COLON",
            Self::Pipe => "PIPE",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Ex => "EX",
            Self::Px => "PX",
            Self::Nx => "NX",
            Self::Xx => "XX",
            Self::Withscores => "WITHSCORES",
            Self::Limit => "LIMIT",
            Self::Count => "COUNT",
            Self::Match => "MATCH",
            Self::Type => "TYPE",
        }
    }

    /// Map a single character to its symbol kind
    pub fn from_symbol(ch: char) -> Option<Self> {
        let kind = match ch {
            '*' => Self::Asterisk,
            '?' => Self::Question,
            '[' => Self::BracketL,
            ']' => Self::BracketR,
            '(' => Self::ParenL,
            ')' => Self::ParenR,
            ',' => Self::Comma,
            ':' => Self::Colon,
            '|' => Self::Pipe,
            '+' => Self::Plus,
            '-' => Self::Minus,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this kind is one of the reserved option keywords
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Ex
                | Self::Px
                | Self::Nx
                | Self::Xx
                | Self::Withscores
                | Self::Limit
                | Self::Count
                | Self::Match
                | Self::Type
        )
    }

    /// Check if this kind is a literal value
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Float)
    }

    /// Check if this kind is a single-character symbol
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            Self::Asterisk
                | Self::Question
                | Self::BracketL
                | Self::BracketR
                | Self::ParenL
                | Self::ParenR
                | Self::Comma
                | Self::Colon
                | Self::Pipe
                | Self::Plus
                | Self::Minus
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify identifier text, matching keywords case-insensitively
pub fn lookup_ident(text: &str) -> TokenKind {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(text))
        .map(|(_, kind)| *kind)
        .unwrap_or(TokenKind::Ident)
}

/// One lexical unit with its literal text and source extent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    #[serde(flatten)]
    pub position: Position,
    /// Position just past the source text the token was read from
    pub end: Position,
}

impl Token {
    /// Token whose source text is exactly its literal
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        let literal = literal.into();
        let end = position.advance_str(&literal);
        Self {
            kind,
            literal,
            position,
            end,
        }
    }

    /// Override the end for tokens whose literal omits source text, like quotes
    pub fn with_end(mut self, end: Position) -> Self {
        self.end = end;
        self
    }

    /// Byte offset where the token starts
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Line where the token starts (1-based)
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Column where the token starts (1-based)
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Span over the token's source text, quotes included
    pub fn span(&self) -> Span {
        Span::new(self.position, self.end)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) at {}",
            self.kind.name(),
            self.literal,
            self.position
        )
    }
}
