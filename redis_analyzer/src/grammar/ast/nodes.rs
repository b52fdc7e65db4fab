//! AST node definitions for parsed commands
//!
//! Argument nodes form a closed sum type so every consumer matches all
//! variants. Each node renders back to canonical command text through
//! `Display`; parsing that text again yields an equal tree.

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

// === ARGUMENT NODES ===

/// Bare word argument or command name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub value: String,
}

/// Quoted string; `value` is the raw text between the quotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerLiteral {
    pub value: i64,
}

/// Float value plus the literal it was read from, which is what renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatLiteral {
    pub value: f64,
    pub raw: String,
}

/// Reserved option word, normalized to uppercase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordExpression {
    pub value: String,
}

/// Key pattern such as `user:*` or a bare wildcard
///
/// `value` is the concatenated pattern. `parts` keeps the source fragments
/// so rendering can separate words that would otherwise lex as one.
/// Equality only compares `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternExpression {
    pub value: String,
    #[serde(skip)]
    pub parts: Vec<String>,
}

impl PartialEq for PatternExpression {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PatternExpression {}

impl fmt::Display for PatternExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.parts.split_first() else {
            return f.write_str(&self.value);
        };
        f.write_str(first)?;
        let mut prev = first.as_str();
        for part in rest {
            if joins_word(prev, part) {
                f.write_str(" ")?;
            }
            f.write_str(part)?;
            prev = part.as_str();
        }
        Ok(())
    }
}

/// Whether `next` written right after `prev` would extend prev's identifier
fn joins_word(prev: &str, next: &str) -> bool {
    let ends_word = prev
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    let starts_word = next
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    ends_word && starts_word
}

/// `[start, end]` range; bounds are never ranges themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeExpression {
    pub start: Box<Expression>,
    pub end: Box<Expression>,
}

/// One command argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    IntegerLiteral(IntegerLiteral),
    FloatLiteral(FloatLiteral),
    #[serde(rename = "KeywordExpression")]
    Keyword(KeywordExpression),
    #[serde(rename = "PatternExpression")]
    Pattern(PatternExpression),
    #[serde(rename = "RangeExpression")]
    Range(RangeExpression),
}

impl Expression {
    pub fn identifier(value: impl Into<String>) -> Self {
        Self::Identifier(Identifier {
            value: value.into(),
        })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(StringLiteral {
            value: value.into(),
        })
    }

    pub fn integer(value: i64) -> Self {
        Self::IntegerLiteral(IntegerLiteral { value })
    }

    pub fn float(value: f64, raw: impl Into<String>) -> Self {
        Self::FloatLiteral(FloatLiteral {
            value,
            raw: raw.into(),
        })
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(KeywordExpression {
            value: value.into().to_ascii_uppercase(),
        })
    }

    pub fn pattern(value: impl Into<String>) -> Self {
        Self::Pattern(PatternExpression {
            value: value.into(),
            parts: Vec::new(),
        })
    }

    /// Pattern assembled from separately lexed fragments
    pub fn pattern_from_parts(parts: Vec<String>) -> Self {
        Self::Pattern(PatternExpression {
            value: parts.concat(),
            parts,
        })
    }

    pub fn range(start: Expression, end: Expression) -> Self {
        Self::Range(RangeExpression {
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    /// Node kind name as reported in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "Identifier",
            Self::StringLiteral(_) => "StringLiteral",
            Self::IntegerLiteral(_) => "IntegerLiteral",
            Self::FloatLiteral(_) => "FloatLiteral",
            Self::Keyword(_) => "KeywordExpression",
            Self::Pattern(_) => "PatternExpression",
            Self::Range(_) => "RangeExpression",
        }
    }

    /// Canonical command-text rendering
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(keyword) => Some(&keyword.value),
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => f.write_str(&id.value),
            Self::StringLiteral(s) => {
                // Single quotes only when the raw text holds a bare double quote
                if has_unescaped(&s.value, '"') {
                    write!(f, "'{}'", s.value)
                } else {
                    write!(f, "\"{}\"", s.value)
                }
            }
            Self::IntegerLiteral(int) => write!(f, "{}", int.value),
            Self::FloatLiteral(float) => f.write_str(&float.raw),
            Self::Keyword(keyword) => f.write_str(&keyword.value),
            Self::Pattern(pattern) => write!(f, "{}", pattern),
            Self::Range(range) => write!(f, "[{}, {}]", range.start, range.end),
        }
    }
}

fn has_unescaped(text: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return true;
        }
    }
    false
}

// === STATEMENTS ===

/// One command line: a name plus its ordered arguments
///
/// Equality ignores `span` so a re-parsed rendering compares equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCommand {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub span: Option<Span>,
}

impl RedisCommand {
    pub fn new(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self {
            name: Identifier { value: name.into() },
            arguments,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Uppercase command name used for specification lookup
    pub fn command_name(&self) -> String {
        self.name.value.to_ascii_uppercase()
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for RedisCommand {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arguments == other.arguments
    }
}

impl fmt::Display for RedisCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.value)?;
        for argument in &self.arguments {
            write!(f, " {}", argument)?;
        }
        Ok(())
    }
}

/// Root node: the commands of a multi-line text in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<RedisCommand>,
}

impl Program {
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_rendering() {
        assert_eq!(Expression::identifier("mykey").to_text(), "mykey");
        assert_eq!(Expression::string("hello world").to_text(), "\"hello world\"");
        assert_eq!(Expression::integer(-60).to_text(), "-60");
        assert_eq!(Expression::float(2.50, "2.50").to_text(), "2.50");
        assert_eq!(Expression::keyword("ex").to_text(), "EX");
        assert_eq!(Expression::pattern("user:*").to_text(), "user:*");
        assert_eq!(
            Expression::range(Expression::integer(0), Expression::integer(-1)).to_text(),
            "[0, -1]"
        );
    }

    #[test]
    fn test_string_quote_choice() {
        assert_eq!(Expression::string("it's").to_text(), "\"it's\"");
        assert_eq!(Expression::string("say \"hi\"").to_text(), "'say \"hi\"'");
        assert_eq!(Expression::string(r#"a\"b"#).to_text(), r#""a\"b""#);
    }

    #[test]
    fn test_type_names() {
        let names: Vec<_> = [
            Expression::identifier("k"),
            Expression::string("v"),
            Expression::integer(1),
            Expression::float(1.5, "1.5"),
            Expression::keyword("NX"),
            Expression::pattern("*"),
            Expression::range(Expression::integer(0), Expression::integer(1)),
        ]
        .iter()
        .map(Expression::type_name)
        .collect();

        assert_eq!(
            names,
            vec![
                "Identifier",
                "StringLiteral",
                "IntegerLiteral",
                "FloatLiteral",
                "KeywordExpression",
                "PatternExpression",
                "RangeExpression",
            ]
        );
    }

    #[test]
    fn test_command_and_program_rendering() {
        let set = RedisCommand::new(
            "SET",
            vec![
                Expression::identifier("key"),
                Expression::string("value"),
                Expression::keyword("EX"),
                Expression::integer(60),
            ],
        );
        let get = RedisCommand::new("get", vec![Expression::identifier("key")]);

        assert_eq!(set.to_text(), "SET key \"value\" EX 60");
        assert_eq!(get.command_name(), "GET");

        let program = Program {
            statements: vec![set, get],
        };
        assert_eq!(program.to_text(), "SET key \"value\" EX 60\nget key");
    }

    #[test]
    fn test_command_equality_ignores_span() {
        use crate::utils::{Position, Span};

        let plain = RedisCommand::new("GET", vec![Expression::identifier("k")]);
        let spanned = plain
            .clone()
            .with_span(Span::new(Position::start(), Position::new(5, 1, 6)));
        assert_eq!(plain, spanned);
    }

    #[test]
    fn test_pattern_parts_keep_words_apart() {
        let parts = |list: &[&str]| list.iter().map(|p| p.to_string()).collect::<Vec<_>>();

        let wildcard = Expression::pattern_from_parts(parts(&["*", "e", "x"]));
        assert_eq!(wildcard.to_text(), "*e x");
        assert_eq!(wildcard, Expression::pattern("*ex"));

        let prefixed = Expression::pattern_from_parts(parts(&["user", ":", "co", "unt"]));
        assert_eq!(prefixed.to_text(), "user:co unt");

        let plain = Expression::pattern_from_parts(parts(&["user", ":", "*", ":", "name"]));
        assert_eq!(plain.to_text(), "user:*:name");
    }

    #[test]
    fn test_expression_serializes_with_type_tag() {
        let json = serde_json::to_value(Expression::pattern("user:*")).expect("serializable");
        assert_eq!(json["type"], "PatternExpression");
        assert_eq!(json["value"], "user:*");
    }
}
