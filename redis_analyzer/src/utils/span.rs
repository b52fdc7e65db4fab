//! Source location tracking for command text
//!
//! Positions and spans let the parser and the CLI point at the exact token
//! that produced an error.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, one per character)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// Advance position by a string
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Get the start position of this span
    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the end position of this span
    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a zero-width span at a position
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Combine this span with another to create a span that covers both
    pub fn to(&self, other: Span) -> Span {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Check if this span is empty
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A source map that tracks line starts for error rendering
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// The original source text
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a new source map from source text
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Get a line of text by line number (1-based)
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        self.source
            .get(start..end)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Format an error message with source context
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = span.start.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let indent = " ".repeat(span.start.column.saturating_sub(1) as usize);
            let width = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                1
            };

            result.push_str(&format!("{} | {}{}\n", padding, indent, "^".repeat(width.max(1))));
        }

        result
    }
}
