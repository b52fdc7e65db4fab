//! Two-token lookahead parser for command text
//!
//! The parser holds a current token and one peek token. Every error is
//! recorded and parsing continues, so callers always receive a (possibly
//! partial) AST together with the full error list.

use crate::config::compile_time::syntax::*;
use crate::grammar::{Expression, Program, RedisCommand};
use crate::lexical::Tokenizer;
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxErrorKind};
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error};
use std::mem;

/// Parser over any token source that ends with an `EOF` token
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    cur: Token,
    peek: Token,
    last_position: Position,
    error_history: Vec<SyntaxError>,
    dropped_errors: usize,
}

impl<'a> Parser<Tokenizer<'a>> {
    /// Create a parser that tokenizes lazily as it advances
    pub fn new(text: &'a str) -> Self {
        Self::with_source(Tokenizer::new(text))
    }
}

impl Parser<std::vec::IntoIter<Token>> {
    /// Create a parser over an already materialized token list
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::with_source(tokens.into_iter())
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    fn with_source(tokens: I) -> Self {
        let start = Position::start();
        let mut parser = Self {
            tokens,
            cur: Token::new(TokenKind::Eof, "", start),
            peek: Token::new(TokenKind::Eof, "", start),
            last_position: start,
            error_history: Vec::new(),
            dropped_errors: 0,
        };
        parser.cur = parser.pull();
        parser.peek = parser.pull();
        parser
    }

    // ========================================================================
    // TOKEN NAVIGATION
    // ========================================================================

    /// Pull the next token; an exhausted source keeps yielding `EOF`
    fn pull(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.last_position = token.position;
                token
            }
            None => Token::new(TokenKind::Eof, "", self.last_position),
        }
    }

    fn next_token(&mut self) {
        let next = self.pull();
        self.cur = mem::replace(&mut self.peek, next);
    }

    fn peek_is_line_end(&self) -> bool {
        matches!(self.peek.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn skip_newlines(&mut self) {
        while self.cur.is(TokenKind::Newline) {
            self.next_token();
        }
    }

    /// Advance until the current token is the last one on its line
    fn skip_to_line_end(&mut self) {
        while !self.peek_is_line_end() {
            self.next_token();
        }
    }

    // ========================================================================
    // ERROR ACCUMULATION
    // ========================================================================

    fn record_error(&mut self, kind: SyntaxErrorKind, span: Span) {
        let error = SyntaxError::new(kind, span);
        log_error!(error.error_code(), &error.to_string(), span = span);

        if self.error_history.len() < MAX_ERROR_HISTORY {
            self.error_history.push(error);
        } else {
            self.dropped_errors += 1;
        }
    }

    fn error_at_cur(&mut self, kind: SyntaxErrorKind) {
        let span = self.cur.span();
        self.record_error(kind, span);
    }

    /// Errors recorded so far, oldest first
    pub fn errors(&self) -> &[SyntaxError] {
        &self.error_history
    }

    /// Errors past the history limit that were counted but not kept
    pub fn dropped_errors(&self) -> usize {
        self.dropped_errors
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.error_history
    }

    // ========================================================================
    // STATEMENTS
    // ========================================================================

    /// Parse every newline-separated command until end of input
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.cur.is(TokenKind::Eof) {
                break;
            }

            if statements.len() >= MAX_COMMANDS_PER_PROGRAM {
                self.error_at_cur(SyntaxErrorKind::TooManyCommands {
                    max: MAX_COMMANDS_PER_PROGRAM,
                });
                break;
            }

            match self.parse_statement() {
                Some(command) => statements.push(command),
                None => self.skip_to_line_end(),
            }
            self.next_token();
        }

        if self.dropped_errors > 0 {
            log_error!(codes::syntax::ERROR_LIMIT_EXCEEDED, "Syntax error history limit reached",
                "kept" => self.error_history.len(),
                "dropped" => self.dropped_errors
            );
        }

        log_debug!("Program parsed",
            "statements" => statements.len(),
            "errors" => self.error_history.len()
        );

        Program { statements }
    }

    /// Parse the first command of the input, skipping blank leading lines
    pub fn parse_command(&mut self) -> Option<RedisCommand> {
        self.skip_newlines();
        self.parse_statement()
    }

    fn parse_statement(&mut self) -> Option<RedisCommand> {
        if !self.cur.is(TokenKind::Ident) {
            self.error_at_cur(SyntaxErrorKind::MissingCommand {
                found: self.cur.kind,
            });
            return None;
        }

        let name = self.cur.literal.clone();
        let mut span = self.cur.span();
        let mut arguments = Vec::new();

        while !self.peek_is_line_end() {
            if arguments.len() >= MAX_ARGUMENTS_PER_COMMAND {
                let at = self.peek.span();
                self.record_error(
                    SyntaxErrorKind::TooManyArguments {
                        max: MAX_ARGUMENTS_PER_COMMAND,
                    },
                    at,
                );
                self.skip_to_line_end();
                span = span.to(self.cur.span());
                break;
            }

            self.next_token();
            if let Some(argument) = self.parse_expression() {
                arguments.push(argument);
            }
            span = span.to(self.cur.span());
        }

        Some(RedisCommand::new(name, arguments).with_span(span))
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn parse_expression(&mut self) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Ident if self.peek.is(TokenKind::Colon) => Some(self.parse_pattern()),
            TokenKind::Ident => Some(Expression::identifier(self.cur.literal.as_str())),
            TokenKind::String => Some(Expression::string(self.cur.literal.as_str())),
            TokenKind::Int => self.parse_integer(),
            TokenKind::Float => self.parse_float(),
            TokenKind::Asterisk | TokenKind::Question => Some(self.parse_pattern()),
            TokenKind::BracketL => self.parse_range(),
            kind if kind.is_keyword() => Some(Expression::keyword(self.cur.literal.as_str())),
            found => {
                self.error_at_cur(SyntaxErrorKind::UnexpectedToken { found });
                None
            }
        }
    }

    fn parse_integer(&mut self) -> Option<Expression> {
        match self.cur.literal.parse::<i64>() {
            Ok(value) => Some(Expression::integer(value)),
            Err(_) => {
                let literal = self.cur.literal.clone();
                self.error_at_cur(SyntaxErrorKind::InvalidInteger { literal });
                None
            }
        }
    }

    fn parse_float(&mut self) -> Option<Expression> {
        match self.cur.literal.parse::<f64>() {
            Ok(value) => Some(Expression::float(value, self.cur.literal.as_str())),
            Err(_) => {
                let literal = self.cur.literal.clone();
                self.error_at_cur(SyntaxErrorKind::InvalidFloat { literal });
                None
            }
        }
    }

    /// Concatenate the current token with every following pattern fragment
    fn parse_pattern(&mut self) -> Expression {
        let mut parts = vec![self.cur.literal.clone()];
        while matches!(
            self.peek.kind,
            TokenKind::Asterisk | TokenKind::Question | TokenKind::Ident | TokenKind::Colon
        ) {
            self.next_token();
            parts.push(self.cur.literal.clone());
        }
        Expression::pattern_from_parts(parts)
    }

    /// `[start, end]` with the current token on `[`
    ///
    /// A range never consumes a line break, so a broken range cannot swallow
    /// the next statement.
    fn parse_range(&mut self) -> Option<Expression> {
        if self.peek_is_line_end() {
            let (found, at) = (self.peek.kind, self.peek.span());
            self.record_error(SyntaxErrorKind::UnexpectedToken { found }, at);
            return None;
        }
        self.next_token();
        let start = self.parse_range_bound()?;

        if !self.peek.is(TokenKind::Comma) {
            self.error_at_cur(SyntaxErrorKind::MissingRangeComma);
            return None;
        }
        self.next_token();

        if self.peek_is_line_end() {
            let (found, at) = (self.peek.kind, self.peek.span());
            self.record_error(SyntaxErrorKind::UnexpectedToken { found }, at);
            return None;
        }
        self.next_token();
        let end = self.parse_range_bound()?;

        if !self.peek.is(TokenKind::BracketR) {
            self.error_at_cur(SyntaxErrorKind::MissingRangeClose);
            return None;
        }
        self.next_token();

        Some(Expression::range(start, end))
    }

    fn parse_range_bound(&mut self) -> Option<Expression> {
        if self.cur.is(TokenKind::BracketL) {
            self.error_at_cur(SyntaxErrorKind::NestedRange);
            self.skip_to_line_end();
            return None;
        }
        self.parse_expression()
    }
}
