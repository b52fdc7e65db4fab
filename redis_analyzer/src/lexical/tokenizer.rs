//! Lazy tokenizer for command text
//!
//! The tokenizer never fails: characters it does not recognize become
//! `ILLEGAL` tokens and scanning continues with the next character.

use crate::config::compile_time::lexical::{MAX_LITERAL_LENGTH, MAX_TOKEN_COUNT};
use crate::logging::codes;
use crate::tokens::{lookup_ident, Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error};

/// Resource-limit errors raised before or after a full scan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Input too large: {size} bytes (max {max})")]
    InputTooLarge { size: usize, max: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Literal too long: {length} bytes (max {MAX_LITERAL_LENGTH}) at line {}, column {}", .position.line, .position.column)]
    LiteralTooLong { length: usize, position: Position },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InputTooLarge { .. } => codes::lexical::INPUT_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::LiteralTooLong { .. } => codes::lexical::LITERAL_TOO_LONG,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::LiteralTooLong { position, .. } => Some(Span::point(*position)),
            _ => None,
        }
    }
}

/// Token counts per class, collected while scanning
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub identifier_tokens: usize,
    pub keyword_tokens: usize,
    pub literal_tokens: usize,
    pub symbol_tokens: usize,
    pub newline_tokens: usize,
    pub illegal_tokens: usize,
    pub unterminated_strings: usize,
    pub max_literal_length: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token.kind {
            TokenKind::Ident => self.identifier_tokens += 1,
            TokenKind::Newline => self.newline_tokens += 1,
            TokenKind::Illegal => self.illegal_tokens += 1,
            kind if kind.is_keyword() => self.keyword_tokens += 1,
            kind if kind.is_literal() => self.literal_tokens += 1,
            kind if kind.is_symbol() => self.symbol_tokens += 1,
            _ => {}
        }

        self.max_literal_length = self.max_literal_length.max(token.literal.len());
    }
}

/// Pull-based tokenizer over a borrowed command text
///
/// `next_token` keeps returning `EOF` once the input is exhausted. As an
/// iterator the tokenizer yields the single `EOF` token and then stops.
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: Position,
    metrics: LexicalMetrics,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: Position::start(),
            metrics: LexicalMetrics::default(),
            finished: false,
        }
    }

    /// Drain a text into a token vector ending with exactly one `EOF`
    pub fn tokenize_all(source: &'a str) -> Vec<Token> {
        Tokenizer::new(source).collect()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Produce the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let token = match self.peek_char(0) {
            None => Token::new(TokenKind::Eof, "", start),
            Some('\n') => {
                self.bump();
                Token::new(TokenKind::Newline, "\n", start)
            }
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(start)
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(start),
            Some(ch) if is_ident_start(ch) => self.read_identifier(start),
            Some(quote @ ('"' | '\'')) => self.read_string(start, quote),
            Some(ch) => {
                self.bump();
                match TokenKind::from_symbol(ch) {
                    Some(kind) => Token::new(kind, ch.to_string(), start),
                    None => {
                        log_error!(
                            codes::lexical::ILLEGAL_CHARACTER,
                            &format!("Illegal character '{}'", ch.escape_debug()),
                            span = Span::new(start, self.pos)
                        );
                        Token::new(TokenKind::Illegal, ch.to_string(), start)
                    }
                }
            }
        };

        self.metrics.record_token(&token);
        token
    }

    // ------------------------------------------------------------------
    // Character access
    // ------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.source[self.pos.offset..]
    }

    fn peek_char(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char(0)?;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek_char(0).is_some_and(&pred) {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        self.bump_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    fn slice_from(&self, start: Position) -> &'a str {
        &self.source[start.offset..self.pos.offset]
    }

    // ------------------------------------------------------------------
    // Token readers
    // ------------------------------------------------------------------

    fn read_identifier(&mut self, start: Position) -> Token {
        self.bump_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let text = self.slice_from(start);
        Token::new(lookup_ident(text), text, start)
    }

    fn read_number(&mut self, start: Position) -> Token {
        if self.peek_char(0) == Some('-') {
            self.bump();
        }
        self.bump_while(|c| c.is_ascii_digit());

        if self.peek_char(0) == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }

        let text = self.slice_from(start);
        let kind = if text.contains('.') {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, text, start)
    }

    /// Read a quoted string; the literal is the raw text between the quotes
    fn read_string(&mut self, start: Position, quote: char) -> Token {
        self.bump();
        let content_start = self.pos;

        loop {
            match self.peek_char(0) {
                None => {
                    self.metrics.unterminated_strings += 1;
                    log_error!(
                        codes::lexical::UNTERMINATED_STRING,
                        "Unterminated string literal",
                        span = Span::new(start, self.pos)
                    );
                    let text = self.slice_from(content_start);
                    return Token::new(TokenKind::String, text, start).with_end(self.pos);
                }
                Some(ch) if ch == quote => break,
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        let text = self.slice_from(content_start);
        self.bump();
        Token::new(TokenKind::String, text, start).with_end(self.pos)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
            log_debug!("Tokenizer reached end of input",
                "tokens" => self.metrics.total_tokens,
                "illegal" => self.metrics.illegal_tokens
            );
        }
        Some(token)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Tokenizer::tokenize_all(text)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_command() {
        let tokens = Tokenizer::tokenize_all("SET key value");
        let literals: Vec<_> = tokens.iter().map(|t| t.literal.as_str()).collect();
        assert_eq!(literals, vec!["SET", "key", "value", ""]);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = Tokenizer::tokenize_all("SET key value\nGET key");
        let positions: Vec<_> = tokens
            .iter()
            .map(|t| (t.offset(), t.line(), t.column()))
            .collect();
        assert_eq!(
            positions,
            vec![
                (0, 1, 1),
                (4, 1, 5),
                (8, 1, 9),
                (13, 1, 14),
                (14, 2, 1),
                (18, 2, 5),
                (21, 2, 8),
            ]
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds("* ? [ ] ( ) , : | + -"),
            vec![
                TokenKind::Asterisk,
                TokenKind::Question,
                TokenKind::BracketL,
                TokenKind::BracketR,
                TokenKind::ParenL,
                TokenKind::ParenR,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Pipe,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let cases = [
            ("123", TokenKind::Int, "123"),
            ("-456", TokenKind::Int, "-456"),
            ("3.14", TokenKind::Float, "3.14"),
            ("-2.5", TokenKind::Float, "-2.5"),
        ];
        for (input, kind, literal) in cases {
            let token = Tokenizer::new(input).next_token();
            assert_eq!(token.kind, kind, "{}", input);
            assert_eq!(token.literal, literal);
        }
    }

    #[test]
    fn test_dot_without_digit_ends_number() {
        let tokens = Tokenizer::tokenize_all("1.x");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].literal, "1");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_minus_without_digit_is_symbol() {
        assert_eq!(
            kinds("- x"),
            vec![TokenKind::Minus, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            kinds("ex Px nx XX withscores limit Count MATCH type"),
            vec![
                TokenKind::Ex,
                TokenKind::Px,
                TokenKind::Nx,
                TokenKind::Xx,
                TokenKind::Withscores,
                TokenKind::Limit,
                TokenKind::Count,
                TokenKind::Match,
                TokenKind::Type,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_allows_hyphen_and_digits() {
        let token = Tokenizer::new("my-key_2 rest").next_token();
        assert_eq!(token.kind, TokenKind::Ident);
        assert_eq!(token.literal, "my-key_2");
    }

    #[test]
    fn test_strings_keep_raw_escapes() {
        let tokens = Tokenizer::tokenize_all(r#""hello world" 'it\'s' "a\"b""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, "hello world");
        assert_eq!(tokens[1].literal, r"it\'s");
        assert_eq!(tokens[2].literal, r#"a\"b"#);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_string_span_covers_quotes() {
        let tokens = Tokenizer::tokenize_all("SET k \"ab\" x");
        let span = tokens[2].span();
        assert_eq!((span.start.column, span.end.column), (7, 11));
        assert_eq!((span.start.offset, span.end.offset), (6, 10));
        assert_eq!(tokens[3].position.column, 12);

        let open = Tokenizer::tokenize_all("GET 'ab");
        assert_eq!(open[1].span().end.offset, 7);
    }

    #[test]
    fn test_escaped_character_is_not_skipped_twice() {
        let tokens = Tokenizer::tokenize_all(r#""a\nb" c"#);
        assert_eq!(tokens[0].literal, r"a\nb");
        assert_eq!(tokens[1].literal, "c");
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let mut tokenizer = Tokenizer::new("SET k \"open");
        let tokens: Vec<_> = tokenizer.by_ref().collect();
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].literal, "open");
        assert_eq!(tokenizer.metrics().unterminated_strings, 1);
    }

    #[test]
    fn test_illegal_characters_do_not_stop_scanning() {
        let mut tokenizer = Tokenizer::new("GET @ key");
        let tokens: Vec<_> = tokenizer.by_ref().collect();
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "@");
        assert_eq!(tokens[2].literal, "key");
        assert_eq!(tokenizer.metrics().illegal_tokens, 1);
    }

    #[test]
    fn test_newline_and_carriage_return() {
        assert_eq!(
            kinds("GET a\r\nGET b"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Newline,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_eof_repeats_from_next_token() {
        let mut tokenizer = Tokenizer::new("");
        assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
        assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_metrics_classify_tokens() {
        let mut tokenizer = Tokenizer::new("SET k \"v\" EX 10\n");
        tokenizer.by_ref().for_each(drop);
        let metrics = tokenizer.metrics();
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.literal_tokens, 2);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.newline_tokens, 1);
        assert_eq!(metrics.total_tokens, 7);
    }

    #[test]
    fn test_error_codes() {
        let err = LexerError::InputTooLarge { size: 10, max: 5 };
        assert_eq!(err.error_code(), codes::lexical::INPUT_TOO_LARGE);
        assert_matches!(err.span(), None);
    }
}
