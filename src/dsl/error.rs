//! Error types for the tokenizer and parser.

use std::fmt;

use super::token::{Position, Token};

/// An error raised while tokenizing or parsing a script.
///
/// Every error is fatal for the stream that produced it: the lexer or parser
/// yields it once and then ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
    /// Text of the offending token, `None` when input ran out.
    pub found: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    SyntaxError,
    UnexpectedEnd,
}

impl ScriptError {
    pub fn lex(message: impl Into<String>, position: Position) -> Self {
        Self {
            kind: ErrorKind::LexError,
            message: message.into(),
            position,
            found: None,
        }
    }

    pub fn syntax(message: impl Into<String>, token: &Token<'_>) -> Self {
        Self {
            kind: ErrorKind::SyntaxError,
            message: message.into(),
            position: token.position,
            found: Some(token.text().to_string()),
        }
    }

    pub fn unexpected_end(expected: &str, position: Position) -> Self {
        Self {
            kind: ErrorKind::UnexpectedEnd,
            message: format!("Unexpected end of input, {expected}"),
            position,
            found: None,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} at line {}, column {}",
            self.kind, self.message, self.position.line, self.position.column
        )?;
        match (&self.kind, &self.found) {
            (ErrorKind::LexError, _) => Ok(()),
            (_, Some(text)) => write!(f, ", found '{text}'"),
            (_, None) => write!(f, ", found none"),
        }
    }
}

impl std::error::Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::token::{Span, TokenKind};

    #[test]
    fn lex_error_display() {
        let err = ScriptError::lex("Invalid character '*'", Position::new(3, 7));
        assert_eq!(
            err.to_string(),
            "LexError: Invalid character '*' at line 3, column 7"
        );
    }

    #[test]
    fn syntax_error_carries_token_text() {
        let source = "(erase 42)";
        let token = Token::new(
            TokenKind::Number,
            Span { offset: 7, len: 2 },
            Position::new(1, 8),
            source,
        );
        let err = ScriptError::syntax("Expected identifier", &token);
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert_eq!(err.found.as_deref(), Some("42"));
        assert_eq!(
            err.to_string(),
            "SyntaxError: Expected identifier at line 1, column 8, found '42'"
        );
    }

    #[test]
    fn unexpected_end_reports_none() {
        let err = ScriptError::unexpected_end("Expected ')'", Position::new(2, 1));
        assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
        assert!(err.to_string().ends_with("found none"));
    }
}
