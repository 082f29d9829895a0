//! Lexer for the animation scene language.
//!
//! Converts source text into a lazy stream of [`Token`]s. Nothing is buffered:
//! each call to `next` scans exactly one token, and tokens borrow their text
//! from the source instead of copying it.

use tracing::trace;

use super::error::ScriptError;
use super::factory::TokenFactory;
use super::token::{Keyword, Token, TokenKind};

pub struct Lexer<'src> {
    factory: TokenFactory<'src>,
    source: &'src str,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            factory: TokenFactory::new(source),
            source,
            finished: false,
        }
    }

    fn scan_token(&mut self) -> Result<Token<'src>, ScriptError> {
        loop {
            let Some(ch) = self.factory.current_char() else {
                return Ok(self.factory.end_of_source());
            };

            match ch {
                '\n' => {
                    self.factory.new_line();
                    self.factory.advance();
                }
                ' ' | '\t' | '\r' => self.factory.advance(),
                '(' => return Ok(self.single_char(TokenKind::LeftParen)),
                ')' => return Ok(self.single_char(TokenKind::RightParen)),
                c if c.is_alphabetic() => {
                    self.factory.begin_token();
                    return Ok(self.lex_word());
                }
                c if c.is_ascii_digit() => {
                    self.factory.begin_token();
                    return Ok(self.lex_number());
                }
                '-' => {
                    self.factory.begin_token();
                    return self.lex_signed_number();
                }
                other => {
                    return Err(ScriptError::lex(
                        format!("Invalid character '{other}'"),
                        self.factory.position(),
                    ));
                }
            }
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token<'src> {
        self.factory.begin_token();
        self.factory.advance();
        self.factory.token(kind, 1)
    }

    fn lex_word(&mut self) -> Token<'src> {
        let start = self.factory.offset();
        while self
            .factory
            .current_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.factory.advance();
        }

        let len = self.factory.offset() - start;
        let kind = match Keyword::lookup(&self.source[start..start + len]) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };
        self.factory.token(kind, len)
    }

    fn lex_number(&mut self) -> Token<'src> {
        let start = self.factory.offset();
        while self
            .factory
            .current_char()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.factory.advance();
        }

        let len = self.factory.offset() - start;
        self.factory.token(TokenKind::Number, len)
    }

    fn lex_signed_number(&mut self) -> Result<Token<'src>, ScriptError> {
        self.factory.advance(); // consume '-'

        match self.factory.current_char() {
            Some(c) if c.is_ascii_digit() => {
                let number = self.lex_number();
                Ok(self.factory.signed(number))
            }
            Some(c) => Err(ScriptError::lex(
                format!("Invalid character '{c}'"),
                self.factory.position(),
            )),
            None => Err(ScriptError::lex(
                "Expected digit after '-'",
                self.factory.position(),
            )),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.scan_token();
        match &result {
            Ok(token) if token.is_end() => self.finished = true,
            Ok(token) => trace!(?token, "token"),
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}
