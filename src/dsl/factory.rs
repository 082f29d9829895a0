//! Token factory: owns the scan cursor and stamps tokens with span and position.

use super::token::{Position, Span, Token, TokenKind};

pub struct TokenFactory<'src> {
    source: &'src str,
    offset: usize,
    position: Position,
    start: Option<Position>,
}

impl<'src> TokenFactory<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::START,
            start: None,
        }
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Position of the character under the cursor.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_char(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    /// Step over the current character.
    pub fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.offset += ch.len_utf8();
            self.position.column += 1;
        }
    }

    /// Called on `'\n'` before stepping over it, so the next character
    /// lands on column 1.
    pub fn new_line(&mut self) {
        self.position.line += 1;
        self.position.column = 0;
    }

    /// Remember where the next token starts.
    pub fn begin_token(&mut self) {
        self.start = Some(self.position);
    }

    /// Build a token of `len` bytes ending at the cursor.
    pub fn token(&mut self, kind: TokenKind, len: usize) -> Token<'src> {
        let position = self.start.take().unwrap_or(self.position);
        let span = Span {
            offset: self.offset - len,
            len,
        };
        Token::new(kind, span, position, self.source)
    }

    pub fn end_of_source(&mut self) -> Token<'src> {
        self.begin_token();
        self.token(TokenKind::EndOfSource, 0)
    }

    /// Widen a number token one byte to the left to cover its `-` sign.
    pub fn signed(&self, token: Token<'src>) -> Token<'src> {
        let span = Span {
            offset: token.span.offset - 1,
            len: token.span.len + 1,
        };
        Token::new(token.kind, span, token.position, self.source)
    }
}
