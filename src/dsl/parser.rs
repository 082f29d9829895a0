//! Parser for the animation scene language.
//!
//! Recursive descent over a lazy token stream. Each top-level command is
//! parsed only when the caller asks for it, so a script can be consumed
//! command by command without tokenizing the rest. Loops are kept as
//! [`Command::Loop`] nodes; expanding them is the flattener's job.
//!
//! Every `visit_*` method for a parenthesized production expects its leading
//! `(` to be consumed already and consumes its own closing `)`. Loops are the
//! exception: `visit_command` closes them itself while walking the body.

use tracing::debug;

use super::ast::{Command, Direction};
use super::error::ScriptError;
use super::shape::{AnimationObject, Shape, Vec2};
use super::token::{Keyword, Position, Token, TokenKind};

pub struct Parser<I> {
    tokens: I,
    last_position: Position,
    finished: bool,
}

/// A loop whose body is still being read.
struct OpenLoop {
    count: i64,
    body: Vec<Command>,
}

/// Append a finished command to the innermost open loop, or hand it back
/// when no loop is open.
fn attach(open: &mut [OpenLoop], command: Command) -> Option<Command> {
    match open.last_mut() {
        Some(frame) => {
            frame.body.push(command);
            None
        }
        None => Some(command),
    }
}

impl<'src, I> Parser<I>
where
    I: Iterator<Item = Result<Token<'src>, ScriptError>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            last_position: Position::START,
            finished: false,
        }
    }

    /// Parse the next top-level command. `Ok(None)` at end of source.
    fn parse_next(&mut self) -> Result<Option<Command>, ScriptError> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::EndOfSource => Ok(None),
            TokenKind::LeftParen => self.visit_command().map(Some),
            _ => Err(ScriptError::syntax("Expected '('", &t)),
        }
    }

    /// One command, with its leading `(` already consumed.
    ///
    /// Loop bodies are collected on an explicit stack of open loops, so
    /// nesting depth is limited by memory rather than by the call stack.
    fn visit_command(&mut self) -> Result<Command, ScriptError> {
        let mut open: Vec<OpenLoop> = Vec::new();
        loop {
            let t = self.advance()?;
            if t.kind == TokenKind::Keyword(Keyword::Loop) {
                open.push(self.visit_loop_header()?);
            } else {
                let command = self.visit_atomic(&t)?;
                if let Some(command) = attach(&mut open, command) {
                    return Ok(command);
                }
            }

            // Inside a loop body: close every loop that ends here, stopping at
            // the `(` of the next command.
            loop {
                let t = self.advance()?;
                match t.kind {
                    TokenKind::LeftParen => break,
                    TokenKind::RightParen => {
                        self.expect(TokenKind::RightParen, "Expected ')'")?;
                        if let Some(frame) = open.pop() {
                            debug!(count = frame.count, commands = frame.body.len(), "parsed loop");
                            let command = Command::repeat(frame.count, frame.body);
                            if let Some(command) = attach(&mut open, command) {
                                return Ok(command);
                            }
                        }
                    }
                    _ => return Err(self.mismatch(&t, "Expected '(' or ')'")),
                }
            }
        }
    }

    fn visit_atomic(&mut self, t: &Token<'src>) -> Result<Command, ScriptError> {
        match t.kind {
            TokenKind::Keyword(Keyword::Define) => self.visit_define(),
            TokenKind::Keyword(Keyword::Place) => self.visit_place(),
            TokenKind::Keyword(Keyword::Shift) => self.visit_shift(),
            TokenKind::Keyword(Keyword::Erase) => self.visit_erase(),
            _ => Err(self.mismatch(t, "Expected command keyword")),
        }
    }

    /// `define <name> ( <shape>* ) )`
    fn visit_define(&mut self) -> Result<Command, ScriptError> {
        let name = self.visit_name()?;
        let object = self.visit_draw_list()?;
        self.expect(TokenKind::RightParen, "Expected ')'")?;
        Ok(Command::define(name, object))
    }

    /// `place <name> ( <x> <y> ) )`
    fn visit_place(&mut self) -> Result<Command, ScriptError> {
        let name = self.visit_name()?;
        let position = self.visit_vec2()?;
        self.expect(TokenKind::RightParen, "Expected ')'")?;
        Ok(Command::place(name, position))
    }

    /// `shift <name> <direction> )`
    fn visit_shift(&mut self) -> Result<Command, ScriptError> {
        let name = self.visit_name()?;
        let direction = self.visit_direction()?;
        self.expect(TokenKind::RightParen, "Expected ')'")?;
        Ok(Command::shift(name, direction))
    }

    /// `erase <name> )`
    fn visit_erase(&mut self) -> Result<Command, ScriptError> {
        let name = self.visit_name()?;
        self.expect(TokenKind::RightParen, "Expected ')'")?;
        Ok(Command::erase(name))
    }

    /// `loop <count> (`, leaving the body and both closing parens to `visit_command`.
    fn visit_loop_header(&mut self) -> Result<OpenLoop, ScriptError> {
        let t = self.expect(TokenKind::Number, "Expected loop count")?;
        let count: i64 = t
            .text()
            .parse()
            .map_err(|_| ScriptError::syntax("Expected integer loop count", &t))?;

        self.expect(TokenKind::LeftParen, "Expected '('")?;
        Ok(OpenLoop {
            count,
            body: Vec::new(),
        })
    }

    /// `( <shape>* )`, both parens consumed here.
    fn visit_draw_list(&mut self) -> Result<AnimationObject, ScriptError> {
        self.expect(TokenKind::LeftParen, "Expected '('")?;

        let mut object = AnimationObject::new();
        loop {
            let t = self.advance()?;
            match t.kind {
                TokenKind::RightParen => return Ok(object),
                TokenKind::LeftParen => object.add_shape(self.visit_shape()?),
                _ => return Err(self.mismatch(&t, "Expected '(' or ')'")),
            }
        }
    }

    fn visit_shape(&mut self) -> Result<Shape, ScriptError> {
        let t = self.advance()?;
        let shape = match t.kind {
            TokenKind::Keyword(Keyword::Circle) => Shape::Circle {
                center: self.visit_vec2()?,
                radius: self.visit_number()?,
            },
            TokenKind::Keyword(Keyword::Line) => Shape::Line {
                start: self.visit_vec2()?,
                end: self.visit_vec2()?,
            },
            _ => return Err(self.mismatch(&t, "Expected shape keyword")),
        };
        self.expect(TokenKind::RightParen, "Expected ')'")?;
        Ok(shape)
    }

    /// `( <x> <y> )`, both parens consumed here.
    fn visit_vec2(&mut self) -> Result<Vec2, ScriptError> {
        self.expect(TokenKind::LeftParen, "Expected '('")?;
        let x = self.visit_number()?;
        let y = self.visit_number()?;
        self.expect(TokenKind::RightParen, "Expected ')'")?;
        Ok(Vec2::new(x, y))
    }

    fn visit_number(&mut self) -> Result<f32, ScriptError> {
        let t = self.expect(TokenKind::Number, "Expected number")?;
        t.text()
            .parse()
            .map_err(|_| ScriptError::syntax("Invalid number", &t))
    }

    fn visit_direction(&mut self) -> Result<Direction, ScriptError> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::Keyword(Keyword::Left) => Ok(Direction::Left),
            TokenKind::Keyword(Keyword::Right) => Ok(Direction::Right),
            TokenKind::Keyword(Keyword::Up) => Ok(Direction::Up),
            TokenKind::Keyword(Keyword::Down) => Ok(Direction::Down),
            _ => Err(self.mismatch(&t, "Expected direction")),
        }
    }

    fn visit_name(&mut self) -> Result<String, ScriptError> {
        let t = self.expect(TokenKind::Identifier, "Expected identifier")?;
        let name = t.text();
        if name.is_empty() {
            return Err(ScriptError::syntax("Object name can not be empty", &t));
        }
        Ok(name.to_string())
    }

    // --- Utility methods ---

    /// Pull the next token. Running out of tokens is an unexpected end.
    fn advance(&mut self) -> Result<Token<'src>, ScriptError> {
        match self.tokens.next() {
            Some(Ok(t)) => {
                self.last_position = t.position;
                Ok(t)
            }
            Some(Err(e)) => Err(e),
            None => Err(ScriptError::unexpected_end(
                "Expected token",
                self.last_position,
            )),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'src>, ScriptError> {
        let t = self.advance()?;
        if t.kind == kind {
            Ok(t)
        } else {
            Err(self.mismatch(&t, expected))
        }
    }

    fn mismatch(&self, t: &Token<'_>, expected: &str) -> ScriptError {
        if t.is_end() {
            ScriptError::unexpected_end(expected, t.position)
        } else {
            ScriptError::syntax(expected, t)
        }
    }
}

impl<'src, I> Iterator for Parser<I>
where
    I: Iterator<Item = Result<Token<'src>, ScriptError>>,
{
    type Item = Result<Command, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.parse_next() {
            Ok(Some(command)) => Some(Ok(command)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
