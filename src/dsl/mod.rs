//! Scene language front end: source text to tokens to commands to atomic commands.
//!
//! Every stage is a lazy iterator over `Result`s and stops after its first
//! error, so a script is only read as far as the consumer pulls.

pub mod ast;
pub mod error;
pub mod factory;
pub mod flatten;
pub mod lexer;
pub mod parser;
pub mod shape;
pub mod token;

pub use ast::{AtomicCommand, Command, Direction, LoopBody};
pub use error::{ErrorKind, ScriptError};
pub use flatten::{Flatten, FlattenExt};
pub use lexer::Lexer;
pub use parser::Parser;
pub use shape::{AnimationObject, Shape, ShapeKind, Vec2};
pub use token::{Keyword, Position, Span, Token, TokenKind};

/// Atomic command stream for a whole script.
pub type Commands<'src> = Flatten<Parser<Lexer<'src>>>;

/// Lazily tokenize `source`.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Parse a token stream into top-level commands.
pub fn parse<'src, I>(tokens: I) -> Parser<I>
where
    I: Iterator<Item = Result<Token<'src>, ScriptError>>,
{
    Parser::new(tokens)
}

/// Expand loops in a command stream.
pub fn flatten<I, E>(commands: I) -> Flatten<I>
where
    I: Iterator<Item = Result<Command, E>>,
{
    Flatten::new(commands)
}

/// The full pipeline: atomic commands of `source`, in execution order.
pub fn commands(source: &str) -> Commands<'_> {
    flatten(parse(tokenize(source)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_expands_loops() {
        let source = "(define a ((circle (0 0) 1))) (loop 2 ((shift a up)))";
        let out: Vec<AtomicCommand> = commands(source).collect::<Result<_, _>>().unwrap();
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], AtomicCommand::Define { .. }));
        assert!(out[1..]
            .iter()
            .all(|c| matches!(c, AtomicCommand::Shift { direction: Direction::Up, .. })));
    }

    #[test]
    fn pipeline_surfaces_lex_errors() {
        let err = commands("(erase a) *")
            .find_map(Result::err)
            .unwrap();
        assert_eq!(err.kind, ErrorKind::LexError);
        assert_eq!(err.position, Position::new(1, 11));
    }
}
