//! Token types for the animation scene lexer.

use std::fmt;
use std::ops::Range;

/// A line/column pair, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte range of a token inside the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Reserved words. The set is closed; anything else lexes as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Commands
    Define,
    Place,
    Shift,
    Erase,
    Loop,

    // Shapes
    Line,
    Circle,

    // Directions
    Left,
    Right,
    Up,
    Down,
}

impl Keyword {
    pub fn lookup(word: &str) -> Option<Keyword> {
        let keyword = match word {
            "define" => Keyword::Define,
            "place" => Keyword::Place,
            "shift" => Keyword::Shift,
            "erase" => Keyword::Erase,
            "loop" => Keyword::Loop,
            "line" => Keyword::Line,
            "circle" => Keyword::Circle,
            "left" => Keyword::Left,
            "right" => Keyword::Right,
            "up" => Keyword::Up,
            "down" => Keyword::Down,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Define => "define",
            Keyword::Place => "place",
            Keyword::Shift => "shift",
            Keyword::Erase => "erase",
            Keyword::Loop => "loop",
            Keyword::Line => "line",
            Keyword::Circle => "circle",
            Keyword::Left => "left",
            Keyword::Right => "right",
            Keyword::Up => "up",
            Keyword::Down => "down",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Keyword(Keyword),
    Identifier,
    Number,
    EndOfSource,
}

/// A token produced by the lexer.
///
/// The token only records where its text lives; [`Token::text`] slices the
/// borrowed source when the text is actually needed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub position: Position,
    source: &'src str,
}

impl<'src> Token<'src> {
    pub(crate) fn new(kind: TokenKind, span: Span, position: Position, source: &'src str) -> Self {
        Self {
            kind,
            span,
            position,
            source,
        }
    }

    /// The source text this token covers. Empty for `EndOfSource`.
    pub fn text(&self) -> &'src str {
        self.source.get(self.span.range()).unwrap_or_default()
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfSource
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("text", &self.text())
            .field("position", &self.position)
            .finish()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfSource => write!(f, "end of source at {}", self.position),
            TokenKind::Keyword(_) => write!(f, "keyword '{}' at {}", self.text(), self.position),
            TokenKind::Identifier => {
                write!(f, "identifier '{}' at {}", self.text(), self.position)
            }
            TokenKind::Number => write!(f, "number '{}' at {}", self.text(), self.position),
            TokenKind::LeftParen | TokenKind::RightParen => {
                write!(f, "'{}' at {}", self.text(), self.position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_round_trips() {
        for word in [
            "define", "place", "shift", "erase", "loop", "line", "circle", "left", "right", "up",
            "down",
        ] {
            let keyword = Keyword::lookup(word).unwrap();
            assert_eq!(keyword.as_str(), word);
        }
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(Keyword::lookup("Define"), None);
        assert_eq!(Keyword::lookup("LOOP"), None);
        assert_eq!(Keyword::lookup("cross"), None);
    }

    #[test]
    fn text_is_sliced_from_source() {
        let source = "(place box (1 2))";
        let token = Token::new(
            TokenKind::Identifier,
            Span { offset: 7, len: 3 },
            Position::new(1, 8),
            source,
        );
        assert_eq!(token.text(), "box");
        assert_eq!(token.to_string(), "identifier 'box' at 1:8");
    }

    #[test]
    fn end_of_source_has_empty_text() {
        let source = "()";
        let token = Token::new(
            TokenKind::EndOfSource,
            Span { offset: 2, len: 0 },
            Position::new(1, 3),
            source,
        );
        assert!(token.is_end());
        assert_eq!(token.text(), "");
    }
}
