//! Tokens and source spans.

use crate::intern::Name;

/// Byte range into the source line, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both operands.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// What the lexer recognizes: words (bare or quoted), list punctuation,
/// and end of input. Whether a bareword is a symbol or a file path is not
/// decided here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An unquoted word; classified downstream by the analyzer.
    Bareword(Name),
    /// A `"`-quoted word; always a file literal.
    Quoted(Name),
    LBracket,
    RBracket,
    Comma,
    Eof,
}

impl TokenKind {
    /// Short phrase for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Bareword(_) => "a word",
            TokenKind::Quoted(_) => "a quoted string",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
        }
    }

    /// True for tokens that can begin an atom.
    pub fn starts_atom(self) -> bool {
        matches!(
            self,
            TokenKind::Bareword(_) | TokenKind::Quoted(_) | TokenKind::LBracket
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
