use std::fmt;

use crate::keyword::Keyword;

/// A byte range into the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The class of a token. The grammar matches on kinds only; the text lives in [`Token::lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// A reserved vocabulary word, eg. `Mouse`, `ContextMenu`, `SetColor`
    Keyword(Keyword),

    /// Path separator `:`
    Colon,
    /// Segment separator `>`
    RAngle,
    /// Opens a range or location, eg. `[0x100-0x200]`
    LBracket,
    /// Closes a range or location
    RBracket,
    /// Separates the bounds of a range
    Dash,

    /// A loaded program name in braces, eg. `{crackme.exe}`
    ProgramName,
    /// Free text naming a UI element, in parentheses, eg. `(File Name)`
    PluginElement,
    /// A hexadecimal address, eg. `0x401000`
    ProgramAddress,
    /// A decimal line number without leading zeros, eg. `42`
    LineNumber,
    /// A keyboard key, eg. `KEY_A`
    KeyCode,

    /// Any other word starting with a letter or `_`
    GenericSymbol,
    /// Any other word, eg. `007`
    GenericText,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(keyword) => write!(f, "{keyword}"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::RAngle => write!(f, "'>'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Dash => write!(f, "'-'"),
            TokenKind::ProgramName => write!(f, "program name"),
            TokenKind::PluginElement => write!(f, "plugin element"),
            TokenKind::ProgramAddress => write!(f, "program address"),
            TokenKind::LineNumber => write!(f, "line number"),
            TokenKind::KeyCode => write!(f, "key code"),
            TokenKind::GenericSymbol => write!(f, "symbol"),
            TokenKind::GenericText => write!(f, "text"),
        }
    }
}

/// A classified slice of the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// The keyword this token spells, if any.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme)
    }
}
