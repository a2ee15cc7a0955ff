use std::fmt;

/// A position in source text, tracking line and column for error reporting.
///
/// `start` and `end` are character offsets, not byte offsets, since the
/// lexer may be fed from a stream it never sees as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for Browsr documents.
///
/// Data-carrying variants embed their value directly (no separate `value` field on Token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of non-whitespace characters outside of a tag.
    Text(String),
    /// `<name`
    OpenStartTag(String),
    /// `</name`
    OpenEndTag(String),
    /// `>`
    CloseTag,
    /// An attribute name inside a tag.
    Identifier(String),
    /// `=`
    Equals,
    /// `"..."`, stored without the quotes.
    QuotedString(String),
    /// End of input
    Eof,
}

/// Payload-free discriminant of a [`TokenKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Text,
    OpenStartTag,
    OpenEndTag,
    CloseTag,
    Identifier,
    Equals,
    QuotedString,
    Eof,
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Text(_) => TokenType::Text,
            TokenKind::OpenStartTag(_) => TokenType::OpenStartTag,
            TokenKind::OpenEndTag(_) => TokenType::OpenEndTag,
            TokenKind::CloseTag => TokenType::CloseTag,
            TokenKind::Identifier(_) => TokenType::Identifier,
            TokenKind::Equals => TokenType::Equals,
            TokenKind::QuotedString(_) => TokenType::QuotedString,
            TokenKind::Eof => TokenType::Eof,
        }
    }

    /// The string payload; empty for `CloseTag`, `Equals` and `Eof`.
    pub fn value(&self) -> &str {
        match self {
            TokenKind::Text(s)
            | TokenKind::OpenStartTag(s)
            | TokenKind::OpenEndTag(s)
            | TokenKind::Identifier(s)
            | TokenKind::QuotedString(s) => s,
            TokenKind::CloseTag | TokenKind::Equals | TokenKind::Eof => "",
        }
    }
}

/// Renders the token the way it appears in a document, for diagnostics.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text(s) => write!(f, "text '{s}'"),
            TokenKind::OpenStartTag(s) => write!(f, "'<{s}'"),
            TokenKind::OpenEndTag(s) => write!(f, "'</{s}'"),
            TokenKind::CloseTag => f.write_str("'>'"),
            TokenKind::Identifier(s) => write!(f, "attribute '{s}'"),
            TokenKind::Equals => f.write_str("'='"),
            TokenKind::QuotedString(s) => write!(f, "\"{s}\""),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token produced by the Browsr lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
