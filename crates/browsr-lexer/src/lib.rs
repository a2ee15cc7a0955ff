//! Browsr Lexer
//!
//! Tokenizes Browsr documents, the small HTML dialect made of text,
//! hyperlinks, tables and forms. The lexer is pull-based: it reads one
//! character at a time from a [`CharSource`] and produces one token per
//! call to [`Lexer::advance`].
//!
//! # Example
//!
//! ```
//! use browsr_lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::tokenize("").unwrap();
//! assert_eq!(tokens.len(), 1); // Just EOF
//! assert_eq!(tokens[0].kind, TokenKind::Eof);
//! ```

pub mod lexer;
pub mod source;
pub mod token;

pub use lexer::Lexer;
pub use source::{CharSource, ReaderSource, TextSource};
pub use token::{Span, Token, TokenKind, TokenType};

/// Lexer error.
#[derive(Debug, thiserror::Error)]
pub enum LexerError {
    /// Malformed token, with position information.
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// The character source failed or yielded invalid UTF-8.
    #[error("I/O error while reading document: {0}")]
    Io(#[from] std::io::Error),
}
