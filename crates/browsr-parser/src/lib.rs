//! Browsr Parser
//!
//! Turns Browsr documents into a [`ContentSpan`] tree, or just checks them.
//! Both run the same recursive-descent parser; validation drives it with a
//! builder that constructs nothing.
//!
//! ```
//! let doc = browsr_parser::parse("<a href=\"x.html\">label</a>").unwrap();
//! let link = doc.as_hyperlink().unwrap();
//! assert_eq!(link.href(), "x.html");
//! assert_eq!(link.text_span().text(), "label");
//!
//! assert!(browsr_parser::validate("<table></table>").is_ok());
//! assert!(browsr_parser::validate("<div></div>").is_err());
//! ```

pub mod ast;
pub mod builder;
pub mod parser;

pub use ast::{
    ContentSpan, Form, HyperLink, SubmitButton, Table, TableCell, TableRow, TextInputField,
    TextSpan,
};
pub use builder::{SpanBuilder, TreeBuilder, Validator};
pub use parser::{Dialect, ParseOptions, Parser, MAX_NESTING};

use browsr_lexer::{CharSource, Lexer, LexerError};
use std::io::BufRead;

/// Parser error.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The character stream could not be tokenized.
    #[error(transparent)]
    Lexical(#[from] LexerError),

    /// The token stream matches no production.
    #[error("Parse error at line {line}, column {column}: {message}")]
    Grammar {
        message: String,
        line: usize,
        column: usize,
    },

    /// Grammatical, but breaks a document-wide rule such as the single form.
    #[error("Semantic error at line {line}, column {column}: {message}")]
    Semantic {
        message: String,
        line: usize,
        column: usize,
    },
}

/// Build the content-span tree of a document held in memory.
pub fn parse(text: &str) -> Result<ContentSpan, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<ContentSpan, ParseError> {
    run(Lexer::for_text(text), TreeBuilder::new(), options)
}

/// Build the content-span tree of a UTF-8 byte stream.
///
/// The stream is read on demand, one character at a time, and the parser
/// adds no buffering of its own: on failure the reader sits just past the
/// lookahead character. Pass `&mut reader` to keep ownership; wrap raw
/// sources such as files in a `BufReader`.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ContentSpan, ParseError> {
    run(
        Lexer::for_reader(reader),
        TreeBuilder::new(),
        ParseOptions::default(),
    )
}

/// Check a document against the grammar without building a tree.
pub fn validate(text: &str) -> Result<(), ParseError> {
    validate_with_options(text, ParseOptions::default())
}

pub fn validate_with_options(text: &str, options: ParseOptions) -> Result<(), ParseError> {
    run(Lexer::for_text(text), Validator, options)
}

/// Check a UTF-8 byte stream against the grammar without building a tree.
pub fn validate_reader<R: BufRead>(reader: R) -> Result<(), ParseError> {
    run(
        Lexer::for_reader(reader),
        Validator,
        ParseOptions::default(),
    )
}

fn run<S: CharSource, B: SpanBuilder>(
    lexer: Result<Lexer<S>, LexerError>,
    builder: B,
    options: ParseOptions,
) -> Result<B::Span, ParseError> {
    log::debug!(
        "parsing document ({:?} dialect, builder {})",
        options.dialect,
        std::any::type_name::<B>()
    );
    let result = lexer
        .map_err(ParseError::from)
        .and_then(|lexer| Parser::new(lexer, builder, options).parse_document());
    match &result {
        Ok(_) => log::debug!("document accepted"),
        Err(e) => log::debug!("document rejected: {e}"),
    }
    result
}
