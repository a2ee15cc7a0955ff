//! Document parser for Browsr documents.
//!
//! Pulls tokens from `browsr-lexer` one at a time and checks them against
//! the Browsr grammar:
//!
//! ```text
//! document     := content-span EOF
//! content-span := TEXT+
//!               | <a href="URL"> TEXT+ </a>
//!               | <table> row* </table>
//!               | <form action="URL"> content-span </form>
//!               | <input type="text" name="NAME">
//!               | <input type="submit">
//! row          := <tr> cell*
//! cell         := <td> content-span
//! ```
//!
//! Uses recursive descent, one method per non-terminal. What each rule
//! produces is up to the [`SpanBuilder`] the parser is driven with.

use crate::builder::{BuildRejection, SpanBuilder};
use crate::ParseError;
use browsr_lexer::{CharSource, Lexer, Span, TokenKind};

/// Default cap on nested content spans (tables, forms) in one document.
pub const MAX_NESTING: usize = 256;

/// Tag names of the Browsr dialect, for wording diagnostics.
const BROWSR_TAGS: &[&str] = &["a", "table", "tr", "td", "form", "input"];

fn is_browsr_tag(tag: &str) -> bool {
    BROWSR_TAGS.contains(&tag)
}

/// Grammar accepted by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Text, hyperlinks, tables, forms and inputs.
    #[default]
    Full,
    /// The older grammar without `form` and `input`.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub dialect: Dialect,
    /// Deepest allowed nesting of content spans; deeper documents are
    /// rejected instead of exhausting the stack.
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            max_nesting: MAX_NESTING,
        }
    }
}

impl ParseOptions {
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }
}

/// Browsr document parser.
///
/// Single-use: owns its lexer and builder for the duration of one
/// document, and fails on the first token that does not fit the grammar.
pub struct Parser<S, B> {
    lexer: Lexer<S>,
    builder: B,
    options: ParseOptions,
    depth: usize,
    form_depth: usize,
}

impl<S: CharSource, B: SpanBuilder> Parser<S, B> {
    /// Create a parser over a primed lexer.
    pub fn new(lexer: Lexer<S>, builder: B, options: ParseOptions) -> Self {
        Self {
            lexer,
            builder,
            options,
            depth: 0,
            form_depth: 0,
        }
    }

    /// Parse a full document: one content span followed by end of input.
    pub fn parse_document(mut self) -> Result<B::Span, ParseError> {
        let span = self.parse_content_span()?;
        if self.lexer.token().kind != TokenKind::Eof {
            return Err(self.unexpected("end of input"));
        }
        Ok(span)
    }

    // =========================================================================
    // Content spans
    // =========================================================================

    fn parse_content_span(&mut self) -> Result<B::Span, ParseError> {
        if self.depth >= self.options.max_nesting {
            return Err(self.error(format!(
                "nesting too deep (more than {} levels)",
                self.options.max_nesting
            )));
        }
        self.depth += 1;
        let span = self.parse_content_span_inner();
        self.depth -= 1;
        span
    }

    fn parse_content_span_inner(&mut self) -> Result<B::Span, ParseError> {
        match &self.lexer.token().kind {
            TokenKind::Text(_) => {
                let text = self.parse_text_run()?;
                Ok(self.builder.text(text))
            }
            TokenKind::OpenStartTag(name) => match name.as_str() {
                "a" => self.parse_hyperlink(),
                "table" => self.parse_table(),
                "form" if self.options.dialect == Dialect::Full => self.parse_form(),
                "input" if self.options.dialect == Dialect::Full => self.parse_input(),
                _ => Err(self.unexpected(self.content_expectation())),
            },
            _ => Err(self.unexpected(self.content_expectation())),
        }
    }

    /// Consecutive text tokens, joined with single spaces.
    fn parse_text_run(&mut self) -> Result<String, ParseError> {
        let mut words = Vec::new();
        while let TokenKind::Text(word) = &self.lexer.token().kind {
            words.push(word.clone());
            self.lexer.advance()?;
        }
        if words.is_empty() {
            return Err(self.unexpected("text"));
        }
        Ok(words.join(" "))
    }

    /// Parse `<a href="URL"> TEXT+ </a>`.
    fn parse_hyperlink(&mut self) -> Result<B::Span, ParseError> {
        self.lexer.advance()?; // consume `<a`
        let href = self.expect_attribute("href")?;
        self.expect_close_tag()?;
        let text = self.parse_text_run()?;
        self.expect_end_tag("a")?;
        Ok(self.builder.hyperlink(href, text))
    }

    /// Parse `<table> row* </table>` where `row := <tr> cell*` and
    /// `cell := <td> content-span`. Rows and cells have no end tags.
    fn parse_table(&mut self) -> Result<B::Span, ParseError> {
        self.lexer.advance()?; // consume `<table`
        self.expect_close_tag()?;

        let mut rows = Vec::new();
        while self.at_start_tag("tr") {
            self.lexer.advance()?;
            self.expect_close_tag()?;

            let mut cells = Vec::new();
            while self.at_start_tag("td") {
                self.lexer.advance()?;
                self.expect_close_tag()?;
                cells.push(self.parse_content_span()?);
            }
            rows.push(cells);
        }

        self.expect_end_tag("table")?;
        Ok(self.builder.table(rows))
    }

    /// Parse `<form action="URL"> content-span </form>`.
    fn parse_form(&mut self) -> Result<B::Span, ParseError> {
        let at = self.lexer.token().span;
        self.builder
            .enter_form()
            .map_err(|rejection| semantic(rejection, at))?;
        self.lexer.advance()?; // consume `<form`

        let action = self.expect_attribute("action")?;
        self.expect_close_tag()?;

        self.form_depth += 1;
        let content = self.parse_content_span()?;
        self.form_depth -= 1;

        self.expect_end_tag("form")?;
        Ok(self.builder.form(action, content))
    }

    /// Parse `<input type="text" name="NAME">` or `<input type="submit">`.
    fn parse_input(&mut self) -> Result<B::Span, ParseError> {
        if self.form_depth == 0 {
            return Err(self.error("<input> is only allowed inside a form".into()));
        }
        self.lexer.advance()?; // consume `<input`

        let at = self.lexer.token().span;
        let kind = self.expect_attribute("type")?;
        match kind.as_str() {
            "text" => {
                let name = self.expect_attribute("name")?;
                self.expect_close_tag()?;
                Ok(self.builder.text_input(name))
            }
            "submit" => {
                self.expect_close_tag()?;
                Ok(self.builder.submit_button())
            }
            other => Err(ParseError::Grammar {
                message: format!(
                    "not a valid Browsr document: unsupported input type \"{other}\" \
                     (expected \"text\" or \"submit\")"
                ),
                line: at.line,
                column: at.column,
            }),
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn at_start_tag(&self, name: &str) -> bool {
        matches!(&self.lexer.token().kind, TokenKind::OpenStartTag(tag) if tag == name)
    }

    /// Expect `name = "value"` and return the value.
    fn expect_attribute(&mut self, name: &str) -> Result<String, ParseError> {
        match &self.lexer.token().kind {
            TokenKind::Identifier(ident) if ident == name => self.lexer.advance()?,
            _ => return Err(self.unexpected(&format!("attribute '{name}'"))),
        }

        if self.lexer.token().kind != TokenKind::Equals {
            return Err(self.unexpected(&format!("'=' after attribute '{name}'")));
        }
        self.lexer.advance()?;

        if let TokenKind::QuotedString(value) = &self.lexer.token().kind {
            let value = value.clone();
            self.lexer.advance()?;
            Ok(value)
        } else {
            Err(self.unexpected(&format!("quoted value for attribute '{name}'")))
        }
    }

    fn expect_close_tag(&mut self) -> Result<(), ParseError> {
        if self.lexer.token().kind != TokenKind::CloseTag {
            return Err(self.unexpected("'>'"));
        }
        self.lexer.advance()?;
        Ok(())
    }

    /// Expect `</name>`.
    fn expect_end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        match &self.lexer.token().kind {
            TokenKind::OpenEndTag(tag) if tag == name => self.lexer.advance()?,
            _ => return Err(self.unexpected(&format!("'</{name}'"))),
        }
        self.expect_close_tag()
    }

    fn content_expectation(&self) -> &'static str {
        match self.options.dialect {
            Dialect::Full => "text, '<a', '<table', '<form' or '<input'",
            Dialect::Legacy => "text, '<a' or '<table'",
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = match &self.lexer.token().kind {
            TokenKind::OpenStartTag(tag) | TokenKind::OpenEndTag(tag) if !is_browsr_tag(tag) => {
                format!("unknown tag {}", self.lexer.token().kind)
            }
            kind => kind.to_string(),
        };
        self.error(format!("expected {expected}, found {found}"))
    }

    fn error(&self, detail: String) -> ParseError {
        let span = self.lexer.token().span;
        ParseError::Grammar {
            message: format!("not a valid Browsr document: {detail}"),
            line: span.line,
            column: span.column,
        }
    }
}

fn semantic(rejection: BuildRejection, at: Span) -> ParseError {
    ParseError::Semantic {
        message: rejection.message,
        line: at.line,
        column: at.column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::builder::{TreeBuilder, Validator};
    use pretty_assertions::assert_eq;

    fn try_parse(source: &str) -> Result<ContentSpan, ParseError> {
        let lexer = Lexer::for_text(source)?;
        Parser::new(lexer, TreeBuilder::new(), ParseOptions::default()).parse_document()
    }

    fn parse(source: &str) -> ContentSpan {
        try_parse(source).unwrap()
    }

    fn try_validate(source: &str, dialect: Dialect) -> Result<(), ParseError> {
        let lexer = Lexer::for_text(source)?;
        Parser::new(lexer, Validator, ParseOptions::with_dialect(dialect)).parse_document()
    }

    fn grammar_message(result: Result<ContentSpan, ParseError>) -> String {
        match result {
            Err(ParseError::Grammar { message, .. }) => message,
            other => panic!("Expected grammar error, got {other:?}"),
        }
    }

    fn text(s: &str) -> ContentSpan {
        ContentSpan::Text(TextSpan::new(s))
    }

    // =========================================================================
    // Text
    // =========================================================================

    #[test]
    fn test_single_word() {
        assert_eq!(parse("Hello"), text("Hello"));
    }

    #[test]
    fn test_text_whitespace_collapsed() {
        assert_eq!(parse("  Some\n  text \t here "), text("Some text here"));
    }

    #[test]
    fn test_empty_document_rejected() {
        let message = grammar_message(try_parse(""));
        assert!(message.contains("found end of input"), "{message}");
    }

    // =========================================================================
    // Hyperlinks
    // =========================================================================

    #[test]
    fn test_hyperlink() {
        assert_eq!(
            parse("<a href=\"x.html\">label</a>"),
            ContentSpan::HyperLink(HyperLink::new("x.html", TextSpan::new("label")))
        );
    }

    #[test]
    fn test_hyperlink_multi_word_label() {
        let doc = parse("<a href=\"x.html\">\n  click   here\n</a>");
        assert_eq!(doc.as_hyperlink().unwrap().text_span().text(), "click here");
    }

    #[test]
    fn test_hyperlink_requires_label() {
        let message = grammar_message(try_parse("<a href=\"x.html\"></a>"));
        assert!(message.contains("expected text"), "{message}");
    }

    #[test]
    fn test_hyperlink_requires_href() {
        let message = grammar_message(try_parse("<a name=\"x\">label</a>"));
        assert!(message.contains("attribute 'href'"), "{message}");
    }

    #[test]
    fn test_hyperlink_unquoted_href_rejected() {
        let message = grammar_message(try_parse("<a href=x.html>label</a>"));
        assert!(message.contains("quoted value"), "{message}");
    }

    #[test]
    fn test_hyperlink_wrong_end_tag() {
        let message = grammar_message(try_parse("<a href=\"x\">label</td>"));
        assert!(message.contains("expected '</a'"), "{message}");
    }

    #[test]
    fn test_tag_names_are_case_sensitive() {
        assert!(try_parse("<A href=\"x\">label</A>").is_err());
    }

    // =========================================================================
    // Tables
    // =========================================================================

    #[test]
    fn test_empty_table() {
        assert_eq!(parse("<table></table>"), ContentSpan::Table(Table::new(vec![])));
    }

    #[test]
    fn test_table_rows_and_cells() {
        let doc = parse("<table><tr><td>a b<td>c<tr><tr><td>d</table>");
        let table = doc.as_table().unwrap();
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[0].cells().len(), 2);
        assert_eq!(table.rows()[0].cells()[0].content(), &text("a b"));
        assert_eq!(table.rows()[0].cells()[1].content(), &text("c"));
        assert!(table.rows()[1].cells().is_empty());
        assert_eq!(table.rows()[2].cells()[0].content(), &text("d"));
    }

    #[test]
    fn test_cell_requires_content() {
        let message = grammar_message(try_parse("<table><tr><td></table>"));
        assert!(message.contains("found '</table'"), "{message}");
    }

    #[test]
    fn test_cell_outside_row_rejected() {
        assert!(try_parse("<table><td>x</table>").is_err());
    }

    #[test]
    fn test_unknown_tag_reported() {
        let message = grammar_message(try_parse("<table><tr><td><div>x</div></table>"));
        assert!(message.contains("unknown tag '<div'"), "{message}");
    }

    #[test]
    fn test_trailing_content_rejected() {
        let message = grammar_message(try_parse("<table></table> trailing"));
        assert!(message.contains("expected end of input"), "{message}");
    }

    // =========================================================================
    // Forms and inputs
    // =========================================================================

    #[test]
    fn test_form_with_inputs() {
        let doc = parse(
            "<form action=\"search\"><table>\
             <tr><td>Query<td><input type=\"text\" name=\"q\">\
             <tr><td><input type=\"submit\">\
             </table></form>",
        );
        let form = doc.as_form().unwrap();
        assert_eq!(form.action(), "search");
        let table = form.content().as_table().unwrap();
        assert_eq!(
            table.rows()[0].cells()[1].content(),
            &ContentSpan::TextInputField(TextInputField::new("q"))
        );
        assert_eq!(
            table.rows()[1].cells()[0].content(),
            &ContentSpan::SubmitButton(SubmitButton)
        );
    }

    #[test]
    fn test_unknown_input_type() {
        let result = try_parse("<form action=\"x\"><input type=\"color\"></form>");
        let message = grammar_message(result);
        assert!(message.contains("unsupported input type \"color\""), "{message}");
    }

    #[test]
    fn test_input_outside_form_rejected() {
        let message = grammar_message(try_parse("<input type=\"submit\">"));
        assert!(message.contains("only allowed inside a form"), "{message}");
    }

    #[test]
    fn test_input_after_form_rejected() {
        let result = try_parse(
            "<table><tr><td><form action=\"x\">hi</form><td><input type=\"submit\"></table>",
        );
        assert!(matches!(result, Err(ParseError::Grammar { .. })));
    }

    #[test]
    fn test_nested_form_is_semantic_error() {
        let result =
            try_parse("<form action=\"a\"><form action=\"b\">x</form></form>");
        match result {
            Err(ParseError::Semantic {
                message,
                line,
                column,
            }) => {
                assert!(message.contains("nested Form detected"));
                assert_eq!((line, column), (1, 18));
            }
            other => panic!("Expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_sibling_forms_are_semantic_error() {
        let result = try_parse(
            "<table><tr><td><form action=\"a\">x</form><td><form action=\"b\">y</form></table>",
        );
        assert!(matches!(result, Err(ParseError::Semantic { .. })));
    }

    // =========================================================================
    // Validation and dialects
    // =========================================================================

    #[test]
    fn test_validator_accepts_sibling_forms() {
        let doc =
            "<table><tr><td><form action=\"a\">x</form><td><form action=\"b\">y</form></table>";
        assert!(try_validate(doc, Dialect::Full).is_ok());
    }

    #[test]
    fn test_validator_rejects_what_builder_rejects() {
        for doc in [
            "",
            "<a href=\"x\"></a>",
            "<table><tr><td></table>",
            "<form action=\"x\"><input type=\"color\"></form>",
            "<input type=\"text\" name=\"q\">",
        ] {
            assert!(try_validate(doc, Dialect::Full).is_err(), "{doc}");
            assert!(try_parse(doc).is_err(), "{doc}");
        }
    }

    #[test]
    fn test_legacy_dialect_rejects_forms() {
        let doc = "<form action=\"x\"><input type=\"submit\"></form>";
        assert!(try_validate(doc, Dialect::Full).is_ok());
        match try_validate(doc, Dialect::Legacy) {
            Err(ParseError::Grammar { message, .. }) => {
                assert!(message.contains("expected text, '<a' or '<table'"), "{message}");
            }
            other => panic!("Expected grammar error, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_dialect_accepts_tables_and_links() {
        let doc = "<table><tr><td><a href=\"x\">x</a><td>plain text</table>";
        assert!(try_validate(doc, Dialect::Legacy).is_ok());
    }

    // =========================================================================
    // Nesting limit
    // =========================================================================

    fn nested_tables(levels: usize) -> String {
        format!(
            "{}x{}",
            "<table><tr><td>".repeat(levels),
            "</table>".repeat(levels)
        )
    }

    fn try_parse_with(source: &str, options: ParseOptions) -> Result<ContentSpan, ParseError> {
        let lexer = Lexer::for_text(source)?;
        Parser::new(lexer, TreeBuilder::new(), options).parse_document()
    }

    #[test]
    fn test_nesting_at_limit_accepted() {
        let options = ParseOptions {
            max_nesting: 4,
            ..ParseOptions::default()
        };
        // Three tables plus the innermost text span.
        assert!(try_parse_with(&nested_tables(3), options).is_ok());
    }

    #[test]
    fn test_nesting_past_limit_rejected() {
        let options = ParseOptions {
            max_nesting: 4,
            ..ParseOptions::default()
        };
        let message = grammar_message(try_parse_with(&nested_tables(4), options));
        assert!(message.contains("nesting too deep"), "{message}");
    }

    #[test]
    fn test_deep_document_fails_without_overflow() {
        let doc = nested_tables(3000);
        let message = grammar_message(try_parse(&doc));
        assert!(message.contains("nesting too deep (more than 256 levels)"), "{message}");
        assert!(try_validate(&doc, Dialect::Full).is_err());
    }

    #[test]
    fn test_default_limit_allows_realistic_nesting() {
        assert!(try_parse(&nested_tables(100)).is_ok());
    }

    // =========================================================================
    // Lexical errors
    // =========================================================================

    #[test]
    fn test_unterminated_quote_is_lexical() {
        let result = try_parse("<a href=\"x>text</a>");
        assert!(matches!(result, Err(ParseError::Lexical(_))));
    }

    #[test]
    fn test_grammar_error_position() {
        match try_parse("<table>\n  <tr>\n    <td>\n</table>") {
            Err(ParseError::Grammar { line, column, .. }) => {
                assert_eq!((line, column), (4, 1));
            }
            other => panic!("Expected grammar error, got {other:?}"),
        }
    }
}
