//! Content-span tree for Browsr documents.
//!
//! Every node is immutable once built: fields are private and exposed
//! through read-only accessors. Table rows and cells are collected by the
//! tree builder and handed over in encounter order.

use serde::Serialize;

/// A unit of displayable or interactive content.
///
/// Consumers are expected to match exhaustively so that a new span kind
/// shows up everywhere it has to be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ContentSpan {
    Text(TextSpan),
    HyperLink(HyperLink),
    Table(Table),
    Form(Form),
    TextInputField(TextInputField),
    SubmitButton(SubmitButton),
}

impl ContentSpan {
    /// Variant name, for diagnostics and outlines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentSpan::Text(_) => "TextSpan",
            ContentSpan::HyperLink(_) => "HyperLink",
            ContentSpan::Table(_) => "Table",
            ContentSpan::Form(_) => "Form",
            ContentSpan::TextInputField(_) => "TextInputField",
            ContentSpan::SubmitButton(_) => "SubmitButton",
        }
    }

    pub fn as_text(&self) -> Option<&TextSpan> {
        match self {
            ContentSpan::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_hyperlink(&self) -> Option<&HyperLink> {
        match self {
            ContentSpan::HyperLink(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ContentSpan::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&Form> {
        match self {
            ContentSpan::Form(f) => Some(f),
            _ => None,
        }
    }

    /// Find the document's form, searching through table cells.
    pub fn find_form(&self) -> Option<&Form> {
        match self {
            ContentSpan::Form(f) => Some(f),
            ContentSpan::Table(t) => t
                .rows()
                .iter()
                .flat_map(TableRow::cells)
                .find_map(|cell| cell.content().find_form()),
            ContentSpan::Text(_)
            | ContentSpan::HyperLink(_)
            | ContentSpan::TextInputField(_)
            | ContentSpan::SubmitButton(_) => None,
        }
    }
}

/// Literal text, whitespace collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    text: String,
}

impl TextSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `<a href="...">text</a>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HyperLink {
    href: String,
    text_span: TextSpan,
}

impl HyperLink {
    pub fn new(href: impl Into<String>, text_span: TextSpan) -> Self {
        Self {
            href: href.into(),
            text_span,
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn text_span(&self) -> &TextSpan {
        &self.text_span
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }
}

/// A table cell holding exactly one child span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    content: Box<ContentSpan>,
}

impl TableCell {
    pub fn new(content: ContentSpan) -> Self {
        Self {
            content: Box::new(content),
        }
    }

    pub fn content(&self) -> &ContentSpan {
        &self.content
    }
}

/// `<form action="...">content</form>`; at most one per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    action: String,
    content: Box<ContentSpan>,
}

impl Form {
    pub fn new(action: impl Into<String>, content: ContentSpan) -> Self {
        Self {
            action: action.into(),
            content: Box::new(content),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn content(&self) -> &ContentSpan {
        &self.content
    }

    /// Names of the text fields in this form, in document order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_field_names(&self.content, &mut names);
        names
    }
}

fn collect_field_names<'a>(span: &'a ContentSpan, names: &mut Vec<&'a str>) {
    match span {
        ContentSpan::TextInputField(field) => names.push(field.name()),
        ContentSpan::Table(table) => {
            for cell in table.rows().iter().flat_map(TableRow::cells) {
                collect_field_names(cell.content(), names);
            }
        }
        ContentSpan::Form(form) => collect_field_names(form.content(), names),
        ContentSpan::Text(_) | ContentSpan::HyperLink(_) | ContentSpan::SubmitButton(_) => {}
    }
}

/// `<input type="text" name="...">`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInputField {
    name: String,
}

impl TextInputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// `<input type="submit">`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmitButton;
