//! Output construction for the document parser.
//!
//! The parser walks the grammar once and calls into a [`SpanBuilder`] at
//! every production. [`TreeBuilder`] materializes a [`ContentSpan`] tree;
//! [`Validator`] builds nothing, which turns the same parser into a pure
//! grammar check.

use crate::ast::{
    ContentSpan, Form, HyperLink, SubmitButton, Table, TableCell, TableRow, TextInputField,
    TextSpan,
};

/// Rejection raised by a builder for a rule the grammar alone cannot see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRejection {
    pub message: String,
}

/// Construction capability passed to the parser.
pub trait SpanBuilder {
    /// What a content-span production turns into.
    type Span;

    fn text(&mut self, text: String) -> Self::Span;

    fn hyperlink(&mut self, href: String, text: String) -> Self::Span;

    /// `rows` holds the cell contents of each row in encounter order.
    fn table(&mut self, rows: Vec<Vec<Self::Span>>) -> Self::Span;

    /// Called when a `<form` tag is reached, before its content is parsed.
    fn enter_form(&mut self) -> Result<(), BuildRejection>;

    fn form(&mut self, action: String, content: Self::Span) -> Self::Span;

    fn text_input(&mut self, name: String) -> Self::Span;

    fn submit_button(&mut self) -> Self::Span;
}

/// Builds the content-span tree.
///
/// Owns the one-form-per-document flag, so a builder must not be reused
/// across documents.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    form_seen: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpanBuilder for TreeBuilder {
    type Span = ContentSpan;

    fn text(&mut self, text: String) -> ContentSpan {
        ContentSpan::Text(TextSpan::new(text))
    }

    fn hyperlink(&mut self, href: String, text: String) -> ContentSpan {
        ContentSpan::HyperLink(HyperLink::new(href, TextSpan::new(text)))
    }

    fn table(&mut self, rows: Vec<Vec<ContentSpan>>) -> ContentSpan {
        let rows = rows
            .into_iter()
            .map(|cells| TableRow::new(cells.into_iter().map(TableCell::new).collect()))
            .collect();
        ContentSpan::Table(Table::new(rows))
    }

    fn enter_form(&mut self) -> Result<(), BuildRejection> {
        if self.form_seen {
            return Err(BuildRejection {
                message: "nested Form detected: a document may contain only one form".into(),
            });
        }
        self.form_seen = true;
        Ok(())
    }

    fn form(&mut self, action: String, content: ContentSpan) -> ContentSpan {
        ContentSpan::Form(Form::new(action, content))
    }

    fn text_input(&mut self, name: String) -> ContentSpan {
        ContentSpan::TextInputField(TextInputField::new(name))
    }

    fn submit_button(&mut self) -> ContentSpan {
        ContentSpan::SubmitButton(SubmitButton)
    }
}

/// No-op builder: grammar validation only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl SpanBuilder for Validator {
    type Span = ();

    fn text(&mut self, _text: String) {}

    fn hyperlink(&mut self, _href: String, _text: String) {}

    fn table(&mut self, _rows: Vec<Vec<()>>) {}

    fn enter_form(&mut self) -> Result<(), BuildRejection> {
        Ok(())
    }

    fn form(&mut self, _action: String, _content: ()) {}

    fn text_input(&mut self, _name: String) {}

    fn submit_button(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_keeps_encounter_order() {
        let mut builder = TreeBuilder::new();
        let a = builder.text("a".into());
        let b = builder.text("b".into());
        let c = builder.text("c".into());
        let table = builder.table(vec![vec![a, b], vec![c]]);

        let table = table.as_table().unwrap();
        assert_eq!(table.rows().len(), 2);
        let first: Vec<_> = table.rows()[0]
            .cells()
            .iter()
            .map(|cell| cell.content().as_text().unwrap().text())
            .collect();
        assert_eq!(first, vec!["a", "b"]);
        assert_eq!(table.rows()[1].cells().len(), 1);
    }

    #[test]
    fn test_second_form_rejected() {
        let mut builder = TreeBuilder::new();
        assert!(builder.enter_form().is_ok());
        let err = builder.enter_form().unwrap_err();
        assert!(err.message.contains("nested Form detected"));
    }

    #[test]
    fn test_form_flag_is_per_builder() {
        let mut first = TreeBuilder::new();
        first.enter_form().unwrap();
        let mut second = TreeBuilder::new();
        assert!(second.enter_form().is_ok());
    }

    #[test]
    fn test_validator_accepts_any_number_of_forms() {
        let mut validator = Validator;
        for _ in 0..3 {
            assert!(validator.enter_form().is_ok());
        }
    }
}
