//! Document writer.
//!
//! Walks a content-span tree and emits canonical Browsr document text:
//! one tag per line, two-space indentation, rows and cells without end
//! tags. The output parses back into an equal tree.

use crate::WriteError;
use browsr_parser::ast::{ContentSpan, Form, HyperLink, Table};

/// Serialize a tree as Browsr document text.
pub fn generate(span: &ContentSpan) -> Result<String, WriteError> {
    let mut out = String::new();
    generate_span(span, &mut out, 0)?;
    Ok(out)
}

fn generate_span(span: &ContentSpan, out: &mut String, depth: usize) -> Result<(), WriteError> {
    let indent = "  ".repeat(depth);

    match span {
        ContentSpan::Text(text) => {
            check_text(text.text())?;
            out.push_str(&indent);
            out.push_str(text.text());
            out.push('\n');
        }
        ContentSpan::HyperLink(link) => generate_hyperlink(link, out, &indent)?,
        ContentSpan::Table(table) => generate_table(table, out, depth)?,
        ContentSpan::Form(form) => generate_form(form, out, depth)?,
        ContentSpan::TextInputField(field) => {
            let name = check_attribute("name", field.name())?;
            out.push_str(&format!("{indent}<input type=\"text\" name=\"{name}\">\n"));
        }
        ContentSpan::SubmitButton(_) => {
            out.push_str(&format!("{indent}<input type=\"submit\">\n"));
        }
    }

    Ok(())
}

fn generate_hyperlink(link: &HyperLink, out: &mut String, indent: &str) -> Result<(), WriteError> {
    let href = check_attribute("href", link.href())?;
    let text = link.text_span().text();
    check_text(text)?;
    out.push_str(&format!("{indent}<a href=\"{href}\">{text}</a>\n"));
    Ok(())
}

fn generate_table(table: &Table, out: &mut String, depth: usize) -> Result<(), WriteError> {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push_str("<table>\n");

    for row in table.rows() {
        out.push_str(&indent);
        out.push_str("  <tr>\n");
        for cell in row.cells() {
            out.push_str(&indent);
            out.push_str("    <td>\n");
            generate_span(cell.content(), out, depth + 3)?;
        }
    }

    out.push_str(&indent);
    out.push_str("</table>\n");
    Ok(())
}

fn generate_form(form: &Form, out: &mut String, depth: usize) -> Result<(), WriteError> {
    let indent = "  ".repeat(depth);
    let action = check_attribute("action", form.action())?;
    out.push_str(&format!("{indent}<form action=\"{action}\">\n"));
    generate_span(form.content(), out, depth + 1)?;
    out.push_str(&indent);
    out.push_str("</form>\n");
    Ok(())
}

/// Text must survive the lexer's whitespace splitting unchanged.
fn check_text(text: &str) -> Result<(), WriteError> {
    if text.is_empty() {
        return Err(WriteError::new("text spans must not be empty"));
    }
    if text.contains('<') {
        return Err(WriteError::new(format!(
            "text \"{text}\" contains '<', which would start a tag"
        )));
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed != text {
        return Err(WriteError::new(format!(
            "text \"{}\" is not whitespace-collapsed",
            text.escape_debug()
        )));
    }
    Ok(())
}

/// Quoted values have no escapes, so they cannot hold a quote.
fn check_attribute<'a>(name: &str, value: &'a str) -> Result<&'a str, WriteError> {
    if value.contains('"') {
        return Err(WriteError::new(format!(
            "{name} value {value:?} contains '\"', which cannot be quoted"
        )));
    }
    Ok(value)
}
