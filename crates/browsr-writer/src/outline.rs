//! Human-readable outline of a content-span tree, one node per line.

use browsr_parser::ast::ContentSpan;

/// Render an indented outline.
pub fn generate(span: &ContentSpan) -> String {
    let mut out = String::new();
    generate_span(span, &mut out, 0);
    out
}

fn generate_span(span: &ContentSpan, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    match span {
        ContentSpan::Text(text) => {
            out.push_str(&format!("{indent}TextSpan {:?}\n", text.text()));
        }
        ContentSpan::HyperLink(link) => {
            out.push_str(&format!(
                "{indent}HyperLink {:?} -> {:?}\n",
                link.text_span().text(),
                link.href()
            ));
        }
        ContentSpan::Table(table) => {
            out.push_str(&format!("{indent}Table ({} rows)\n", table.rows().len()));
            for (r, row) in table.rows().iter().enumerate() {
                out.push_str(&format!("{indent}  Row {r}\n"));
                for (c, cell) in row.cells().iter().enumerate() {
                    out.push_str(&format!("{indent}    Cell {c}\n"));
                    generate_span(cell.content(), out, depth + 3);
                }
            }
        }
        ContentSpan::Form(form) => {
            out.push_str(&format!("{indent}Form -> {:?}\n", form.action()));
            generate_span(form.content(), out, depth + 1);
        }
        ContentSpan::TextInputField(field) => {
            out.push_str(&format!("{indent}TextInputField {:?}\n", field.name()));
        }
        ContentSpan::SubmitButton(_) => {
            out.push_str(&indent);
            out.push_str("SubmitButton\n");
        }
    }
}
