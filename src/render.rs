use crate::models::{BookGroup, ClippingRecord};

const RULE: &str = "---\n\n";

/// Renders a book as Markdown. The title is carried by the filename, so
/// there is no heading.
pub fn render_book(book: &BookGroup) -> String {
    let mut out = String::new();

    if !book.author.is_empty() {
        out.push_str(&format!("_by {}_\n\n", book.author));
    }
    out.push_str(RULE);

    for record in &book.records {
        render_record(record, &mut out);
    }

    out
}

fn render_record(record: &ClippingRecord, out: &mut String) {
    if !record.body.is_empty() {
        for line in record.body.split('\n') {
            out.push_str("> ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    if let Some(attribution) = attribution(record) {
        out.push_str(&format!("_– {}_\n\n", attribution));
    }

    out.push_str(RULE);
}

/// `Page … | Location … | Added on …`, skipping whatever is missing.
pub fn attribution(record: &ClippingRecord) -> Option<String> {
    let parts: Vec<String> = [
        record.page.as_ref().map(|p| format!("Page {}", p)),
        record.location.as_ref().map(|l| format!("Location {}", l)),
        record.added.as_ref().map(|a| format!("Added on {}", a)),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" | "))
}
