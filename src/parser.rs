use crate::models::{ClippingKind, ClippingRecord};
use thiserror::Error;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const BOM: char = '\u{feff}';
const MIN_SEPARATOR_LEN: usize = 10;
const ADDED_ON: &str = "added on ";

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("Input is not valid UTF-8 (invalid byte at offset {0})")]
    Encoding(usize),
    #[error("Malformed clipping block: {0}")]
    MalformedBlock(String),
}

/// Result of parsing a whole export: the records that made it through and
/// how many blocks had to be skipped along the way.
#[derive(Debug, Default, PartialEq)]
pub struct ParseOutcome {
    pub records: Vec<ClippingRecord>,
    pub blocks: usize,
    pub skipped: usize,
}

/// Decodes the raw export, dropping a leading byte-order mark.
pub fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    let (offset, bytes) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (UTF8_BOM.len(), rest),
        None => (0, bytes),
    };

    std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding(offset + e.valid_up_to()))
}

/// Lazy iterator over the non-blank blocks between separator lines.
pub struct Blocks<'a> {
    rest: &'a str,
}

pub fn split_blocks(text: &str) -> Blocks<'_> {
    Blocks { rest: text }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let (block, rest) = next_block(self.rest);
            self.rest = rest;
            if !is_blank(block) {
                return Some(block);
            }
        }
        None
    }
}

fn next_block(text: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let end = offset + line.len();
        if is_separator(line) {
            return (&text[..offset], &text[end..]);
        }
        offset = end;
    }
    (text, "")
}

fn is_separator(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= MIN_SEPARATOR_LEN && line.bytes().all(|b| b == b'=')
}

fn is_blank(s: &str) -> bool {
    s.trim_matches(|c: char| c.is_whitespace() || c == BOM).is_empty()
}

pub fn parse_clippings(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for block in split_blocks(text) {
        outcome.blocks += 1;
        match parse_block(block) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                warn!(block = outcome.blocks, "Skipping clipping: {}", e);
                outcome.skipped += 1;
            }
        }
    }

    debug!(
        blocks = outcome.blocks,
        records = outcome.records.len(),
        skipped = outcome.skipped,
        "Parsed clippings"
    );
    outcome
}

pub fn parse_block(block: &str) -> Result<ClippingRecord, ParseError> {
    let mut lines = block.lines().skip_while(|l| is_blank(l));

    let title_line = lines
        .next()
        .ok_or_else(|| ParseError::MalformedBlock("empty block".to_string()))?;
    let (title, author) = parse_title_line(title_line);

    let meta_line = lines
        .next()
        .filter(|l| !is_blank(l))
        .ok_or_else(|| ParseError::MalformedBlock(format!("no metadata line for '{}'", title)))?;
    let meta = parse_metadata_line(meta_line);

    Ok(ClippingRecord {
        title,
        author,
        kind: meta.kind,
        page: meta.page,
        location: meta.location,
        added: meta.added,
        body: collect_body(lines),
    })
}

/// Splits `Title (Author)` on the last parenthesized group at line end.
/// Titles may carry their own parentheses, and so may authors, e.g.
/// `Essays (Vol. 2) (Smith, John (ed.))`.
fn parse_title_line(line: &str) -> (String, String) {
    let line = line.trim_start_matches(BOM).trim();

    match trailing_group_start(line) {
        Some(open) if !line[..open].trim().is_empty() => (
            line[..open].trim().to_string(),
            line[open + 1..line.len() - 1].trim().to_string(),
        ),
        _ => (line.to_string(), String::new()),
    }
}

fn trailing_group_start(line: &str) -> Option<usize> {
    if !line.ends_with(')') {
        return None;
    }

    let mut depth = 0usize;
    for (idx, c) in line.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, PartialEq)]
struct Metadata {
    kind: ClippingKind,
    page: Option<String>,
    location: Option<String>,
    added: Option<String>,
}

fn parse_metadata_line(line: &str) -> Metadata {
    let line = line.trim();
    // ASCII lowercasing keeps byte offsets aligned with `line`.
    let lower = line.to_ascii_lowercase();

    let kind = classify(&lower);
    if kind == ClippingKind::Unknown {
        return Metadata {
            kind,
            page: None,
            location: None,
            added: Some(line.to_string()),
        };
    }

    let (fields, added) = match lower.find(ADDED_ON) {
        Some(idx) => (&line[..idx], non_empty(&line[idx + ADDED_ON.len()..])),
        None => (line, None),
    };
    let lower_fields = &lower[..fields.len()];

    Metadata {
        kind,
        page: labelled_value(fields, lower_fields, "page"),
        location: labelled_value(fields, lower_fields, "location")
            .or_else(|| labelled_value(fields, lower_fields, "loc.")),
        added,
    }
}

fn classify(lower: &str) -> ClippingKind {
    let rest = lower.strip_prefix('-').unwrap_or(lower).trim_start();
    let Some(rest) = rest.strip_prefix("your") else {
        return ClippingKind::Unknown;
    };
    let rest = rest.trim_start();

    if rest.starts_with("highlight") {
        ClippingKind::Highlight
    } else if rest.starts_with("note") {
        ClippingKind::Note
    } else if rest.starts_with("bookmark") {
        ClippingKind::Bookmark
    } else {
        ClippingKind::Unknown
    }
}

/// Finds `<label> <value>` where the label starts a word and the value runs
/// up to the next whitespace or `|`.
fn labelled_value(line: &str, lower: &str, label: &str) -> Option<String> {
    let mut from = 0;

    while let Some(pos) = lower[from..].find(label) {
        let start = from + pos;
        let end = start + label.len();
        from = end;

        let starts_word = lower[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &line[end..];
        let value = rest.trim_start();
        if !starts_word || value.len() == rest.len() {
            continue;
        }

        let value = value
            .split(|c: char| c.is_whitespace() || c == '|')
            .next()
            .unwrap_or_default();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn collect_body<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let lines: Vec<&str> = lines.collect();
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);

    lines[start..end].join("\n")
}
