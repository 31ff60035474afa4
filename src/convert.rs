use crate::config::Config;
use crate::grouper::group_by_book;
use crate::models::ClippingKind;
use crate::parser::{self, ParseError};
use crate::render::render_book;
use crate::writer::{OutputDir, WriteError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that stop a run. Failures on single books are reported in
/// [`Summary::failures`] instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Default)]
pub struct Summary {
    pub blocks: usize,
    pub clippings: usize,
    pub skipped: usize,
    /// Parsed records left out by configuration, e.g. bookmarks.
    pub excluded: usize,
    pub books: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<WriteError>,
}

/// Runs the whole conversion: read, parse, group, render, write.
///
/// A book that fails to write does not stop the others.
pub fn convert(config: &Config) -> Result<Summary, ConvertError> {
    let bytes = std::fs::read(&config.input_path).map_err(|source| ConvertError::Read {
        path: config.input_path.clone(),
        source,
    })?;
    let text = parser::decode(&bytes)?;

    let outcome = parser::parse_clippings(text);
    let parsed = outcome.records.len();

    let records: Vec<_> = outcome
        .records
        .into_iter()
        .filter(|r| config.include_bookmarks || r.kind != ClippingKind::Bookmark)
        .collect();

    let mut summary = Summary {
        blocks: outcome.blocks,
        clippings: records.len(),
        skipped: outcome.skipped,
        excluded: parsed - records.len(),
        ..Summary::default()
    };
    info!(
        blocks = summary.blocks,
        skipped = summary.skipped,
        excluded = summary.excluded,
        "Found {} clippings",
        summary.clippings
    );

    let books = group_by_book(records);
    summary.books = books.len();
    if books.is_empty() {
        return Ok(summary);
    }

    let mut out = OutputDir::create(&config.output_dir)?;
    info!(dir = %out.root().display(), books = books.len(), "Writing Markdown files");

    for book in &books {
        match out.write(&book.title, &render_book(book)) {
            Ok(path) => summary.written.push(path),
            Err(e) => {
                warn!(title = %book.title, "{}", e);
                summary.failures.push(e);
            }
        }
    }

    Ok(summary)
}
