// CSV table loading.
//
// The report reads two exports: job postings and customer reviews. Each is
// described by a TableSpec naming which columns carry the text, the group
// label, and (for postings) the category. Absent columns are tolerated and
// read as all-missing. A missing file is not fatal: it logs a warning and
// yields an empty corpus so the rest of the run still renders.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::models::{Corpus, Document};

/// Category label used for postings whose department cell is empty.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Column layout of one input table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSpec {
    /// Short name used in logs ("hiring", "reviews")
    pub name: String,
    pub text_column: String,
    /// Candidate group-label columns; per row, the first non-empty one wins
    pub group_columns: Vec<String>,
    pub category_column: Option<String>,
    /// Value substituted for empty category cells
    pub category_fill: Option<String>,
}

impl TableSpec {
    /// Job postings: description text grouped by customer, categorized by department.
    pub fn hiring() -> Self {
        Self {
            name: "hiring".to_string(),
            text_column: "description".to_string(),
            group_columns: vec!["customer".to_string()],
            category_column: Some("department".to_string()),
            category_fill: Some(UNKNOWN_CATEGORY.to_string()),
        }
    }

    /// Customer reviews: review text grouped by customer. Older exports
    /// call the group column `competitor`.
    pub fn reviews() -> Self {
        Self {
            name: "reviews".to_string(),
            text_column: "review_text".to_string(),
            group_columns: vec!["customer".to_string(), "competitor".to_string()],
            category_column: None,
            category_fill: None,
        }
    }
}

/// A table on disk plus how to read it. Doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableSource {
    pub path: PathBuf,
    pub spec: TableSpec,
}

impl TableSource {
    pub fn new(path: impl Into<PathBuf>, spec: TableSpec) -> Self {
        Self {
            path: path.into(),
            spec,
        }
    }

    pub fn hiring(path: impl Into<PathBuf>) -> Self {
        Self::new(path, TableSpec::hiring())
    }

    pub fn reviews(path: impl Into<PathBuf>) -> Self {
        Self::new(path, TableSpec::reviews())
    }
}

/// Load a table from disk, substituting an empty corpus if the file is missing.
pub fn load_table(source: &TableSource) -> Result<Corpus> {
    let file = match File::open(&source.path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(
                table = %source.spec.name,
                path = %source.path.display(),
                "Source table not found, continuing with an empty corpus"
            );
            return Ok(Corpus::empty());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open {}", source.path.display()));
        }
    };

    let corpus = read_table(file, &source.spec)
        .with_context(|| format!("Failed to parse {}", source.path.display()))?;

    info!(
        table = %source.spec.name,
        path = %source.path.display(),
        documents = corpus.len(),
        "Loaded table"
    );
    Ok(corpus)
}

/// Parse CSV from any reader according to `spec`.
///
/// Cells that are not valid UTF-8 are decoded lossily (invalid bytes become
/// U+FFFD) so one bad row never sinks the whole table.
pub fn read_table<R: Read>(reader: R, spec: &TableSpec) -> Result<Corpus> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let text_idx = column_index(&headers, &spec.text_column);
    let group_idxs: Vec<usize> = spec
        .group_columns
        .iter()
        .filter_map(|name| column_index(&headers, name))
        .collect();
    let category_idx = spec
        .category_column
        .as_deref()
        .and_then(|name| column_index(&headers, name));

    if text_idx.is_none() {
        warn!(
            table = %spec.name,
            column = %spec.text_column,
            "Text column absent, every document will read as empty"
        );
    }

    let mut documents = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = record?;
        let cell = |idx: Option<usize>| -> Option<String> {
            let bytes = idx.and_then(|i| record.get(i))?;
            if bytes.is_empty() {
                return None;
            }
            if std::str::from_utf8(bytes).is_err() {
                warn!(
                    table = %spec.name,
                    row = row + 1,
                    "Cell is not valid UTF-8, invalid bytes replaced"
                );
            }
            Some(String::from_utf8_lossy(bytes).into_owned())
        };

        let category = match (spec.category_column.is_some(), cell(category_idx)) {
            (_, Some(value)) => Some(value),
            (true, None) => spec.category_fill.clone(),
            (false, None) => None,
        };

        documents.push(Document {
            text: cell(text_idx),
            group: group_idxs.iter().find_map(|&i| cell(Some(i))),
            category,
        });
    }

    Ok(Corpus::new(documents))
}

/// Whether the file behind a source exists.
pub fn source_exists(path: &Path) -> bool {
    path.is_file()
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
}
