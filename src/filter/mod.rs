//! Row selection driven by accepted suggestions, plus paging of the result.

use crate::dataset::Dataset;
use anyhow::{Result, bail};

/// "Column value starts with" constraints, applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    selections: Vec<(usize, String)>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `field=prefix` arguments. Each field must be one of `fields`
    /// and a column of `dataset`.
    pub fn from_args(dataset: &Dataset, fields: &[String], args: &[String]) -> Result<Self> {
        let mut filter = Self::new();
        for arg in args {
            let Some((field, prefix)) = arg.split_once('=') else {
                bail!("Expected FIELD=PREFIX, got {:?}", arg);
            };
            let field = field.trim();
            let column = match dataset.column(field) {
                Some(column) if fields.iter().any(|f| f == field) => column,
                _ => bail!(
                    "Unknown field {:?} (available: {})",
                    field,
                    fields.join(", ")
                ),
            };
            filter.select(column, prefix);
        }
        Ok(filter)
    }

    /// Require `column` to start with `prefix`, replacing any earlier
    /// selection on the same column
    pub fn select(&mut self, column: usize, prefix: &str) {
        match self.selections.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => *existing = prefix.to_string(),
            None => self.selections.push((column, prefix.to_string())),
        }
    }

    /// Drop the selection on `column`, if any
    pub fn deselect(&mut self, column: usize) {
        self.selections.retain(|(c, _)| *c != column);
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn selection(&self, column: usize) -> Option<&str> {
        self.selections
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, p)| p.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// True if the row satisfies every selection
    pub fn accepts(&self, row: &[String]) -> bool {
        self.selections.iter().all(|(column, prefix)| {
            row.get(*column)
                .is_some_and(|cell| cell.trim().starts_with(prefix.as_str()))
        })
    }

    /// Indices of the rows of `dataset` that pass
    pub fn apply(&self, dataset: &Dataset) -> Vec<usize> {
        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.accepts(row))
            .map(|(i, _)| i)
            .collect()
    }
}

/// One page of filtered row indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub rows: &'a [usize],
    /// Zero-based page number actually shown
    pub number: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

/// Cut `indices` into pages of `page_size` and return page `page`.
///
/// Out-of-range page numbers show the last page. An empty input still has
/// one (empty) page.
pub fn paginate(indices: &[usize], page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let total_pages = indices.len().div_ceil(page_size).max(1);
    let number = page.min(total_pages - 1);
    let start = (number * page_size).min(indices.len());
    let end = (start + page_size).min(indices.len());

    Page {
        rows: &indices[start..end],
        number,
        total_pages,
        total_rows: indices.len(),
    }
}

/// Shorten `text` to at most `max_chars` characters, cutting on a character
/// boundary
pub fn truncate_display(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
