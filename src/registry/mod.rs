//! One autocomplete trie per filterable column.
//!
//! The registry is built once from a [`Dataset`] snapshot and then only read.
//! It is an ordinary value owned by whoever drives the session (the CLI or
//! the interactive view) and dropped with it.

use crate::dataset::Dataset;
use crate::trie::{Trie, TrieStats};
use crate::utils::progress::field_bar;
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, info};

/// Autocomplete index for a single column
#[derive(Debug, Clone)]
pub struct FieldIndex {
    name: String,
    column: usize,
    trie: Trie,
}

impl FieldIndex {
    /// Index the distinct values of `column`
    pub fn build(dataset: &Dataset, name: &str, column: usize) -> Self {
        let trie = Trie::from_words(dataset.distinct_values(column));
        debug!(field = name, words = trie.len(), "field trie built");
        Self {
            name: name.to_string(),
            column,
            trie,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}

/// Per-field numbers for `colcomplete fields`
#[derive(Debug, Clone)]
pub struct FieldStats {
    pub name: String,
    pub column: usize,
    pub trie: TrieStats,
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldIndex>,
}

impl FieldRegistry {
    /// Build tries for the named columns without progress output
    pub fn build(dataset: &Dataset, fields: &[String]) -> Result<Self> {
        Self::build_with_progress(dataset, fields, true)
    }

    /// Build tries for the named columns.
    ///
    /// Columns are independent, so their tries are built in parallel. Fails
    /// without building anything if a field is not a column of `dataset`.
    pub fn build_with_progress(dataset: &Dataset, fields: &[String], silent: bool) -> Result<Self> {
        let mut targets: Vec<(&str, usize)> = Vec::with_capacity(fields.len());
        for field in fields {
            let Some(column) = dataset.column(field) else {
                bail!(
                    "Unknown field {:?} (available: {})",
                    field,
                    dataset.columns().join(", ")
                );
            };
            if !targets.iter().any(|&(name, _)| name == field.as_str()) {
                targets.push((field.as_str(), column));
            }
        }

        let progress = if silent {
            None
        } else {
            Some(field_bar(targets.len())?)
        };

        let indexed: Vec<FieldIndex> = targets
            .par_iter()
            .map(|&(name, column)| {
                let index = FieldIndex::build(dataset, name, column);
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                index
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let registry = Self { fields: indexed };
        info!(
            fields = registry.fields.len(),
            words = registry.fields.iter().map(|f| f.trie.len()).sum::<usize>(),
            "field registry built"
        );
        Ok(registry)
    }

    /// Indexed field names, in the order they were requested
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldIndex::name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldIndex> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Trie> {
        self.field(name).map(FieldIndex::trie)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Up to `limit` matches for `query` in `field`, sorted. A `limit` of 0
    /// returns every match.
    pub fn suggest(
        &self,
        field: &str,
        query: &str,
        case_sensitive: bool,
        limit: usize,
    ) -> Result<Vec<String>> {
        let trie = self
            .get(field)
            .with_context(|| format!("Field {:?} is not indexed", field))?;

        let mut matches = trie.matches(query, case_sensitive);
        if limit > 0 {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    pub fn stats(&self) -> Vec<FieldStats> {
        self.fields
            .iter()
            .map(|f| FieldStats {
                name: f.name.clone(),
                column: f.column,
                trie: f.trie.stats(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["Name".into(), "Borough".into(), "Notes".into()],
            vec![
                vec!["Alphabet City".into(), "Manhattan".into(), "".into()],
                vec!["ACE".into(), "Brooklyn".into(), "".into()],
                vec!["Alphabet City".into(), "Manhattan".into(), "dup".into()],
                vec![" Astoria ".into(), "Queens".into(), "".into()],
            ],
        )
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_one_trie_per_field() {
        let data = sample();
        let registry = FieldRegistry::build(&data, &fields(&["Name", "Borough"])).unwrap();

        assert_eq!(registry.fields().collect::<Vec<_>>(), vec!["Name", "Borough"]);
        assert_eq!(registry.get("Name").unwrap().len(), 3);
        assert_eq!(registry.get("Borough").unwrap().len(), 3);
        assert!(registry.get("Notes").is_none());
        assert_eq!(registry.field("Borough").unwrap().column(), 1);
    }

    #[test]
    fn test_duplicate_field_names_indexed_once() {
        let registry =
            FieldRegistry::build(&sample(), &fields(&["Name", "Name", "Borough"])).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_field_fails() {
        let err = FieldRegistry::build(&sample(), &fields(&["Name", "Zip"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Zip"));
        assert!(msg.contains("Borough"));
    }

    #[test]
    fn test_suggest_limits_and_sorts() {
        let registry = FieldRegistry::build(&sample(), &fields(&["Name"])).unwrap();

        let all = registry.suggest("Name", "ac", false, 0).unwrap();
        assert_eq!(all, vec!["ACE", "Alphabet City"]);

        let one = registry.suggest("Name", "ac", false, 1).unwrap();
        assert_eq!(one, vec!["ACE"]);

        // Values are trimmed before indexing
        let trimmed = registry.suggest("Name", "As", true, 10).unwrap();
        assert_eq!(trimmed, vec!["Astoria"]);

        assert!(registry.suggest("Borough", "Ma", true, 10).is_err());
    }

    #[test]
    fn test_stats() {
        let registry = FieldRegistry::build(&sample(), &fields(&["Name"])).unwrap();
        let stats = registry.stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "Name");
        assert_eq!(stats[0].trie.words, 3);
        assert_eq!(stats[0].trie.skip_targets, 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = FieldRegistry::build(&sample(), &[]).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.fields().count(), 0);
    }
}
