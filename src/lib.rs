//! # colcomplete - Token-boundary autocomplete for tabular data
//!
//! colcomplete builds one autocomplete index per filterable column of a
//! table and answers every keystroke with the column values the typed text
//! can reach. Besides plain prefixes, a query may skip ahead to later words
//! inside a value, so "AC" suggests "Alphabet City".
//!
//! ## Architecture
//!
//! - [`trie`] - The skip-link trie and its matching algorithm
//! - [`dataset`] - Loading the table snapshot (CSV, TSV, JSON)
//! - [`registry`] - One trie per filterable column
//! - [`filter`] - "Starts with" row selection and paging
//! - [`output`] - Colored terminal output
//! - [`tui`] - Interactive autocomplete view (feature `interactive`)
//! - [`utils`] - Configuration, progress bars, token boundaries
//!
//! ## Quick Start
//!
//! ```
//! use colcomplete::dataset::Dataset;
//! use colcomplete::filter::RowFilter;
//! use colcomplete::registry::FieldRegistry;
//!
//! let data = Dataset::from_delimited(
//!     "Name,Borough\nAlphabet City,Manhattan\nACE,Brooklyn\n",
//!     b',',
//! )?;
//! let registry = FieldRegistry::build(&data, &["Name".to_string()])?;
//!
//! let suggestions = registry.suggest("Name", "ac", false, 10)?;
//! assert_eq!(suggestions, vec!["ACE", "Alphabet City"]);
//!
//! // Accepting a suggestion narrows the table
//! let mut filter = RowFilter::new();
//! filter.select(data.column("Name").unwrap(), &suggestions[1]);
//! assert_eq!(filter.apply(&data), vec![0]);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod dataset;
pub mod filter;
pub mod output;
pub mod registry;
pub mod trie;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
