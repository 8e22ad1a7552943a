//! Utility functions shared across colcomplete.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file and app data directory (XDG-compliant)
//! - [`progress`] - Progress bars that compile away without the `progress` feature
//! - [`tokenizer`] - Token boundaries and per-character case folding
//!
//! ## Key Functions
//!
//! ```
//! use colcomplete::utils::{flip_case, token_starts};
//!
//! // Tokens start after any non-alphanumeric character
//! assert_eq!(token_starts("Jean-Luc Picard"), vec![0, 5, 9]);
//!
//! // Case-insensitive matching compares against the swapped case
//! assert_eq!(flip_case('a'), 'A');
//! ```

pub mod app_data;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use tokenizer::*;
