//! querycomplete - autocomplete for structured search queries.
//!
//! Given a partially typed query like `is:arm or tag:`, the caret position and
//! the user's search history, produce a ranked list of suggestions: the query
//! as typed, completions of the term under the caret, saved and recent
//! searches, and a trailing help entry.
//!
//! # Architecture
//!
//! - [`core`] - The suggestion pipeline (term isolation, completion, composition)
//! - [`services`] - Frecency scoring, search history, filter vocabulary
//! - [`config`] - Configuration loading and management
//! - [`cli`] - Command-line front end
//!
//! # Example
//!
//! ```ignore
//! use querycomplete::{Autocompleter, Vocabulary};
//!
//! let vocab = Vocabulary::load("vocabulary.toml".as_ref())?;
//! let mut autocompleter = Autocompleter::new(vocab);
//!
//! for item in autocompleter.suggest("is:arm", 6, &[]) {
//!     println!("{:?} {}", item.kind, item.query);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod services;

mod error;

pub use config::Config;
pub use core::{Autocompleter, SuggestionItem, SuggestionKind};
pub use error::{SuggestError, SuggestResult};
pub use services::{FilterVocabulary, SearchHistoryEntry, Vocabulary};
