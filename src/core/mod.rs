//! Core engine module - the suggestion pipeline.
//!
//! Nothing in here does I/O or fails:
//! - Isolating the term under the caret
//! - Completing a term against the filter vocabulary
//! - Composing the final suggestion list

pub mod autocomplete;
pub mod filter_complete;
pub mod term;

pub use autocomplete::{
    term_suggestions, Autocompleter, SuggestionItem, SuggestionKind, DEFAULT_MAX_SUGGESTIONS,
};
pub use filter_complete::{complete, help_text};
pub use term::{isolate_term, IsolatedTerm};
