//! Suggestion list for a partially typed query.
//!
//! Combines, in priority order:
//! 1. the query as typed,
//! 2. completions of the term under the caret,
//! 3. saved and recent searches,
//!
//! de-duplicated by query text and capped, followed by a single help entry
//! that is always last.

use std::ops::Range;

use serde::Serialize;

use crate::core::filter_complete::{complete, help_text};
use crate::core::term::isolate_term;
use crate::services::history::{rank_recent, SearchHistoryEntry};
use crate::services::vocabulary::{Catalog, FilterVocabulary, Localizer};

/// Default number of ranked suggestions, not counting the help entry.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 7;

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A search from history.
    Recent,
    /// An explicitly saved search.
    Saved,
    /// A search offered without having been run.
    Suggested,
    /// The typed query, or the typed query with a completed term.
    Completion,
    /// Open filter help.
    Help,
}

/// An entry in the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub kind: SuggestionKind,

    /// The query this suggestion would run.
    pub query: String,

    /// Byte range of `query` to highlight (the completed term).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_range: Option<Range<usize>>,

    /// Description of the completed filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl SuggestionItem {
    pub fn new(kind: SuggestionKind, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
            highlight_range: None,
            help_text: None,
        }
    }

    /// The trailing help entry. Its text is the query so selecting it leaves
    /// the input unchanged.
    pub fn help(query: &str) -> Self {
        Self::new(SuggestionKind::Help, query)
    }
}

/// Offer queries that replace the term under the caret with a completion.
pub fn term_suggestions<V: FilterVocabulary + ?Sized>(
    query: &str,
    caret: usize,
    vocab: &V,
    localizer: &dyn Localizer,
) -> Vec<SuggestionItem> {
    let Some(isolated) = isolate_term(query, caret) else {
        return Vec::new();
    };

    let candidates = complete(&isolated.term, vocab);
    tracing::debug!(
        term = %isolated.term,
        start = isolated.match_start,
        completions = candidates.len(),
        "isolated term"
    );

    candidates
        .into_iter()
        .map(|word| {
            let start = isolated.match_start;
            SuggestionItem {
                kind: SuggestionKind::Completion,
                query: isolated.replace_in(query, &word),
                highlight_range: Some(start..start + word.len()),
                help_text: help_text(&word, vocab, localizer),
            }
        })
        .collect()
}

/// Single-slot memo of the last inputs and their suggestions.
#[derive(Debug)]
struct LastCall {
    query: String,
    caret: usize,
    history: Vec<SearchHistoryEntry>,
    items: Vec<SuggestionItem>,
}

impl LastCall {
    fn matches(&self, query: &str, caret: usize, history: &[SearchHistoryEntry]) -> bool {
        self.query == query && self.caret == caret && self.history == history
    }
}

/// Builds suggestion lists against a fixed vocabulary.
pub struct Autocompleter<V: FilterVocabulary, L: Localizer = Catalog> {
    vocab: V,
    localizer: L,
    max_suggestions: usize,
    last: Option<LastCall>,
}

impl<V: FilterVocabulary> Autocompleter<V, Catalog> {
    /// Create an autocompleter whose help text shows raw description keys.
    pub fn new(vocab: V) -> Self {
        Self::with_localizer(vocab, Catalog::new())
    }
}

impl<V: FilterVocabulary, L: Localizer> Autocompleter<V, L> {
    pub fn with_localizer(vocab: V, localizer: L) -> Self {
        Self {
            vocab,
            localizer,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            last: None,
        }
    }

    /// Lower how many ranked suggestions are kept before the help entry.
    /// Clamped to `1..=DEFAULT_MAX_SUGGESTIONS`.
    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.clamp(1, DEFAULT_MAX_SUGGESTIONS);
        self.last = None;
        self
    }

    /// Suggestions for `query` with the caret at byte offset `caret`.
    ///
    /// Repeating the previous call's inputs returns the previous result.
    pub fn suggest(
        &mut self,
        query: &str,
        caret: usize,
        history: &[SearchHistoryEntry],
    ) -> &[SuggestionItem] {
        let hit = self
            .last
            .as_ref()
            .is_some_and(|last| last.matches(query, caret, history));

        if hit {
            tracing::trace!(query, caret, "suggestions served from memo");
        } else {
            let items = self.build_suggestions(query, caret, history);
            self.last = Some(LastCall {
                query: query.to_string(),
                caret,
                history: history.to_vec(),
                items,
            });
        }

        self.last
            .as_ref()
            .map(|last| last.items.as_slice())
            .unwrap_or(&[])
    }

    /// Build suggestions without consulting or updating the memo.
    pub fn build_suggestions(
        &self,
        query: &str,
        caret: usize,
        history: &[SearchHistoryEntry],
    ) -> Vec<SuggestionItem> {
        let typed = (!query.is_empty())
            .then(|| SuggestionItem::new(SuggestionKind::Completion, query));
        let terms = term_suggestions(query, caret, &self.vocab, &self.localizer);
        let recent = rank_recent(query, history);

        let mut items: Vec<SuggestionItem> = Vec::with_capacity(self.max_suggestions + 1);
        for item in typed.into_iter().chain(terms).chain(recent) {
            if items.len() == self.max_suggestions {
                break;
            }
            if item.query.is_empty() || items.iter().any(|i| i.query == item.query) {
                continue;
            }
            items.push(item);
        }

        tracing::debug!(query, caret, suggestions = items.len(), "built suggestions");

        items.push(SuggestionItem::help(query));
        items
    }
}
