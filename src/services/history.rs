//! Recent and saved searches.
//!
//! History is owned by whoever persists it; this module only reads a snapshot
//! of it and ranks entries for the suggestion list.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::autocomplete::{SuggestionItem, SuggestionKind};
use crate::error::{SuggestError, SuggestResult};
use crate::services::frecency::{frecency_at, now_millis};

/// A previously run (or suggested) search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    /// The full query text.
    pub query: String,

    /// Whether the user explicitly saved this search.
    #[serde(default)]
    pub saved: bool,

    /// Number of times this search was run.
    #[serde(default)]
    pub usage_count: u32,

    /// Unix timestamp (milliseconds) of last use.
    #[serde(default)]
    pub last_usage: u64,
}

impl SearchHistoryEntry {
    /// Suggestion kind this entry shows up as.
    pub fn kind(&self) -> SuggestionKind {
        if self.saved {
            SuggestionKind::Saved
        } else if self.usage_count > 0 {
            SuggestionKind::Recent
        } else {
            SuggestionKind::Suggested
        }
    }

    /// Frecency score of this entry relative to `now_millis`.
    pub fn frecency_at(&self, now_millis: u64) -> f64 {
        frecency_at(self.usage_count, self.last_usage, now_millis)
    }
}

/// Filter and rank history entries for `query` at the current time.
pub fn rank_recent(query: &str, history: &[SearchHistoryEntry]) -> Vec<SuggestionItem> {
    rank_recent_at(query, history, now_millis())
}

/// Filter and rank history entries for `query` relative to `now_millis`.
///
/// Entries whose text contains `query` (case-sensitive) are kept; an empty
/// query keeps everything. Saved searches come first, then higher frecency.
pub fn rank_recent_at(
    query: &str,
    history: &[SearchHistoryEntry],
    now_millis: u64,
) -> Vec<SuggestionItem> {
    let mut scored: Vec<(&SearchHistoryEntry, f64)> = history
        .iter()
        .filter(|entry| query.is_empty() || entry.query.contains(query))
        .map(|entry| (entry, entry.frecency_at(now_millis)))
        .collect();

    scored.sort_by(|(a, a_score), (b, b_score)| {
        b.saved
            .cmp(&a.saved)
            .then_with(|| b_score.partial_cmp(a_score).unwrap_or(Ordering::Equal))
    });

    scored
        .into_iter()
        .map(|(entry, _)| SuggestionItem::new(entry.kind(), entry.query.clone()))
        .collect()
}

/// Load a history snapshot from a JSON array file.
///
/// A missing file is an empty history, not an error.
pub fn load_history(path: &Path) -> SuggestResult<Vec<SearchHistoryEntry>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no history file, using empty history");
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<SearchHistoryEntry> = serde_json::from_str(&contents)
        .map_err(|e| SuggestError::History(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(count = entries.len(), "loaded search history");
    Ok(entries)
}
