//! Isolates the term under the caret.
//!
//! Offsets are byte offsets into the query. A caret past the end is clamped to
//! the end; a caret inside a multi-byte character moves back to its start.

use once_cell::sync::Lazy;
use regex::Regex;

/// The last word that looks like filter syntax. Most terms need three typed
/// characters; `#` hashtags suggest immediately. Word characters and
/// boundaries are ASCII-only.
static LAST_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?-u:\b)(?-u:[\w:"'<=>]){3,}$|#(?-u:\w)*$"#).expect("valid last-word pattern")
});

/// A term that ends with a closing, not opening, quote.
static CLOSING_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?-u:\w)["']$"#).expect("valid closing-quote pattern"));

/// The term being edited and where it sits in the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedTerm {
    /// Byte offset where the term starts.
    pub match_start: usize,
    /// The term text.
    pub term: String,
    /// Byte offset just past the term; the caret after seeking to the end of
    /// the current part.
    pub end: usize,
}

impl IsolatedTerm {
    /// Rebuild `query` with this term replaced by `replacement`.
    pub fn replace_in(&self, query: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(query.len() + replacement.len());
        out.push_str(&query[..self.match_start]);
        out.push_str(replacement);
        out.push_str(&query[self.end..]);
        out
    }
}

/// Find the term being typed at `caret`.
///
/// The caret first seeks forward to the next whitespace, `)` or the end of the
/// query, so editing the middle of a word still completes the whole word.
/// Returns `None` when nothing there looks like a filter, or when the term is
/// a finished quoted value.
pub fn isolate_term(query: &str, caret: usize) -> Option<IsolatedTerm> {
    if query.is_empty() {
        return None;
    }

    let caret = floor_char_boundary(query, caret);
    let end = query[caret..]
        .find(|c: char| c.is_whitespace() || c == ')')
        .map_or(query.len(), |i| caret + i);

    let found = LAST_WORD.find(&query[..end])?;
    let term = found.as_str();
    if CLOSING_QUOTE.is_match(term) {
        return None;
    }

    Some(IsolatedTerm {
        match_start: found.start(),
        term: term.to_string(),
        end,
    })
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
