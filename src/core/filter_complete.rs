//! Filter keyword completion.
//!
//! Given a partially typed term, pick matching keywords from the vocabulary and
//! rank them by how likely the user is to want each one. Ranking is a chain of
//! comparators; the first one that tells two keywords apart decides.

use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::services::vocabulary::{FilterVocabulary, Localizer};

/// Keywords ending in a bare comparison operator.
static TRAILING_COMPARISON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[<>]=?$").expect("valid comparison pattern"));

/// Matches a keyword that's probably a math comparison.
static MATH_CHECK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d<>=]").expect("valid math pattern"));

/// How typed text is compared against keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    StartsWith,
    Contains,
}

/// What the user has typed, normalized for matching.
struct TypedTerm<'a> {
    /// The term exactly as typed.
    raw: &'a str,
    /// Lower-cased copy of the full term.
    lower: String,
    /// Lower-cased text keywords are matched against. For freeform filters
    /// this is only the part after the filter name.
    needle: String,
    /// Filter name every keyword must start with (freeform filters only).
    must_start_with: String,
}

impl<'a> TypedTerm<'a> {
    fn new(raw: &'a str, freeform_prefixes: &[String]) -> Self {
        let lower = raw.to_lowercase();

        // Freeform values may contain quotes and colons, so only the filter
        // name is pinned and the rest is matched on its own.
        // `name:test` still finds `name:"test item"`.
        let is_freeform = freeform_prefixes.iter().any(|p| lower.starts_with(p.as_str()));
        let (must_start_with, needle) = if is_freeform {
            match lower.split_once(':') {
                Some((name, rest)) => (name.to_string(), rest.to_string()),
                None => (String::new(), lower.clone()),
            }
        } else {
            (String::new(), lower.clone())
        };

        Self {
            raw,
            lower,
            needle,
            must_start_with,
        }
    }

    /// Once a colon is typed outside a freeform filter we are walking a known
    /// path, so only match from the start: "stat:" matches "stat:" but not
    /// "basestat:", while "stat" matches both.
    fn match_mode(&self) -> MatchMode {
        if self.must_start_with.is_empty() && self.needle.contains(':') {
            MatchMode::StartsWith
        } else {
            MatchMode::Contains
        }
    }

    fn matches(&self, word: &str, mode: MatchMode) -> bool {
        word.starts_with(self.must_start_with.as_str())
            && match mode {
                MatchMode::StartsWith => word.starts_with(self.needle.as_str()),
                MatchMode::Contains => word.contains(self.needle.as_str()),
            }
    }

    /// Suggestion space is tight, so `not:` and bare comparison keywords only
    /// show up when the user seems to be heading for them.
    fn allows_low_priority(&self, word: &str) -> bool {
        let wants_not = self.lower.starts_with("not");
        let wants_math = self.lower.ends_with(':') || self.lower.ends_with('<');

        (wants_not || !word.starts_with("not:"))
            && (wants_math || !TRAILING_COMPARISON.is_match(word))
    }

    /// Filter name segment of what was typed.
    fn filter_name(&self) -> &str {
        self.lower.split(':').next().unwrap_or("")
    }
}

/// Complete a typed term against the vocabulary's keywords.
///
/// Matching is case-insensitive. Unless the typed filter name is an exact
/// filter, the result never repeats what was typed.
pub fn complete<V: FilterVocabulary + ?Sized>(typed: &str, vocab: &V) -> Vec<String> {
    if typed.is_empty() {
        return Vec::new();
    }

    let term = TypedTerm::new(typed, vocab.freeform_prefixes());
    let mode = term.match_mode();

    let mut candidates: Vec<&str> = vocab
        .suggestions()
        .iter()
        .map(String::as_str)
        .filter(|word| term.matches(word, mode))
        .filter(|word| term.allows_low_priority(word))
        .collect();

    candidates.sort_by(|a, b| compare_candidates(a, b, &term.needle));

    tracing::trace!(typed, candidates = candidates.len(), ?mode, "filter completion");

    if vocab.is_exact_filter(term.filter_name()) {
        return candidates.into_iter().map(str::to_string).collect();
    }

    // The literal query is always offered separately, so don't repeat it here.
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|word| *word != term.raw && *word != term.lower)
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

type RankKey = fn(&str, &str) -> i64;

/// Ranking criteria, most important first. Each maps a keyword (and the
/// typed text) to a key; lower keys sort first.
const RANKING: [RankKey; 7] = [
    segment_start,
    remaining_to_type,
    tag_first,
    incomplete_first,
    discouraged_last,
    fewer_segments_first,
    plain_before_math,
];

/// Compare two keywords with the ranking chain.
pub fn compare_candidates(a: &str, b: &str, typed: &str) -> Ordering {
    RANKING
        .iter()
        .map(|key| key(a, typed).cmp(&key(b, typed)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// The user is probably typing the start of a term or segment, not the
/// middle: "arm" puts "is:armor" before "is:sidearm". Deep keywords like
/// "stat:rpm:" go last.
fn segment_start(word: &str, typed: &str) -> i64 {
    if colon_count(word) > 1 {
        return 1;
    }

    let segment_start = word.find(':').map_or(0, |i| i + 1);
    if word.starts_with(typed) || word.find(typed) == Some(segment_start) {
        -1
    } else {
        0
    }
}

/// For is/not, less left to type goes first: "is:armor" before "is:armormod".
/// Other value lists keep their order.
fn remaining_to_type(word: &str, typed: &str) -> i64 {
    if !(word.starts_with("is:") || word.starts_with("not:")) {
        return 0;
    }
    let found_at = word.find(typed).map_or(-1, |i| i as i64);
    word.len() as i64 - (typed.len() as i64 + found_at)
}

/// Tags are user content and matter most.
fn tag_first(word: &str, _typed: &str) -> i64 {
    (!word.starts_with("tag:")) as i64
}

/// Keywords ending in ':' can be extended further.
fn incomplete_first(word: &str, _typed: &str) -> i64 {
    (!word.ends_with(':')) as i64
}

/// "not" is discouraged; "<=" and ">=" are easy to find from "<" and ">".
fn discouraged_last(word: &str, _typed: &str) -> i64 {
    (word.starts_with("not:") || word.ends_with("<=") || word.ends_with(">=")) as i64
}

/// "stat:" before "stat:magazine:". `is:` keywords count as top level.
fn fewer_segments_first(word: &str, _typed: &str) -> i64 {
    if word.starts_with("is:") {
        0
    } else {
        colon_count(word) as i64
    }
}

fn plain_before_math(word: &str, _typed: &str) -> i64 {
    MATH_CHECK.is_match(word) as i64
}

fn colon_count(s: &str) -> usize {
    s.bytes().filter(|&b| b == b':').count()
}

/// Help text for a completed keyword, if the vocabulary describes its filter.
///
/// `is:` keywords are described per value; everything else by filter name.
/// A single trailing period is dropped.
pub fn help_text<V: FilterVocabulary + ?Sized>(
    word: &str,
    vocab: &V,
    localizer: &dyn Localizer,
) -> Option<String> {
    let mut parts = word.split(':');
    let filter_name = parts.next().unwrap_or("");

    let description = if filter_name == "is" {
        vocab.is_filter(parts.next().unwrap_or(""))
    } else {
        vocab.kv_filter(filter_name)
    }?;

    let text = description.resolve(localizer);
    Some(text.strip_suffix('.').map(str::to_string).unwrap_or(text))
}
