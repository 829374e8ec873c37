//! Filter vocabulary: the known filter keywords and their descriptions.
//!
//! The completion engine only sees the [`FilterVocabulary`] trait. [`Vocabulary`]
//! is the stock implementation, built from filter definitions that are usually
//! loaded from a TOML file:
//!
//! ```toml
//! suggestions = ["inloadout"]
//!
//! [[filters]]
//! keywords = ["armor", "weapon"]
//! description = "Filter.Category"
//! format = "simple"
//!
//! [[filters]]
//! keywords = ["stat"]
//! description = ["Filter.Stat", "base"]
//! format = "stat"
//! suggestions = ["rpm", "range"]
//! exact = true
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SuggestError, SuggestResult};

/// Comparison operators appended to range-style keywords.
const COMPARISON_OPERATORS: [&str; 5] = ["<", ">", "<=", ">=", "="];

/// Filter names that always take a fixed value list.
const ALWAYS_EXACT: [&str; 2] = ["is", "not"];

/// Read-only lookups the completion engine needs from a vocabulary.
pub trait FilterVocabulary {
    /// Every known keyword, in preferred order (e.g. `is:armor`, `stat:`).
    fn suggestions(&self) -> &[String];

    /// Description of an `is:<value>` filter.
    fn is_filter(&self, value: &str) -> Option<&Description>;

    /// Description of a `<name>:` key-value filter.
    fn kv_filter(&self, name: &str) -> Option<&Description>;

    /// Prefixes (keyword plus colon) of filters whose values are free text.
    fn freeform_prefixes(&self) -> &[String];

    /// Whether typing this filter name should stop de-duplication against
    /// the typed text.
    fn is_exact_filter(&self, name: &str) -> bool;
}

/// A description payload: a translation key, optionally with arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// A plain translation key.
    Key(String),
    /// A translation key followed by substitution arguments.
    Template(Vec<String>),
}

impl Description {
    /// Translation key of this payload.
    pub fn key(&self) -> &str {
        match self {
            Description::Key(key) => key,
            Description::Template(parts) => parts.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Substitution arguments (empty for plain keys).
    pub fn args(&self) -> &[String] {
        match self {
            Description::Key(_) => &[],
            Description::Template(parts) => parts.get(1..).unwrap_or(&[]),
        }
    }

    /// Resolve this payload to display text.
    pub fn resolve(&self, localizer: &dyn Localizer) -> String {
        localizer.translate(self.key(), self.args())
    }
}

/// Resolves translation keys to display text.
pub trait Localizer {
    fn translate(&self, key: &str, args: &[String]) -> String;
}

/// A flat key -> template catalog.
///
/// Templates use positional `{0}`, `{1}` placeholders. Unknown keys resolve to
/// the key itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file of `key = "template"` pairs.
    pub fn load(path: &Path) -> SuggestResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Add or replace a template.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for Catalog {
    fn translate(&self, key: &str, args: &[String]) -> String {
        let Some(template) = self.entries.get(key) else {
            return key.to_string();
        };

        args.iter()
            .enumerate()
            .fold(template.clone(), |text, (i, arg)| {
                text.replace(&format!("{{{}}}", i), arg)
            })
    }
}

/// How a filter's keywords expand into suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterFormat {
    /// Boolean flags: `is:<kw>` and `not:<kw>`.
    #[default]
    Simple,
    /// `<kw>:` followed by one of a list of values.
    Query,
    /// `<kw>:` followed by arbitrary text.
    Freeform,
    /// `<kw>:` followed by a numeric comparison.
    Range,
    /// `<kw>:<stat>:` followed by a numeric comparison.
    Stat,
}

/// A single filter as declared by the vocabulary owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub keywords: Vec<String>,
    pub description: Description,
    #[serde(default)]
    pub format: FilterFormat,
    /// Known values, for `query` and `stat` filters.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Skip de-duplication against the typed text for this filter.
    #[serde(default)]
    pub exact: bool,
}

/// On-disk layout of a vocabulary file.
#[derive(Debug, Default, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    filters: Vec<FilterDefinition>,
}

/// Keyword tables generated from a set of filter definitions.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    suggestions: Vec<String>,
    seen: HashSet<String>,
    is_filters: HashMap<String, Description>,
    kv_filters: HashMap<String, Description>,
    freeform_prefixes: Vec<String>,
    exact_names: HashSet<String>,
}

impl Vocabulary {
    /// An empty vocabulary. Completion against it yields nothing.
    pub fn new() -> Self {
        Self {
            suggestions: Vec::new(),
            seen: HashSet::new(),
            is_filters: HashMap::new(),
            kv_filters: HashMap::new(),
            freeform_prefixes: Vec::new(),
            exact_names: ALWAYS_EXACT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build a vocabulary from filter definitions.
    pub fn from_filters(filters: impl IntoIterator<Item = FilterDefinition>) -> Self {
        let mut vocab = Self::new();
        for filter in filters {
            vocab.add_filter(filter);
        }
        vocab
    }

    /// Load a vocabulary from a TOML file.
    pub fn load(path: &Path) -> SuggestResult<Self> {
        let contents = fs::read_to_string(path)?;
        let file: VocabularyFile = toml::from_str(&contents)
            .map_err(|e| SuggestError::Vocabulary(format!("{}: {}", path.display(), e)))?;

        let mut vocab = Self::new();
        for keyword in file.suggestions {
            vocab.push_keyword(keyword);
        }
        for filter in file.filters {
            vocab.add_filter(filter);
        }

        tracing::debug!(
            keywords = vocab.suggestions.len(),
            path = %path.display(),
            "loaded filter vocabulary"
        );
        Ok(vocab)
    }

    /// Register a filter and generate its keywords.
    pub fn add_filter(&mut self, filter: FilterDefinition) {
        for keyword in &filter.keywords {
            let keyword = keyword.to_lowercase();

            match filter.format {
                FilterFormat::Simple => {
                    self.push_keyword(format!("is:{}", keyword));
                    self.push_keyword(format!("not:{}", keyword));
                    self.is_filters
                        .insert(keyword.clone(), filter.description.clone());
                }
                FilterFormat::Query => {
                    self.push_keyword(format!("{}:", keyword));
                    for value in &filter.suggestions {
                        self.push_keyword(format!("{}:{}", keyword, value.to_lowercase()));
                    }
                }
                FilterFormat::Freeform => {
                    self.push_keyword(format!("{}:", keyword));
                    self.freeform_prefixes.push(format!("{}:", keyword));
                    self.exact_names.insert(keyword.clone());
                }
                FilterFormat::Range => {
                    self.push_keyword(format!("{}:", keyword));
                    for op in COMPARISON_OPERATORS {
                        self.push_keyword(format!("{}:{}", keyword, op));
                    }
                }
                FilterFormat::Stat => {
                    self.push_keyword(format!("{}:", keyword));
                    for stat in &filter.suggestions {
                        let stat = stat.to_lowercase();
                        self.push_keyword(format!("{}:{}:", keyword, stat));
                        for op in COMPARISON_OPERATORS {
                            self.push_keyword(format!("{}:{}:{}", keyword, stat, op));
                        }
                    }
                }
            }

            if filter.format != FilterFormat::Simple {
                self.kv_filters
                    .insert(keyword.clone(), filter.description.clone());
            }
            if filter.exact {
                self.exact_names.insert(keyword);
            }
        }
    }

    /// Append a raw keyword, ignoring duplicates.
    pub fn push_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if self.seen.insert(keyword.clone()) {
            self.suggestions.push(keyword);
        }
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterVocabulary for Vocabulary {
    fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    fn is_filter(&self, value: &str) -> Option<&Description> {
        self.is_filters.get(value)
    }

    fn kv_filter(&self, name: &str) -> Option<&Description> {
        self.kv_filters.get(name)
    }

    fn freeform_prefixes(&self) -> &[String] {
        &self.freeform_prefixes
    }

    fn is_exact_filter(&self, name: &str) -> bool {
        self.exact_names.contains(name)
    }
}
