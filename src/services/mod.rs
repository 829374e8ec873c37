pub mod frecency;
pub mod history;
pub mod vocabulary;

pub use history::{load_history, rank_recent, rank_recent_at, SearchHistoryEntry};
pub use vocabulary::{
    Catalog, Description, FilterDefinition, FilterFormat, FilterVocabulary, Localizer, Vocabulary,
};
