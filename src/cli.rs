//! CLI commands for querycomplete.
//!
//! Runs the suggestion pipeline against a vocabulary file and a history
//! snapshot: suggest, complete, recent.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::{complete, help_text, Autocompleter};
use crate::services::{load_history, rank_recent, Catalog, SearchHistoryEntry, Vocabulary};

#[derive(Parser)]
#[command(name = "querycomplete")]
#[command(about = "Autocomplete for structured search queries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/querycomplete/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Filter vocabulary file, overrides the config
    #[arg(long, global = true, value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Description catalog file, overrides the config
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Search history file (JSON), overrides the config
    #[arg(long, global = true, value_name = "FILE")]
    pub history: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the full suggestion list for a query
    Suggest {
        query: String,

        /// Caret byte offset (default: end of query)
        #[arg(long)]
        caret: Option<usize>,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Complete a single filter term
    Complete { term: String },

    /// Rank saved and recent searches
    Recent {
        #[arg(default_value = "")]
        query: String,
    },
}

/// Inputs resolved from config and command-line overrides.
struct Inputs {
    config: Config,
    vocabulary: Vocabulary,
    catalog: Catalog,
    history: Vec<SearchHistoryEntry>,
}

impl Inputs {
    fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load(),
        };

        let vocabulary_path = cli
            .vocabulary
            .clone()
            .or_else(|| config.general.vocabulary_path());
        let vocabulary = match vocabulary_path {
            Some(path) => Vocabulary::load(&path)
                .with_context(|| format!("Failed to load vocabulary {}", path.display()))?,
            None => {
                tracing::warn!("no vocabulary configured, term completion disabled");
                Vocabulary::new()
            }
        };

        let catalog = match cli.catalog.clone().or_else(|| config.general.catalog_path()) {
            Some(path) => Catalog::load(&path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => Catalog::new(),
        };

        let history = match cli.history.clone().or_else(|| config.general.history_path()) {
            Some(path) => load_history(&path)
                .with_context(|| format!("Failed to load history {}", path.display()))?,
            None => Vec::new(),
        };

        Ok(Self {
            config,
            vocabulary,
            catalog,
            history,
        })
    }
}

/// Run the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let inputs = Inputs::resolve(&cli)?;

    match cli.command {
        Commands::Suggest { query, caret, json } => {
            let caret = caret.unwrap_or(query.len());
            let max = inputs.config.behavior.max_suggestions as usize;
            let autocompleter = Autocompleter::with_localizer(inputs.vocabulary, inputs.catalog)
                .max_suggestions(max);
            let items = autocompleter.build_suggestions(&query, caret, &inputs.history);

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in &items {
                    let kind = format!("{:?}", item.kind);
                    match &item.help_text {
                        Some(help) => println!("{:<10} {}  ({})", kind, item.query, help),
                        None => println!("{:<10} {}", kind, item.query),
                    }
                }
            }
        }
        Commands::Complete { term } => {
            for word in complete(&term, &inputs.vocabulary) {
                match help_text(&word, &inputs.vocabulary, &inputs.catalog) {
                    Some(help) => println!("{}  ({})", word, help),
                    None => println!("{}", word),
                }
            }
        }
        Commands::Recent { query } => {
            for item in rank_recent(&query, &inputs.history) {
                let kind = format!("{:?}", item.kind);
                println!("{:<10} {}", kind, item.query);
            }
        }
    }

    Ok(())
}
