//! querycomplete - command-line front end.
//!
//! Usage:
//!   querycomplete --vocabulary vocab.toml suggest "is:arm"
//!   querycomplete --history history.json recent tag

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "querycomplete=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = querycomplete::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
