use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use portcullis_cli::{execute, normalize_verb, Cli};
use portcullis_engine::{Authorizer, Registry};
use portcullis_store::JsonFileStore;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = normalize_verb(std::env::args_os().collect());
    let cli = Cli::parse_from(args);

    let store = Arc::new(
        JsonFileStore::open(cli.db.clone())
            .with_context(|| format!("failed to open record store at {}", cli.db.display()))?,
    );
    let registry = Registry::new(store.clone());
    let authorizer = Authorizer::new(store);

    let line = execute(&cli.command, &registry, &authorizer)?;
    println!("{line}");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // Logs go to stderr; stdout carries only the status line.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
