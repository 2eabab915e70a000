//! Rendition CLI - review machine translation candidates.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Serve {
            sentences,
            store,
            prompt,
            port,
            no_open,
            llm,
            model,
        } => commands::serve::run(
            sentences, store, prompt, port, no_open, llm, model, cli.verbose,
        ),

        Commands::Diff {
            source,
            candidate,
            chars,
            no_cleanup,
            json,
        } => commands::diff::run(source, candidate, chars, no_cleanup, json, cli.verbose),

        Commands::Translate {
            sentence,
            llm,
            model,
            fallback,
            store,
        } => commands::translate::run(sentence, llm, model, fallback, store, cli.verbose),

        Commands::Status {
            sentences,
            store,
            json,
        } => commands::status::run(sentences, store, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
