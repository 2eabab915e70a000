//! Translate command - generate candidates for one sentence.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rendition::{MemoryStore, ModelSelector, Rendition, TranslationStore};

use super::{build_provider, colorize, open_store};
use crate::cli::LlmProviderChoice;

pub fn run(
    sentence: String,
    llm: LlmProviderChoice,
    model: Option<String>,
    fallback: bool,
    store: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = build_provider(&llm, model)?;
    let store: Arc<dyn TranslationStore> = match &store {
        Some(path) => open_store(path),
        None => Arc::new(MemoryStore::new()),
    };
    let selector = if fallback {
        ModelSelector::Fallback
    } else {
        ModelSelector::Primary
    };

    if verbose {
        println!(
            "Using {} ({})",
            provider.name(),
            provider.config().model_for(selector)
        );
        println!("Examples from store: {}", store.entries()?.len());
        println!();
    }

    let rendition = Rendition::new(provider, store);
    let session = rendition.review(&sentence, Vec::new(), selector)?;

    println!("{} {}", "Source:".cyan().bold(), sentence.white());
    println!();

    if session.is_empty() {
        println!("{}", "No candidates returned.".yellow());
        return Ok(());
    }

    for item in session.items() {
        let changes = item.render().change_count();
        let tag = if changes == 0 {
            "same".green()
        } else {
            format!("{} changes", changes).yellow()
        };
        println!("  {} [{}]", format!("#{}", item.index() + 1).white().bold(), tag);
        println!("    {}", item.text());
        if changes > 0 {
            println!("    {}", colorize(item.segments()));
        }
        println!();
    }

    Ok(())
}
