//! Serve command - open the web UI for interactive review.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rendition::{FilePrompt, SentenceList};

use super::{build_provider, open_store};
use crate::cli::LlmProviderChoice;
use crate::server::{app, state::AppState};

#[allow(clippy::too_many_arguments)]
pub fn run(
    sentences: PathBuf,
    store_path: PathBuf,
    prompt_path: PathBuf,
    port: u16,
    no_open: bool,
    llm: LlmProviderChoice,
    model: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !sentences.exists() {
        return Err(format!("Sentence file not found: {}", sentences.display()).into());
    }

    let store = open_store(&store_path);
    let list = SentenceList::load(&sentences)?.with_store(Arc::clone(&store));
    if list.is_empty() {
        println!(
            "{} {} has no sentences",
            "Note:".yellow(),
            sentences.display()
        );
    }
    let total = list.len();

    let provider = build_provider(&llm, model)?;
    if verbose {
        println!(
            "Loaded {} sentences, {} accepted translations",
            total,
            store.entries()?.len()
        );
    }

    let provider_name = provider.name().to_string();
    let state = AppState::new(
        provider,
        store,
        Box::new(list),
        Arc::new(FilePrompt::new(&prompt_path)),
    );

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Sentences: {} ({})", sentences.display(), total);
    println!("  Store:     {}", store_path.display());
    println!("  Prompt:    {}", prompt_path.display());
    println!("  Provider:  {}", provider_name);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    // Blocking HTTP clients must not be dropped on a runtime thread, so the
    // last handle to the provider is released out here.
    let held = state.clone();
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(app::run_server(state, port));
    drop(runtime);
    drop(held);
    result?;

    println!("{}", "Shutting down...".yellow());
    Ok(())
}
