//! Status command - show translation progress for a sentence file.

use std::collections::HashSet;
use std::path::PathBuf;

use colored::Colorize;
use rendition::SentenceList;

use super::open_store;

pub fn run(
    sentences: PathBuf,
    store_path: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !sentences.exists() {
        return Err(format!("Sentence file not found: {}", sentences.display()).into());
    }

    let store = open_store(&store_path);
    let entries = store.entries()?;
    let list = SentenceList::load(&sentences)?;

    let done: HashSet<&str> = entries.iter().map(|e| e.original.as_str()).collect();
    let remaining: Vec<&str> = list
        .sentences()
        .iter()
        .map(String::as_str)
        .filter(|s| !done.contains(s))
        .collect();

    let total = list.len();
    let completed = total - remaining.len();
    let progress = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };

    if json_output {
        let status = serde_json::json!({
            "sentences": sentences.display().to_string(),
            "store": store_path.display().to_string(),
            "total": total,
            "completed": completed,
            "remaining": remaining.len(),
            "accepted_entries": entries.len(),
            "progress": progress,
            "is_complete": remaining.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Translation status for".cyan().bold(),
        sentences.display().to_string().white()
    );
    println!();

    let bar_width = 30;
    let filled = (progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Progress: {} {}/{} ({:.0}%)",
        bar.cyan(),
        completed.to_string().white().bold(),
        total,
        progress * 100.0
    );
    println!();

    println!("{}", "Store:".yellow().bold());
    println!("  Path:     {}", store_path.display());
    println!("  Entries:  {}", entries.len().to_string().green());
    println!("  Missing:  {}", remaining.len().to_string().red());
    println!();

    if verbose && !remaining.is_empty() {
        println!("{}", "Untranslated:".yellow().bold());
        for sentence in &remaining {
            println!("  {}", sentence.dimmed());
        }
        println!();
    }

    if remaining.is_empty() {
        println!("{}", "All sentences have a translation!".green().bold());
    } else {
        println!(
            "Run {} to continue reviewing.",
            format!("rendition serve {}", sentences.display())
                .cyan()
                .bold()
        );
    }

    Ok(())
}
