//! Diff command - show how a candidate differs from its source.

use colored::Colorize;
use rendition::diff::{compare, render, CleanupOptions, DiffOptions, Granularity, SegmentKind};

use super::colorize;

pub fn run(
    source: String,
    candidate: String,
    chars: bool,
    no_cleanup: bool,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = DiffOptions::default();
    if chars {
        options = options.with_granularity(Granularity::Char);
    }
    if no_cleanup {
        options = options.with_cleanup(CleanupOptions::none());
    }

    let segments = compare(&source, &candidate, &options);

    if json_output {
        let output = serde_json::json!({
            "source": source,
            "candidate": candidate,
            "segments": segments,
            "html": render(&segments).to_html(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let changes = segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Equal)
        .count();

    if changes == 0 {
        println!("{}", "No differences.".green());
        return Ok(());
    }

    println!("  {}", colorize(&segments));

    if verbose {
        println!();
        for segment in &segments {
            println!("  {:>8}  {:?}", segment.kind.label().dimmed(), segment.text);
        }
    }

    println!();
    println!(
        "{} changed segment{}",
        changes.to_string().white().bold(),
        if changes == 1 { "" } else { "s" }
    );

    Ok(())
}
