//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rendition: review machine translation candidates against their source
#[derive(Parser)]
#[command(name = "rendition")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the web UI to review translations sentence by sentence
    Serve {
        /// Text file with one source sentence per line
        #[arg(value_name = "SENTENCES")]
        sentences: PathBuf,

        /// Where accepted translations are written (.jsonl for JSON Lines)
        #[arg(short, long, default_value = "translation.txt")]
        store: PathBuf,

        /// File holding the translation instructions
        #[arg(long, default_value = "prompt.txt")]
        prompt: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// LLM provider used to generate candidates
        #[arg(long, default_value = "mock")]
        llm: LlmProviderChoice,

        /// Primary model to use (provider-specific, e.g., "gemini-2.5-flash", "qwen2.5")
        #[arg(long)]
        model: Option<String>,
    },

    /// Show how a candidate differs from its source
    Diff {
        /// Source sentence
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Candidate translation
        #[arg(value_name = "CANDIDATE")]
        candidate: String,

        /// Compare character by character instead of word by word
        #[arg(long)]
        chars: bool,

        /// Keep short equal runs between changes
        #[arg(long)]
        no_cleanup: bool,

        /// Output segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate candidates for one sentence and show their diffs
    Translate {
        /// Sentence to translate
        #[arg(value_name = "SENTENCE")]
        sentence: String,

        /// LLM provider used to generate candidates
        #[arg(long, default_value = "mock")]
        llm: LlmProviderChoice,

        /// Primary model to use (provider-specific)
        #[arg(long)]
        model: Option<String>,

        /// Use the fallback model instead of the primary one
        #[arg(long)]
        fallback: bool,

        /// Accepted translations to use as examples
        #[arg(short, long)]
        store: Option<PathBuf>,
    },

    /// Show translation progress for a sentence file
    Status {
        /// Text file with one source sentence per line
        #[arg(value_name = "SENTENCES")]
        sentences: PathBuf,

        /// Where accepted translations are written
        #[arg(short, long, default_value = "translation.txt")]
        store: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// LLM provider choice for candidate generation
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// Deterministic candidates, no network access
    #[default]
    Mock,
    /// Google Gemini API (requires GEMINI_API_KEY)
    Gemini,
    /// Ollama local models (requires Ollama running)
    Ollama,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            "gemini" | "google" => Ok(LlmProviderChoice::Gemini),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            _ => Err(format!(
                "Unknown provider: {}. Use: mock, gemini, or ollama.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::Mock => write!(f, "mock"),
            LlmProviderChoice::Gemini => write!(f, "gemini"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_provider_choice_parsing() {
        assert!(matches!("Gemini".parse(), Ok(LlmProviderChoice::Gemini)));
        assert!(matches!("local".parse(), Ok(LlmProviderChoice::Ollama)));
        assert!("openai".parse::<LlmProviderChoice>().is_err());
    }

    #[test]
    fn test_parse_diff_flags() {
        let cli = Cli::parse_from(["rendition", "-v", "diff", "a b", "a c", "--chars", "--json"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Diff {
                source,
                chars,
                no_cleanup,
                json,
                ..
            } => {
                assert_eq!(source, "a b");
                assert!(chars);
                assert!(!no_cleanup);
                assert!(json);
            }
            _ => panic!("expected diff command"),
        }
    }
}
