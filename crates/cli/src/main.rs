use anyhow::Result;
use clap::{Parser, Subcommand};
use quiz_helper::commands::{
    check_dataset_command, init_config_command, match_command, normalize_command,
    scrape_command, show_config_command, similarity_command,
};
use quiz_helper::init_tracing;
use quiz_helper_core::page::DEFAULT_MIN_QUESTION_LEN;

/// On-demand quiz answer spotter.
///
/// This CLI is a thin wrapper around `quiz-helper-core` (exposed in code as
/// `quiz_helper_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "quiz-helper",
    version,
    about = "Find the correct answer to the quiz question on a page",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match the question on a saved page against the reference dataset.
    ///
    /// The page is HTML, or a JSON snapshot (`{"question": ..., "candidates": [...]}`)
    /// when the file ends in `.json`.
    Match {
        /// Reference dataset (JSON array, or YAML for .yaml/.yml). Overrides the config.
        #[arg(long)]
        dataset: Option<String>,

        /// Saved page to inspect.
        #[arg(long)]
        page: String,

        /// Optional helper config file.
        #[arg(long)]
        config: Option<String>,

        /// Poll for the question up to the configured timeout.
        #[arg(long, default_value_t = false)]
        wait: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the normalized form of a string.
    Normalize {
        text: String,
    },

    /// Print the similarity ratio (0.0 to 1.0) between two strings.
    Similarity {
        a: String,
        b: String,
    },

    /// Load a dataset and report duplicate questions and integrity errors.
    CheckDataset {
        #[arg(long)]
        dataset: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Fail when any entry's correct answer id is missing from its answers.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Show the question and candidate elements scraped from a saved page.
    Scrape {
        #[arg(long)]
        page: String,

        /// Minimum trimmed length for text to count as a question.
        #[arg(long, default_value_t = DEFAULT_MIN_QUESTION_LEN)]
        min_question_len: usize,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write a config file with default settings.
    InitConfig {
        /// Where to write the config. Defaults to `quiz-helper.json`.
        #[arg(long, default_value = "quiz-helper.json")]
        path: String,

        /// Dataset path to record in the config.
        #[arg(long)]
        dataset: Option<String>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print the effective configuration.
    ShowConfig {
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Match { dataset, page, config, wait, json } => {
            match_command(dataset.as_deref(), &page, config.as_deref(), wait, json)?
        }
        Command::Normalize { text } => normalize_command(&text)?,
        Command::Similarity { a, b } => similarity_command(&a, &b)?,
        Command::CheckDataset { dataset, json, strict } => {
            check_dataset_command(&dataset, json, strict)?
        }
        Command::Scrape { page, min_question_len, json } => {
            scrape_command(&page, min_question_len, json)?
        }
        Command::InitConfig { path, dataset, force } => init_config_command(&path, dataset, force)?,
        Command::ShowConfig { config, json } => show_config_command(config.as_deref(), json)?,
    }

    Ok(())
}
