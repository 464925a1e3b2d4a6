use std::fmt::Debug;
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use quiz_helper_core::config::HelperConfig;
use quiz_helper_core::dataset::{sha256_file, FileDataset};
use quiz_helper_core::matcher::{AnswerSetScore, MatchOutcome};
use quiz_helper_core::page::PageScraper;
use quiz_helper_core::session::HelperSession;
use serde::Serialize;

use crate::commands::{
    load_config_or_default, load_page, resolve_dataset_path, ConsoleHighlighter, LoadedPage,
};

/// Machine-readable summary of one `match` invocation.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub outcome: String,
    pub question: Option<String>,
    pub correct_answer: Option<String>,
    pub element_handle: Option<serde_json::Value>,
    pub element_text: Option<String>,
    pub scores: Vec<AnswerSetScore>,
    pub dataset: String,
    pub dataset_sha256: Option<String>,
    pub started_at: String,
    pub finished_at: String,
}

impl MatchReport {
    pub fn from_outcome<H: Serialize>(
        outcome: &MatchOutcome<H>,
        dataset: &Path,
        started_at: String,
    ) -> Self {
        let correct_answer = match outcome {
            MatchOutcome::NoElement { correct_answer, .. } => Some(correct_answer.clone()),
            other => other
                .entry()
                .and_then(|entry| entry.correct_answer_text().ok())
                .map(str::to_string),
        };
        Self {
            outcome: outcome.kind().to_string(),
            question: outcome.entry().map(|entry| entry.question.clone()),
            correct_answer,
            element_handle: outcome
                .element()
                .and_then(|element| serde_json::to_value(&element.handle).ok()),
            element_text: outcome.element().map(|element| element.raw_text.trim().to_string()),
            scores: outcome.scores().to_vec(),
            dataset: dataset.display().to_string(),
            dataset_sha256: sha256_file(dataset).ok(),
            started_at,
            finished_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Run a single session against `page`: load, match, highlight, tear down.
pub fn run_match<P>(
    config: &HelperConfig,
    dataset: &FileDataset,
    page: &P,
    wait: bool,
) -> MatchOutcome<P::Handle>
where
    P: PageScraper,
    P::Handle: Debug,
{
    let mut session = HelperSession::new(ConsoleHighlighter::<P::Handle>::new(), config);
    if wait {
        session = session.with_wait(config.wait_options());
    }
    let outcome = session.process(dataset, page);
    session.teardown();
    outcome
}

/// Match the question on a saved page against the reference dataset.
///
/// Only unreadable inputs (page, config) fail the command; every matching outcome,
/// including "nothing found", exits successfully.
pub fn match_command(
    dataset: Option<&str>,
    page: &str,
    config: Option<&str>,
    wait: bool,
    json: bool,
) -> Result<()> {
    let config = load_config_or_default(config)?;
    let dataset_path = resolve_dataset_path(dataset, &config)?;
    let source = FileDataset::new(&dataset_path);
    let started_at = Utc::now().to_rfc3339();

    let report = match load_page(Path::new(page), config.min_question_len)? {
        LoadedPage::Html(html) => {
            let outcome = run_match(&config, &source, &html, wait);
            MatchReport::from_outcome(&outcome, &dataset_path, started_at)
        }
        LoadedPage::Snapshot(snapshot) => {
            let outcome = run_match(&config, &source, &snapshot, wait);
            MatchReport::from_outcome(&outcome, &dataset_path, started_at)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &MatchReport) {
    println!("Outcome: {}", report.outcome);
    if let Some(question) = &report.question {
        println!("Question: {}", question);
    }
    if let Some(answer) = &report.correct_answer {
        println!("Correct answer: {}", answer);
    }
    match (&report.element_handle, &report.element_text) {
        (Some(handle), Some(text)) => println!("Element: {} \"{}\"", handle, text),
        _ => println!("Element: (none)"),
    }
    if !report.scores.is_empty() {
        println!("Duplicate scores:");
        for score in &report.scores {
            println!(
                "  - entry {}: {}/{} ({:.1}%){}",
                score.entry_index,
                score.match_score,
                score.total_answers,
                score.match_percentage * 100.0,
                if score.eligible { " eligible" } else { "" }
            );
        }
    }
}
