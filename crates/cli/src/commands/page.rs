use std::path::Path;

use anyhow::Result;
use quiz_helper_core::page::PageSnapshot;

use crate::commands::{load_page, LoadedPage};

/// Show what the scraper sees on a saved page: the question and the candidates.
pub fn scrape_command(page: &str, min_question_len: usize, json: bool) -> Result<()> {
    let snapshot = match load_page(Path::new(page), min_question_len)? {
        LoadedPage::Html(html) => PageSnapshot::capture(&html),
        LoadedPage::Snapshot(snapshot) => PageSnapshot::capture(&snapshot),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    match &snapshot.question {
        Some(question) => println!("Question: {}", question.trim()),
        None => println!("Question: (none found)"),
    }
    println!("Candidates ({}):", snapshot.candidates.len());
    if snapshot.candidates.is_empty() {
        println!("  (none)");
    }
    for (idx, text) in snapshot.candidates.iter().enumerate() {
        println!("  {:>3}. {}", idx, text.trim());
    }

    Ok(())
}
