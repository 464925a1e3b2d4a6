use std::path::Path;

use anyhow::{anyhow, Context, Result};
use quiz_helper_core::dataset::{
    duplicate_groups, integrity_errors, load_dataset, sha256_file, DuplicateGroup,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IntegrityIssue {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DatasetCheck {
    pub path: String,
    pub sha256: String,
    pub entries: usize,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub integrity_errors: Vec<IntegrityIssue>,
}

/// Load a dataset strictly and report duplicates and integrity problems.
///
/// With `strict`, any integrity error fails the command.
pub fn check_dataset_command(dataset: &str, json: bool, strict: bool) -> Result<()> {
    let path = Path::new(dataset);
    let entries = load_dataset(path).context("Failed to load dataset")?;
    let sha256 = sha256_file(path).context("Failed to hash dataset")?;

    let check = DatasetCheck {
        path: path.display().to_string(),
        sha256,
        entries: entries.len(),
        duplicate_groups: duplicate_groups(&entries),
        integrity_errors: integrity_errors(&entries)
            .into_iter()
            .map(|(index, err)| IntegrityIssue { index, message: err.to_string() })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        println!("Dataset: {}", check.path);
        println!("SHA-256: {}", check.sha256);
        println!("Entries: {}", check.entries);
        println!("Duplicate question groups ({}):", check.duplicate_groups.len());
        if check.duplicate_groups.is_empty() {
            println!("  (none)");
        }
        for group in &check.duplicate_groups {
            println!("  - \"{}\" at {:?}", group.normalized_question, group.indices);
        }
        println!("Integrity errors ({}):", check.integrity_errors.len());
        if check.integrity_errors.is_empty() {
            println!("  (none)");
        }
        for issue in &check.integrity_errors {
            println!("  - #{}: {}", issue.index, issue.message);
        }
    }

    if strict && !check.integrity_errors.is_empty() {
        return Err(anyhow!("Dataset has {} integrity error(s)", check.integrity_errors.len()));
    }

    Ok(())
}
