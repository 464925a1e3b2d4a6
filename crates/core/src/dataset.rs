//! Reference dataset: known questions, their answer options, and the correct answer.
//!
//! The dataset is a static bundle (JSON array or YAML sequence) read fresh for every
//! matching invocation. Several entries may share the same question text; they are
//! told apart only by their answer sets.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::normalize::normalize;

/// Key into a [`ReferenceEntry`]'s answer mapping.
///
/// Datasets write ids either as strings (`"2"`) or bare integers (`2`); both compare
/// as the same string key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AnswerId(pub String);

impl AnswerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AnswerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => AnswerId(text),
            Raw::Number(n) => AnswerId(n.to_string()),
        })
    }
}

/// One known quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub question: String,
    /// Answer id to displayed answer text. Order carries no meaning.
    #[serde(default)]
    pub answers: BTreeMap<AnswerId, String>,
    /// Id of the correct answer; must key into `answers`.
    ///
    /// A missing or `null` id loads fine and is reported per entry by
    /// [`ReferenceEntry::correct_answer_text`].
    #[serde(rename = "answer", default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_id: Option<AnswerId>,
}

impl ReferenceEntry {
    pub fn new<I, K, V>(question: &str, answers: I, correct_answer_id: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            question: question.to_string(),
            answers: answers
                .into_iter()
                .map(|(id, text)| (AnswerId(id.into()), text.into()))
                .collect(),
            correct_answer_id: Some(AnswerId::new(correct_answer_id)),
        }
    }

    /// Text of the correct answer.
    ///
    /// Fails when the id is absent or dangling, and when the answer text has nothing
    /// left after normalization (it would equal any symbol-only element on the page).
    pub fn correct_answer_text(&self) -> Result<&str, IntegrityError> {
        let Some(answer_id) = &self.correct_answer_id else {
            return Err(IntegrityError::NoCorrectAnswer { question: self.question.clone() });
        };
        let text = self.answers.get(answer_id).ok_or_else(|| {
            IntegrityError::MissingCorrectAnswer {
                question: self.question.clone(),
                answer_id: answer_id.clone(),
            }
        })?;
        if normalize(text).is_empty() {
            return Err(IntegrityError::BlankCorrectAnswer {
                question: self.question.clone(),
                answer_id: answer_id.clone(),
            });
        }
        Ok(text.as_str())
    }
}

/// Data-integrity problems inside a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("\"{question}\" has no correct answer id")]
    NoCorrectAnswer { question: String },
    #[error("correct answer id '{answer_id}' is not among the answers of \"{question}\"")]
    MissingCorrectAnswer { question: String, answer_id: AnswerId },
    #[error("correct answer '{answer_id}' of \"{question}\" has no comparable text")]
    BlankCorrectAnswer { question: String, answer_id: AnswerId },
}

/// Errors raised while reading or parsing a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse dataset YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// On-disk encoding of a dataset or config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format from the file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

pub fn parse_dataset(
    body: &str,
    format: FileFormat,
) -> Result<Vec<ReferenceEntry>, DatasetError> {
    Ok(match format {
        FileFormat::Json => serde_json::from_str(body)?,
        FileFormat::Yaml => serde_yaml::from_str(body)?,
    })
}

/// Read and parse the dataset at `path`, surfacing every failure.
pub fn load_dataset(path: &Path) -> Result<Vec<ReferenceEntry>, DatasetError> {
    let body = fs::read_to_string(path)
        .map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?;
    let entries = parse_dataset(&body, FileFormat::from_path(path))?;
    tracing::debug!("Loaded {} questions from {}", entries.len(), path.display());
    Ok(entries)
}

/// Where a session gets its reference dataset from.
pub trait DatasetSource {
    fn load(&self) -> Result<Vec<ReferenceEntry>, DatasetError>;

    /// Load, treating any failure as an empty dataset.
    fn load_or_empty(&self) -> Vec<ReferenceEntry> {
        match self.load() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Failed to load questions, continuing with none: {err}");
                Vec::new()
            }
        }
    }
}

/// Dataset bundled as a file on disk.
#[derive(Debug, Clone)]
pub struct FileDataset {
    pub path: PathBuf,
}

impl FileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileDataset {
    fn load(&self) -> Result<Vec<ReferenceEntry>, DatasetError> {
        load_dataset(&self.path)
    }
}

impl DatasetSource for [ReferenceEntry] {
    fn load(&self) -> Result<Vec<ReferenceEntry>, DatasetError> {
        Ok(self.to_vec())
    }
}

impl DatasetSource for Vec<ReferenceEntry> {
    fn load(&self) -> Result<Vec<ReferenceEntry>, DatasetError> {
        Ok(self.clone())
    }
}

/// Entries sharing one normalized question text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub normalized_question: String,
    /// Dataset positions, in dataset order.
    pub indices: Vec<usize>,
}

/// Group entries whose questions normalize to the same text; singletons are omitted.
///
/// Groups are ordered by the position of their first member.
pub fn duplicate_groups(entries: &[ReferenceEntry]) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut by_question: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, entry) in entries.iter().enumerate() {
        let key = normalize(&entry.question);
        match by_question.get(&key) {
            Some(&group) => groups[group].indices.push(idx),
            None => {
                by_question.insert(key.clone(), groups.len());
                groups.push(DuplicateGroup { normalized_question: key, indices: vec![idx] });
            }
        }
    }

    groups.retain(|g| g.indices.len() > 1);
    groups
}

/// Every entry whose correct answer id is dangling, with its dataset position.
pub fn integrity_errors(entries: &[ReferenceEntry]) -> Vec<(usize, IntegrityError)> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| entry.correct_answer_text().err().map(|err| (idx, err)))
        .collect()
}

/// Compute the SHA-256 hash of a dataset file and return it as a hex string.
pub fn sha256_file(path: &Path) -> Result<String, DatasetError> {
    let io_err = |source| DatasetError::Io { path: path.to_path_buf(), source };
    let file = fs::File::open(path).map_err(io_err)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf).map_err(io_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
