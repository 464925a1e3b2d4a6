//! Question matching and answer-set disambiguation.
//!
//! Matching runs in three steps:
//! 1. Exact lookup of the normalized question text in the dataset.
//! 2. When several entries share that text, pick the one whose answer set best
//!    overlaps the answers rendered on the page.
//! 3. Resolve the matched entry's correct answer to the on-page element with exactly
//!    the same normalized text.
//!
//! Every failure is a normal outcome: nothing here returns an error or panics on
//! bad data. [`MatchOutcome`] names the reason a match came back empty.

use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::{IntegrityError, ReferenceEntry};
use crate::normalize::normalize;
use crate::page::PageElement;

/// Overlapping answers that make a duplicate entry eligible on their own.
pub const MIN_OVERLAP_COUNT: usize = 2;
/// Share of an entry's answers present on the page that makes it eligible on its own.
pub const MIN_OVERLAP_RATIO: f64 = 0.6;

/// Overlap between one dataset entry's answers and the page's candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSetScore {
    /// Position of the entry in the dataset.
    pub entry_index: usize,
    pub match_score: usize,
    pub total_answers: usize,
    pub match_percentage: f64,
    pub eligible: bool,
}

/// Why a match succeeded or came back empty.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<H> {
    /// The page shows no question.
    NoQuestion,
    /// No dataset entry has this question text.
    NoEntry,
    /// Several entries share the question but none overlaps the page enough.
    NoEligibleDuplicate { scores: Vec<AnswerSetScore> },
    /// The matched entry's correct answer id is not among its own answers.
    MissingCorrectAnswer { entry: ReferenceEntry, error: IntegrityError },
    /// No candidate's text exactly equals the correct answer.
    NoElement { entry: ReferenceEntry, correct_answer: String },
    Matched {
        entry: ReferenceEntry,
        element: PageElement<H>,
        /// Disambiguation scores; empty when the question text was unique.
        scores: Vec<AnswerSetScore>,
    },
}

impl<H> MatchOutcome<H> {
    /// Stable snake_case name of the outcome, for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchOutcome::NoQuestion => "no_question",
            MatchOutcome::NoEntry => "no_entry",
            MatchOutcome::NoEligibleDuplicate { .. } => "no_eligible_duplicate",
            MatchOutcome::MissingCorrectAnswer { .. } => "missing_correct_answer",
            MatchOutcome::NoElement { .. } => "no_element",
            MatchOutcome::Matched { .. } => "matched",
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    /// The element to highlight, if any.
    pub fn element(&self) -> Option<&PageElement<H>> {
        match self {
            MatchOutcome::Matched { element, .. } => Some(element),
            _ => None,
        }
    }

    /// The dataset entry the question resolved to, even if no element was found.
    pub fn entry(&self) -> Option<&ReferenceEntry> {
        match self {
            MatchOutcome::MissingCorrectAnswer { entry, .. }
            | MatchOutcome::NoElement { entry, .. }
            | MatchOutcome::Matched { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn scores(&self) -> &[AnswerSetScore] {
        match self {
            MatchOutcome::NoEligibleDuplicate { scores } | MatchOutcome::Matched { scores, .. } => {
                scores
            }
            _ => &[],
        }
    }
}

/// Plain result shape: both fields are set on success, both empty otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<H> {
    pub matched_entry: Option<ReferenceEntry>,
    pub matched_element: Option<PageElement<H>>,
}

impl<H> MatchResult<H> {
    pub fn empty() -> Self {
        Self { matched_entry: None, matched_element: None }
    }

    pub fn is_empty(&self) -> bool {
        self.matched_element.is_none()
    }
}

impl<H> From<MatchOutcome<H>> for MatchResult<H> {
    fn from(outcome: MatchOutcome<H>) -> Self {
        match outcome {
            MatchOutcome::Matched { entry, element, .. } => {
                Self { matched_entry: Some(entry), matched_element: Some(element) }
            }
            _ => Self::empty(),
        }
    }
}

/// Find the correct-answer element for `question_text` among `candidates`.
pub fn find_match<H: Clone>(
    dataset: &[ReferenceEntry],
    question_text: &str,
    candidates: &[PageElement<H>],
) -> MatchResult<H> {
    match_question(dataset, question_text, candidates).into()
}

/// Like [`find_match`], but reports why an empty result is empty.
pub fn match_question<H: Clone>(
    dataset: &[ReferenceEntry],
    question_text: &str,
    candidates: &[PageElement<H>],
) -> MatchOutcome<H> {
    let question = normalize(question_text);
    if question.is_empty() {
        return MatchOutcome::NoQuestion;
    }

    let matching: Vec<(usize, &ReferenceEntry)> = dataset
        .iter()
        .enumerate()
        .filter(|(_, entry)| normalize(&entry.question) == question)
        .collect();
    tracing::debug!("Found {} questions with matching text", matching.len());

    let (entry, scores) = match matching.as_slice() {
        [] => return MatchOutcome::NoEntry,
        [(_, only)] => (*only, Vec::new()),
        _ => {
            let scores = score_answer_sets(&matching, candidates);
            match pick_best(&scores).map(|best| best.entry_index) {
                Some(idx) => (&dataset[idx], scores),
                None => {
                    tracing::debug!(
                        "No duplicate reached {} matching answers or {:.0}% overlap",
                        MIN_OVERLAP_COUNT,
                        MIN_OVERLAP_RATIO * 100.0
                    );
                    return MatchOutcome::NoEligibleDuplicate { scores };
                }
            }
        }
    };

    let correct = match entry.correct_answer_text() {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!("Dataset integrity error: {error}");
            return MatchOutcome::MissingCorrectAnswer { entry: entry.clone(), error };
        }
    };

    let wanted = normalize(correct);
    let exact = candidates.iter().find(|c| !wanted.is_empty() && c.normalized_text == wanted);
    match exact {
        Some(element) => {
            tracing::info!("Found exact match for answer \"{}\"", element.raw_text.trim());
            MatchOutcome::Matched { entry: entry.clone(), element: element.clone(), scores }
        }
        None => {
            tracing::debug!("No exact match on page for \"{correct}\"");
            MatchOutcome::NoElement { entry: entry.clone(), correct_answer: correct.to_string() }
        }
    }
}

/// Score each duplicate entry's answer set against the page candidates.
pub fn score_answer_sets<H>(
    entries: &[(usize, &ReferenceEntry)],
    candidates: &[PageElement<H>],
) -> Vec<AnswerSetScore> {
    // Symbol-only elements normalize to "" and must not count as overlap.
    let on_page: HashSet<&str> = candidates
        .iter()
        .map(|c| c.normalized_text.as_str())
        .filter(|text| !text.is_empty())
        .collect();

    entries
        .iter()
        .map(|(entry_index, entry)| {
            let total_answers = entry.answers.len();
            let match_score =
                entry.answers.values().filter(|a| on_page.contains(normalize(a).as_str())).count();
            let match_percentage =
                if total_answers == 0 { 0.0 } else { match_score as f64 / total_answers as f64 };
            let eligible =
                match_score >= MIN_OVERLAP_COUNT || match_percentage >= MIN_OVERLAP_RATIO;
            tracing::debug!(
                "Entry {entry_index}: {match_score}/{total_answers} answers on page ({:.1}%)",
                match_percentage * 100.0
            );
            AnswerSetScore {
                entry_index: *entry_index,
                match_score,
                total_answers,
                match_percentage,
                eligible,
            }
        })
        .collect()
}

/// Eligible score with the strictly highest overlap; the earliest wins ties.
pub fn pick_best(scores: &[AnswerSetScore]) -> Option<&AnswerSetScore> {
    let mut best: Option<&AnswerSetScore> = None;
    for score in scores.iter().filter(|s| s.eligible) {
        if score.match_score > best.map_or(0, |b| b.match_score) {
            best = Some(score);
        }
    }
    best
}
