//! Page-side inputs to the matcher: the displayed question and candidate answer elements.
//!
//! A page is anything implementing [`PageScraper`]. Two scrapers ship with the crate:
//! - [`PageSnapshot`]: a pre-scraped page (JSON), handles are candidate positions.
//! - `HtmlPage` (feature `html-scraper`): scrapes a saved HTML document.
//!
//! Handles are non-owning: they identify an element on the page without keeping the
//! page (or a borrow of it) alive.

#[cfg(feature = "html-scraper")]
pub mod html;

#[cfg(feature = "html-scraper")]
pub use html::{ElementHandle, HtmlPage};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::normalize;
use crate::wait::{wait_for, WaitOptions};

/// Minimum trimmed length (in chars) for text to count as a question.
pub const DEFAULT_MIN_QUESTION_LEN: usize = 20;

/// A candidate answer element as scraped from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageElement<H> {
    pub raw_text: String,
    pub normalized_text: String,
    pub handle: H,
}

impl<H> PageElement<H> {
    pub fn new(raw_text: impl Into<String>, handle: H) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = normalize(&raw_text);
        Self { raw_text, normalized_text, handle }
    }
}

/// Question heuristic: long enough and ends like a prompt (`?` or `:`).
pub fn looks_like_question(text: &str, min_len: usize) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() >= min_len && (trimmed.ends_with('?') || trimmed.ends_with(':'))
}

/// Supplies the current question and candidate elements of a page.
///
/// Implementations must recompute both on every call; the page may have changed.
pub trait PageScraper {
    type Handle: Clone;

    /// Raw text of the question displayed on the page, if one is found.
    fn question_text(&self) -> Option<String>;

    /// Clickable elements with non-blank text, in scan order.
    fn candidates(&self) -> Vec<PageElement<Self::Handle>>;

    /// Poll for a question until one shows up or the timeout elapses.
    fn wait_for_question(&self, options: &WaitOptions) -> Option<String> {
        wait_for(options, || self.question_text())
    }
}

/// Errors raised while reading or scraping a page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to read page at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse page snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// A page that has already been scraped, e.g. by a browser bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub candidates: Vec<String>,
}

impl PageSnapshot {
    /// Capture the current state of any scraper.
    pub fn capture<P: PageScraper + ?Sized>(page: &P) -> Self {
        Self {
            question: page.question_text(),
            candidates: page.candidates().into_iter().map(|c| c.raw_text).collect(),
        }
    }

    pub fn from_json(body: &str) -> Result<Self, ScrapeError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ScrapeError> {
        let body = std::fs::read_to_string(path)
            .map_err(|source| ScrapeError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&body)
    }
}

impl PageScraper for PageSnapshot {
    type Handle = usize;

    fn question_text(&self) -> Option<String> {
        self.question.clone().filter(|q| !q.trim().is_empty())
    }

    fn candidates(&self) -> Vec<PageElement<usize>> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(idx, text)| PageElement::new(text.as_str(), idx))
            .collect()
    }
}
