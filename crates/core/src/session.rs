//! One on-demand helper invocation: load, scrape, match, highlight.
//!
//! A [`HelperSession`] owns the transient side effects of an invocation (highlight
//! indicators) and releases them on [`HelperSession::teardown`]. Create one per
//! invocation scope; sessions share no state with each other.

use std::time::{Duration, Instant};

use crate::config::HelperConfig;
use crate::dataset::DatasetSource;
use crate::matcher::{match_question, MatchOutcome};
use crate::page::PageScraper;
use crate::wait::WaitOptions;

pub type IndicatorId = u64;

/// Renders and removes the visual marker on a matched element.
pub trait Highlighter {
    type Handle;

    fn show(&mut self, id: IndicatorId, handle: &Self::Handle, text: &str);
    fn remove(&mut self, id: IndicatorId);
}

/// An indicator currently shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveIndicator {
    pub id: IndicatorId,
    pub text: String,
    pub expires_at: Instant,
}

pub struct HelperSession<L: Highlighter> {
    highlighter: L,
    highlight_duration: Duration,
    wait: Option<WaitOptions>,
    active: Vec<ActiveIndicator>,
    next_id: IndicatorId,
}

impl<L: Highlighter> HelperSession<L> {
    pub fn new(highlighter: L, config: &HelperConfig) -> Self {
        Self {
            highlighter,
            highlight_duration: config.highlight_duration(),
            wait: None,
            active: Vec::new(),
            next_id: 1,
        }
    }

    /// Poll the page for a question (up to the timeout) instead of reading it once.
    pub fn with_wait(mut self, options: WaitOptions) -> Self {
        self.wait = Some(options);
        self
    }

    /// Run one matching invocation and highlight the correct answer if found.
    ///
    /// Never fails: a dataset that cannot be loaded counts as empty, and every other
    /// problem is reported through the returned outcome.
    pub fn process<S, P>(&mut self, dataset: &S, page: &P) -> MatchOutcome<L::Handle>
    where
        S: DatasetSource + ?Sized,
        P: PageScraper<Handle = L::Handle>,
        L::Handle: Clone,
    {
        self.sweep();

        let entries = dataset.load_or_empty();
        if entries.is_empty() {
            tracing::info!("No questions loaded, stopping");
            return MatchOutcome::NoEntry;
        }

        let question = match &self.wait {
            Some(options) => page.wait_for_question(options),
            None => page.question_text(),
        };
        let Some(question) = question else {
            tracing::info!("No question found on page");
            return MatchOutcome::NoQuestion;
        };
        tracing::debug!("Found question: {}", question.trim());

        let candidates = page.candidates();
        tracing::debug!("Found {} clickable elements on page", candidates.len());

        let outcome = match_question(&entries, &question, &candidates);
        if let Some(element) = outcome.element() {
            self.highlight(&element.handle, &element.raw_text);
        } else {
            tracing::info!("No answer to highlight ({})", outcome.kind());
        }
        outcome
    }

    /// Show an indicator on `handle`; it expires after the configured duration.
    pub fn highlight(&mut self, handle: &L::Handle, text: &str) -> IndicatorId {
        let id = self.next_id;
        self.next_id += 1;
        self.highlighter.show(id, handle, text);
        self.active.push(ActiveIndicator {
            id,
            text: text.to_string(),
            expires_at: Instant::now() + self.highlight_duration,
        });
        id
    }

    /// Remove indicators whose display time has passed by `now`. Returns how many.
    pub fn sweep_at(&mut self, now: Instant) -> usize {
        let (expired, keep): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|indicator| indicator.expires_at <= now);
        self.active = keep;
        for indicator in &expired {
            self.highlighter.remove(indicator.id);
        }
        expired.len()
    }

    pub fn sweep(&mut self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn active_indicators(&self) -> &[ActiveIndicator] {
        &self.active
    }

    pub fn highlighter(&self) -> &L {
        &self.highlighter
    }

    /// Remove every indicator still on the page. Safe to call more than once.
    pub fn teardown(&mut self) {
        for indicator in self.active.drain(..) {
            self.highlighter.remove(indicator.id);
        }
    }
}

impl<L: Highlighter> Drop for HelperSession<L> {
    fn drop(&mut self) {
        if !self.active.is_empty() {
            tracing::warn!(
                "HelperSession dropped without teardown(), removing {} indicator(s)",
                self.active.len()
            );
            self.teardown();
        }
    }
}
