use std::cell::Cell;
use std::time::{Duration, Instant};

use quiz_helper_core::config::HelperConfig;
use quiz_helper_core::dataset::{FileDataset, ReferenceEntry};
use quiz_helper_core::matcher::MatchOutcome;
use quiz_helper_core::page::{PageElement, PageScraper, PageSnapshot};
use quiz_helper_core::session::{HelperSession, Highlighter, IndicatorId};
use quiz_helper_core::wait::WaitOptions;

/// Records every show/remove call so tests can assert on side effects.
#[derive(Default)]
struct RecordingHighlighter {
    shown: Vec<(IndicatorId, usize, String)>,
    removed: Vec<IndicatorId>,
}

impl Highlighter for RecordingHighlighter {
    type Handle = usize;

    fn show(&mut self, id: IndicatorId, handle: &usize, text: &str) {
        self.shown.push((id, *handle, text.to_string()));
    }

    fn remove(&mut self, id: IndicatorId) {
        self.removed.push(id);
    }
}

fn dataset() -> Vec<ReferenceEntry> {
    vec![
        ReferenceEntry::new(
            "Which sign is this?",
            [("1", "Stop"), ("2", "Yield"), ("3", "Go")],
            "2",
        ),
        ReferenceEntry::new("What does a red light mean?", [("1", "Stop"), ("2", "Go")], "1"),
    ]
}

fn snapshot(question: Option<&str>, candidates: &[&str]) -> PageSnapshot {
    PageSnapshot {
        question: question.map(str::to_string),
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    }
}

#[test]
fn process_highlights_the_matched_element() {
    let mut session = HelperSession::new(RecordingHighlighter::default(), &HelperConfig::default());
    let page = snapshot(Some("Which sign is this?"), &["Stop", "Yield", "Go"]);

    let outcome = session.process(&dataset(), &page);
    assert!(outcome.is_match());
    assert_eq!(session.highlighter().shown, vec![(1, 1, "Yield".to_string())]);
    assert_eq!(session.active_indicators().len(), 1);

    session.teardown();
    assert!(session.active_indicators().is_empty());
    assert_eq!(session.highlighter().removed, vec![1]);
}

#[test]
fn empty_outcomes_leave_the_page_untouched() {
    let mut session = HelperSession::new(RecordingHighlighter::default(), &HelperConfig::default());

    let no_question = session.process(&dataset(), &snapshot(None, &["Stop"]));
    assert_eq!(no_question, MatchOutcome::NoQuestion);

    let no_entry = session.process(&dataset(), &snapshot(Some("Unknown question?"), &["Stop"]));
    assert_eq!(no_entry, MatchOutcome::NoEntry);

    let no_element =
        session.process(&dataset(), &snapshot(Some("Which sign is this?"), &["Stop", "Go"]));
    assert_eq!(no_element.kind(), "no_element");

    assert!(session.highlighter().shown.is_empty());
    session.teardown();
}

#[test]
fn unreadable_dataset_is_treated_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = FileDataset::new(dir.path().join("missing.json"));
    let mut session = HelperSession::new(RecordingHighlighter::default(), &HelperConfig::default());

    let outcome = session.process(&source, &snapshot(Some("Which sign is this?"), &["Yield"]));
    assert_eq!(outcome, MatchOutcome::NoEntry);
    assert!(session.highlighter().shown.is_empty());
}

#[test]
fn indicators_expire_after_the_highlight_duration() {
    let config = HelperConfig { highlight_duration_ms: 500, ..HelperConfig::default() };
    let mut session = HelperSession::new(RecordingHighlighter::default(), &config);
    let start = Instant::now();
    let id = session.highlight(&3, "Go");

    assert_eq!(session.sweep_at(start), 0);
    assert_eq!(session.active_indicators().len(), 1);

    assert_eq!(session.sweep_at(start + Duration::from_millis(600)), 1);
    assert!(session.active_indicators().is_empty());
    assert_eq!(session.highlighter().removed, vec![id]);

    // Nothing left for teardown to remove.
    session.teardown();
    assert_eq!(session.highlighter().removed, vec![id]);
}

#[test]
fn each_session_numbers_its_own_indicators() {
    let config = HelperConfig::default();
    let page = snapshot(Some("What does a red light mean?"), &["Go", "Stop"]);

    for _ in 0..2 {
        let mut session = HelperSession::new(RecordingHighlighter::default(), &config);
        session.process(&dataset(), &page);
        assert_eq!(session.highlighter().shown, vec![(1, 1, "Stop".to_string())]);
        session.teardown();
    }
}

/// A page whose question appears only after a few polls.
struct SlowPage {
    polls_until_ready: Cell<u32>,
}

impl PageScraper for SlowPage {
    type Handle = usize;

    fn question_text(&self) -> Option<String> {
        let left = self.polls_until_ready.get();
        if left == 0 {
            Some("What does a red light mean?".to_string())
        } else {
            self.polls_until_ready.set(left - 1);
            None
        }
    }

    fn candidates(&self) -> Vec<PageElement<usize>> {
        vec![PageElement::new("Stop", 0)]
    }
}

#[test]
fn waiting_session_polls_for_a_late_question() {
    let wait = WaitOptions::new(Duration::from_secs(2), Duration::from_millis(1));
    let mut session = HelperSession::new(RecordingHighlighter::default(), &HelperConfig::default())
        .with_wait(wait);

    let outcome = session.process(&dataset(), &SlowPage { polls_until_ready: Cell::new(3) });
    assert!(outcome.is_match());
    session.teardown();
}

#[test]
fn non_waiting_session_reads_the_question_once() {
    let mut session = HelperSession::new(RecordingHighlighter::default(), &HelperConfig::default());
    let outcome = session.process(&dataset(), &SlowPage { polls_until_ready: Cell::new(1) });
    assert_eq!(outcome, MatchOutcome::NoQuestion);
}
