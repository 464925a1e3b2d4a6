//! quiz-helper-core
//!
//! Core library for spotting the correct answer to a quiz question displayed on a page.
//!
//! This crate defines text normalization, the reference dataset model, page scraping
//! abstractions, the question matcher, and the per-invocation session that ties them
//! to a highlight collaborator.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, browser bridges, etc.).

pub mod config;
pub mod dataset;
pub mod matcher;
pub mod normalize;
pub mod page;
pub mod session;
pub mod similarity;
pub mod wait;

pub use matcher::{find_match, match_question, MatchOutcome, MatchResult};
pub use normalize::normalize;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
