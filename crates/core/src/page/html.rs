use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::page::{
    looks_like_question, PageElement, PageScraper, ScrapeError, DEFAULT_MIN_QUESTION_LEN,
};

/// Tags searched for the question text, in priority order.
pub const QUESTION_SELECTORS: &[&str] =
    &["h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "span", "td", "th", "li"];

/// Selectors for potentially clickable answer elements, in priority order.
pub const CANDIDATE_SELECTORS: &[&str] = &[
    "button",
    "a",
    "div[onclick]",
    "span[onclick]",
    "div[role=\"button\"]",
    "span[role=\"button\"]",
    "li",
    "td",
    "input[type=\"radio\"]",
    "input[type=\"checkbox\"]",
];

/// Position of an element in document order. Resolve it with [`HtmlPage::element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementHandle(pub usize);

/// A saved HTML document scraped with CSS selectors.
pub struct HtmlPage {
    document: Html,
    question_selectors: Vec<Selector>,
    candidate_selectors: Vec<Selector>,
    label_selector: Selector,
    min_question_len: usize,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            document: Html::parse_document(html),
            question_selectors: compile(QUESTION_SELECTORS)?,
            candidate_selectors: compile(CANDIDATE_SELECTORS)?,
            label_selector: compile_one("label[for]")?,
            min_question_len: DEFAULT_MIN_QUESTION_LEN,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ScrapeError> {
        let body = std::fs::read_to_string(path)
            .map_err(|source| ScrapeError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&body)
    }

    pub fn with_min_question_len(mut self, min_len: usize) -> Self {
        self.min_question_len = min_len;
        self
    }

    /// Look up the element a handle points at.
    pub fn element(&self, handle: ElementHandle) -> Option<ElementRef<'_>> {
        self.elements().nth(handle.0)
    }

    /// Tag name of the element a handle points at, e.g. `button`.
    pub fn tag_name(&self, handle: ElementHandle) -> Option<&str> {
        self.element(handle).map(|el| el.value().name())
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document.root_element().descendants().filter_map(ElementRef::wrap)
    }

    /// Display text of a candidate. Inputs carry no text of their own, so theirs comes
    /// from `label[for=id]`, else the next element sibling, else the parent.
    fn candidate_text(&self, el: &ElementRef<'_>) -> String {
        if el.value().name() != "input" {
            return element_text(el);
        }

        let labelled = el.value().id().and_then(|id| {
            self.document
                .select(&self.label_selector)
                .find(|label| label.value().attr("for") == Some(id))
                .map(|label| element_text(&label))
        });
        if let Some(text) = labelled {
            return text;
        }

        let sibling = el.next_siblings().find_map(ElementRef::wrap).map(|s| element_text(&s));
        match sibling {
            Some(text) if !text.trim().is_empty() => text,
            _ => el
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| element_text(&parent))
                .unwrap_or_default(),
        }
    }
}

fn compile(selectors: &[&str]) -> Result<Vec<Selector>, ScrapeError> {
    selectors.iter().map(|s| compile_one(s)).collect()
}

fn compile_one(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

impl PageScraper for HtmlPage {
    type Handle = ElementHandle;

    fn question_text(&self) -> Option<String> {
        self.question_selectors.iter().find_map(|selector| {
            self.document
                .select(selector)
                .map(|el| element_text(&el))
                .find(|text| looks_like_question(text, self.min_question_len))
        })
    }

    fn candidates(&self) -> Vec<PageElement<ElementHandle>> {
        let elements: Vec<ElementRef<'_>> = self.elements().collect();
        let mut found = Vec::new();

        for selector in &self.candidate_selectors {
            for (idx, el) in elements.iter().enumerate() {
                if !selector.matches(el) {
                    continue;
                }
                let text = self.candidate_text(el);
                if text.trim().is_empty() {
                    continue;
                }
                found.push(PageElement::new(text, ElementHandle(idx)));
            }
        }

        found
    }
}
