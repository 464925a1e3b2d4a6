use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use quiz_helper_core::config::{load_config, HelperConfig};
use quiz_helper_core::page::{HtmlPage, PageSnapshot};
use quiz_helper_core::session::{Highlighter, IndicatorId};

/// A page loaded from disk: saved HTML, or a JSON snapshot from a browser bridge.
pub enum LoadedPage {
    Html(HtmlPage),
    Snapshot(PageSnapshot),
}

/// Load a page by extension: `.json` is a snapshot, anything else is HTML.
pub fn load_page(path: &Path, min_question_len: usize) -> Result<LoadedPage> {
    if !path.exists() {
        return Err(anyhow!("Page file does not exist: {}", path.display()));
    }
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    if is_json {
        let snapshot = PageSnapshot::from_file(path)
            .with_context(|| format!("Failed to load page snapshot {}", path.display()))?;
        Ok(LoadedPage::Snapshot(snapshot))
    } else {
        let page = HtmlPage::from_file(path)
            .with_context(|| format!("Failed to load HTML page {}", path.display()))?;
        Ok(LoadedPage::Html(page.with_min_question_len(min_question_len)))
    }
}

/// Load the config file if one was given, defaults otherwise.
pub fn load_config_or_default(config: Option<&str>) -> Result<HelperConfig> {
    match config {
        Some(path) => load_config(Path::new(path)),
        None => Ok(HelperConfig::default()),
    }
}

/// Pick the dataset path: explicit flag first, then the config file.
pub fn resolve_dataset_path(flag: Option<&str>, config: &HelperConfig) -> Result<PathBuf> {
    flag.map(PathBuf::from)
        .or_else(|| config.dataset_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| anyhow!("No dataset given; pass --dataset or set dataset_path in --config"))
}

/// Highlighter for terminal use: records indicators and logs them.
pub struct ConsoleHighlighter<H> {
    pub shown: Vec<(IndicatorId, String)>,
    pub removed: Vec<IndicatorId>,
    _handle: PhantomData<fn(&H)>,
}

impl<H> ConsoleHighlighter<H> {
    pub fn new() -> Self {
        Self { shown: Vec::new(), removed: Vec::new(), _handle: PhantomData }
    }
}

impl<H> Default for ConsoleHighlighter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Debug> Highlighter for ConsoleHighlighter<H> {
    type Handle = H;

    fn show(&mut self, id: IndicatorId, handle: &H, text: &str) {
        tracing::info!("Indicator {id} shown on {handle:?}: \"{}\"", text.trim());
        self.shown.push((id, text.to_string()));
    }

    fn remove(&mut self, id: IndicatorId) {
        tracing::debug!("Indicator {id} removed");
        self.removed.push(id);
    }
}
