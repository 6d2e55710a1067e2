use crate::errors::AnalysisError;
use crate::history::{self, HistoryStore, RenderableEntry};
use crate::models::{AnalysisResult, Theme};
use crate::notify::{Notice, NoticeKind, NoticeQueue};
use crate::storage::KeyValueStore;
use crate::theme::{load_theme, toggle_theme};
use crate::view::{self, ViewCommands};
use tracing::info;

pub const IN_FLIGHT_MESSAGE: &str = "An analysis is already running";

/// Everything the page shows, captured under one lock.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub theme: Theme,
    pub draft: String,
    pub view: Option<ViewCommands>,
    pub history: Vec<RenderableEntry>,
    pub notices: Vec<Notice>,
}

/// Widget state for one host: the last rendered result, the bounded history,
/// the theme, the text box contents and queued notices.
pub struct WidgetSession<S> {
    storage: S,
    history: HistoryStore<S>,
    theme: Theme,
    view: Option<ViewCommands>,
    draft: String,
    notices: NoticeQueue,
}

impl<S: KeyValueStore + Clone> WidgetSession<S> {
    pub fn new(storage: S) -> Self {
        let history = HistoryStore::new(storage.clone());
        let theme = load_theme(&storage);
        info!(
            entries = history.log().len(),
            theme = theme.as_str(),
            "widget session loaded"
        );
        Self {
            storage,
            history,
            theme,
            view: None,
            draft: String::new(),
            notices: NoticeQueue::default(),
        }
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Applies the outcome of one analysis. A success is rendered first and
    /// then appended to history; a failure only queues a notice.
    pub fn apply(
        &mut self,
        text: &str,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<ViewCommands, AnalysisError> {
        match outcome {
            Ok(result) => Ok(self.record_success(text, &result)),
            Err(err) => {
                self.notices.notify(NoticeKind::Error, err.user_message());
                Err(err)
            }
        }
    }

    fn record_success(&mut self, text: &str, result: &AnalysisResult) -> ViewCommands {
        let rendered = view::render(result);
        self.view = Some(rendered.clone());
        if rendered.celebrate {
            self.notices.notify(NoticeKind::Celebrate, "");
        }
        self.history.append(text.trim(), result.sentiment);
        rendered
    }

    pub fn record_in_flight(&mut self) {
        self.notices.notify(NoticeKind::Info, IN_FLIGHT_MESSAGE);
    }

    pub fn record_missing_entry(&mut self, index: usize) {
        self.notices
            .notify(NoticeKind::Error, format!("History entry {} no longer exists", index + 1));
    }

    /// Text of a history row, for resubmission as a fresh analysis.
    pub fn history_text(&self, index: usize) -> Option<String> {
        self.history.log().get(index).map(|entry| entry.text.clone())
    }

    pub fn history_rows(&self) -> Vec<RenderableEntry> {
        history::render(self.history.log())
    }

    pub fn clear_history(&mut self) -> Vec<RenderableEntry> {
        history::render(self.history.clear())
    }

    /// Empties the text box and returns the result panel to its placeholder.
    pub fn clear_input(&mut self) {
        self.draft.clear();
        self.view = None;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = toggle_theme(&self.storage, self.theme);
        self.theme
    }

    /// Snapshot for the next page render. Drains pending notices.
    pub fn page(&mut self, draft_override: Option<String>) -> PageModel {
        PageModel {
            theme: self.theme,
            draft: draft_override.unwrap_or_else(|| self.draft.clone()),
            view: self.view.clone(),
            history: self.history_rows(),
            notices: self.notices.drain(),
        }
    }
}
