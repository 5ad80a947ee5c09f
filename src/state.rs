use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::Settings;
use crate::data::loader::{self, LoadError};
use crate::data::model::{Topic, Workbook};
use crate::data::sampler::sample_table;
use crate::data::selection::SelectionSet;
use crate::data::taxonomy::extract_topics;

/// Why a draw request was refused before reaching the sampler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSelection {
    #[error("no question file loaded")]
    NoFile,
    #[error("choose a topic")]
    NoTopic,
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),
    #[error("choose a level")]
    NoLevel,
    #[error("the number of questions must be positive")]
    NonPositiveCount,
}

/// A message for the top bar. Errors are drawn in red.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(s) | Status::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded workbook (None until the user loads a file).
    pub workbook: Option<Workbook>,

    /// Topics and levels derived from `workbook`.
    pub topics: Vec<Topic>,

    /// Pending draw request.
    pub selected_topic: Option<String>,
    pub selected_level: Option<i64>,
    pub count: i64,

    /// Questions picked so far.
    pub selection: SelectionSet,

    /// Status message shown in the top bar.
    pub status: Option<Status>,

    /// Error the operator has to acknowledge before continuing.
    pub blocking_error: Option<String>,

    rng: StdRng,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Deterministic draws, for tests.
    pub fn with_rng(settings: Settings, rng: StdRng) -> Self {
        Self {
            settings,
            workbook: None,
            topics: Vec::new(),
            selected_topic: None,
            selected_level: None,
            count: 0,
            selection: SelectionSet::new(),
            status: None,
            blocking_error: None,
            rng,
        }
    }

    /// Load a file and ingest it. On failure the previous workbook stays and
    /// the error is raised as a blocking message.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path, &self.settings.loader) {
            Ok(workbook) => self.set_workbook(workbook),
            Err(e) => self.load_failed(e),
        }
    }

    /// Ingest a newly loaded workbook and rebuild the topic list from scratch.
    pub fn set_workbook(&mut self, workbook: Workbook) {
        self.topics = extract_topics(&workbook, &self.settings.loader.columns);
        log::info!(
            "Topics: {:?}",
            self.topics.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        );
        self.workbook = Some(workbook);
        self.reset_request();
        self.status = None;
        self.blocking_error = None;
    }

    pub fn load_failed(&mut self, error: LoadError) {
        let message = format!("{:#}", anyhow::Error::new(error));
        log::error!("Failed to load file: {message}");
        self.blocking_error = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.blocking_error = None;
    }

    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Levels offered for the currently selected topic, ascending.
    pub fn available_levels(&self) -> Vec<i64> {
        self.selected_topic
            .as_deref()
            .and_then(|name| self.topic(name))
            .map(Topic::sorted_levels)
            .unwrap_or_default()
    }

    /// Change topic; a level that the new topic lacks is cleared.
    pub fn select_topic(&mut self, name: String) {
        let keep_level = self
            .topic(&name)
            .zip(self.selected_level)
            .is_some_and(|(topic, level)| topic.has_level(level));
        if !keep_level {
            self.selected_level = None;
        }
        self.selected_topic = Some(name);
    }

    pub fn select_level(&mut self, level: i64) {
        self.selected_level = Some(level);
    }

    /// Validate the pending request, draw, and append the result to the
    /// selection. Returns how many questions were added; the request is reset
    /// afterwards either way.
    pub fn add_questions(&mut self) -> Result<usize, InvalidSelection> {
        let workbook = self.workbook.as_ref().ok_or(InvalidSelection::NoFile)?;
        let topic = self.selected_topic.clone().ok_or(InvalidSelection::NoTopic)?;
        let table = workbook
            .table(&topic)
            .ok_or_else(|| InvalidSelection::UnknownTopic(topic.clone()))?;
        let level = self.selected_level.ok_or(InvalidSelection::NoLevel)?;
        if self.count <= 0 {
            return Err(InvalidSelection::NonPositiveCount);
        }

        let texts = sample_table(
            table,
            &self.settings.loader.columns,
            level,
            self.count,
            &mut self.rng,
        );
        let added = self.selection.extend_from_draw(&topic, level, texts);
        log::info!(
            "Added {added} of {} requested question(s) from '{topic}' level {level}",
            self.count
        );

        self.status = (added < self.count as usize).then(|| {
            Status::Info(format!(
                "Only {added} question(s) available for '{topic}' at level {level}"
            ))
        });
        self.reset_request();
        Ok(added)
    }

    /// [`add_questions`](Self::add_questions) for the UI: a refusal goes to
    /// the status line as an error.
    pub fn request_questions(&mut self) {
        if let Err(e) = self.add_questions() {
            log::warn!("Draw refused: {e}");
            self.status = Some(Status::Error(e.to_string()));
        }
    }

    pub fn remove_question(&mut self, index: usize) {
        if let Some(q) = self.selection.remove(index) {
            log::debug!("Removed '{}' ({}, level {})", q.text, q.topic, q.level);
        }
    }

    /// Write the selection to `path` and report the outcome in the status line.
    pub fn export(&mut self, path: &Path) {
        match crate::export::export_to_path(&self.selection, path) {
            Ok(()) => {
                self.status = Some(Status::Info(format!(
                    "Exported {} question(s) to {}",
                    self.selection.len(),
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    fn reset_request(&mut self) {
        self.selected_topic = None;
        self.selected_level = None;
        self.count = 0;
    }
}
