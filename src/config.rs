use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "question-picker.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Everything an operator can tune without recompiling.
///
/// ```json
/// {
///   "loader": { "header_row": 0, "columns": { "question": ["Frage"], "level": ["Stufe"] } },
///   "export": { "default_file_name": "fragen.docx" }
/// }
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub loader: LoaderConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read settings file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Malformed {
            path: display,
            source,
        })
    }

    /// Read settings from `path` if it exists, falling back to defaults
    /// (with a warning) when it cannot be used.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{:#}; using defaults", anyhow::Error::new(e));
                Self::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Loader settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// 0-based offset of the header row within each sheet. Rows above it are
    /// ignored, data starts right below it.
    pub header_row: usize,
    pub columns: ColumnMapping,
}

/// Header labels accepted for each column role. Matching ignores case and
/// surrounding whitespace; the first listed label present in a sheet wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub question: Vec<String>,
    pub level: Vec<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            question: vec!["question".into(), "frage".into()],
            level: vec!["level".into(), "stufe".into()],
        }
    }
}

impl ColumnMapping {
    /// Resolve the question column among a sheet's labels.
    pub fn question_column<'a>(&self, columns: &'a [String]) -> Option<&'a str> {
        find_column(&self.question, columns)
    }

    /// Resolve the level column among a sheet's labels.
    pub fn level_column<'a>(&self, columns: &'a [String]) -> Option<&'a str> {
        find_column(&self.level, columns)
    }
}

fn find_column<'a>(accepted: &[String], columns: &'a [String]) -> Option<&'a str> {
    accepted.iter().find_map(|wanted| {
        columns
            .iter()
            .find(|c| c.trim().eq_ignore_ascii_case(wanted.trim()))
            .map(String::as_str)
    })
}

// ---------------------------------------------------------------------------
// Export settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name proposed by the save dialog.
    pub default_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_file_name: "selected_questions.docx".into(),
        }
    }
}
