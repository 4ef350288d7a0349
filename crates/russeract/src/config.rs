//! Session configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use russeract_types::{OcrEngineMode, PageSegMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

fn default_language() -> String {
    "eng".to_string()
}

/// Everything needed to initialize an engine session.
///
/// Fields left unset fall back to the engine's own defaults. A JSON document
/// only needs the keys it wants to change:
///
/// ```
/// use russeract::SessionConfig;
///
/// let config = SessionConfig::from_json_str(r#"{"language": "deu", "page_seg_mode": "single_line"}"#)
///     .unwrap();
/// assert_eq!(config.language, "deu");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Directory holding `tessdata`. `None` uses the engine's compiled-in path.
    #[serde(default)]
    pub datapath: Option<PathBuf>,

    /// Language codes joined by `+`, e.g. `eng+deu`.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub engine_mode: OcrEngineMode,

    /// Engine config files applied at init.
    #[serde(default)]
    pub config_files: Vec<PathBuf>,

    /// Init-only variables, applied before the engine loads its models.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    #[serde(default)]
    pub set_only_non_debug_params: bool,

    #[serde(default)]
    pub page_seg_mode: Option<PageSegMode>,

    /// Resolution in DPI, for images whose metadata lacks one.
    #[serde(default)]
    pub source_resolution: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            datapath: None,
            language: default_language(),
            engine_mode: OcrEngineMode::default(),
            config_files: Vec::new(),
            variables: BTreeMap::new(),
            set_only_non_debug_params: false,
            page_seg_mode: None,
            source_resolution: None,
        }
    }
}

impl SessionConfig {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading session config from {:?}", path);
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn datapath(mut self, datapath: impl Into<PathBuf>) -> Self {
        self.datapath = Some(datapath.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn engine_mode(mut self, mode: OcrEngineMode) -> Self {
        self.engine_mode = mode;
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push(path.into());
        self
    }

    /// Set an init-only variable. Later values for the same name win.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn set_only_non_debug_params(mut self, only: bool) -> Self {
        self.set_only_non_debug_params = only;
        self
    }

    pub fn page_seg_mode(mut self, mode: PageSegMode) -> Self {
        self.page_seg_mode = Some(mode);
        self
    }

    pub fn source_resolution(mut self, ppi: u32) -> Self {
        self.source_resolution = Some(ppi);
        self
    }
}
