use crate::dataset::Dataset;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_NAME: &str = "colcomplete";
const CONFIG_FILE: &str = "config.json";

/// Application configuration, stored as JSON in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset to load (csv, tsv or json)
    #[serde(default)]
    pub data: Option<PathBuf>,

    /// Columns that get an autocomplete box. Empty means every column.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Columns never offered for filtering, even when listed in `fields`
    #[serde(default)]
    pub no_filter_fields: Vec<String>,

    /// Suggestions shown per keystroke
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Suggestions longer than this many characters are cut for display
    #[serde(default = "default_suggestion_max_length")]
    pub suggestion_max_length: usize,

    /// Table rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether typed case must match stored case
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_max_suggestions() -> usize {
    10
}

fn default_suggestion_max_length() -> usize {
    60
}

fn default_page_size() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: None,
            fields: Vec::new(),
            no_filter_fields: Vec::new(),
            max_suggestions: default_max_suggestions(),
            suggestion_max_length: default_suggestion_max_length(),
            page_size: default_page_size(),
            case_sensitive: false,
        }
    }
}

impl AppConfig {
    /// Load config from `path`, or from the app data directory when `path` is
    /// `None`.
    ///
    /// An explicit path must exist. A missing default config yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match get_config_path() {
                Ok(p) if p.exists() => p,
                Ok(p) => {
                    debug!(path = %p.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                Err(e) => {
                    warn!("{:#}; using default config", e);
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        debug!(path = %config_path.display(), "config loaded");
        Ok(config)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Columns of `dataset` that get an autocomplete trie, in config order
    /// (or column order when `fields` is empty)
    pub fn filter_fields(&self, dataset: &Dataset) -> Vec<String> {
        let candidates: Vec<String> = if self.fields.is_empty() {
            dataset.columns().to_vec()
        } else {
            self.fields.clone()
        };

        candidates
            .into_iter()
            .filter(|f| !self.no_filter_fields.contains(f))
            .collect()
    }

    /// Fail unless `field` is one of [`filter_fields`](Self::filter_fields)
    pub fn ensure_filterable(&self, dataset: &Dataset, field: &str) -> Result<()> {
        let fields = self.filter_fields(dataset);
        if !fields.iter().any(|f| f == field) {
            bail!(
                "Unknown field {:?} (available: {})",
                field,
                fields.join(", ")
            );
        }
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory (not created)
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    Ok(base.join(APP_NAME))
}
