//! Application configuration: a main YAML file deep-merged with every YAML
//! file found under an overlay directory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::extract::DEFAULT_CATEGORY;
use crate::gate::ToggleValue;
use crate::selectors::FieldSelectorConfig;

pub const DEFAULT_START_PAGE: &str = "https://books.toscrape.com/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid yaml in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("merged config does not match the expected shape: {0}")]
    Shape(serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub web_scraping: WebScrapingConfig,
    pub output: OutputConfig,
    pub toggles: BTreeMap<String, ToggleValue>,
    pub logging: LoggingConfig,
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebScrapingConfig {
    pub start_page: String,
    /// Label given to every extracted product and to the grouped export.
    pub category: String,
    #[serde(flatten)]
    pub selectors: FieldSelectorConfig,
}

impl Default for WebScrapingConfig {
    fn default() -> Self {
        Self {
            start_page: DEFAULT_START_PAGE.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            selectors: FieldSelectorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub yaml_products_path: PathBuf,
    pub yaml_items_dir: PathBuf,
    pub text_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("output/data.csv"),
            json_path: PathBuf::from("output/data.json"),
            yaml_products_path: PathBuf::from("output/products/books_from_site.yaml"),
            yaml_items_dir: PathBuf::from("output/items"),
            text_path: PathBuf::from("output/items.txt"),
        }
    }
}

impl OutputConfig {
    pub fn destination(&self, sink: crate::SinkKind) -> &Path {
        match sink {
            crate::SinkKind::Csv => &self.csv_path,
            crate::SinkKind::Json => &self.json_path,
            crate::SinkKind::GroupedYaml => &self.yaml_products_path,
            crate::SinkKind::YamlItems => &self.yaml_items_dir,
            crate::SinkKind::Text => &self.text_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub level: String,
    pub files: LogFiles,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            level: "INFO".to_string(),
            files: LogFiles::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFiles {
    pub application_log: String,
    pub error_log: String,
}

impl Default for LogFiles {
    fn default() -> Self {
        Self {
            application_log: "app.log".to_string(),
            error_log: "error.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub sqlite_path: String,
    pub mongodb_uri: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "output/products.sqlite3".to_string(),
            mongodb_uri: "mongodb://localhost:27017/products".to_string(),
        }
    }
}

/// Loads `main_file` (missing means empty), merges every `*.yml`/`*.yaml`
/// under `overlay_dir` in path order on top, and fills unset keys with
/// defaults.
pub fn load_config(main_file: &Path, overlay_dir: &Path) -> Result<AppConfig, ConfigError> {
    let mut merged = read_yaml(main_file)?;
    for path in overlay_files(overlay_dir)? {
        let overlay = read_yaml(&path)?;
        merged = deep_merge(merged, overlay);
    }
    let merged = match merged {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    };
    serde_yaml::from_value(merged).map_err(ConfigError::Shape)
}

fn read_yaml(path: &Path) -> Result<Value, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Value::Null),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn overlay_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::new();
    if dir.is_dir() {
        collect_yaml_files(dir, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect_yaml_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ConfigError> {
    let read_error = |source| ConfigError::Read {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            collect_yaml_files(&path, files)?;
        } else if matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yml" | "yaml")
        ) {
            files.push(path);
        }
    }
    Ok(())
}

/// Mappings merge key by key; anything else in `overlay` replaces `base`.
/// A null overlay (an empty file) leaves `base` untouched.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,
        (Value::Mapping(mut base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::replace(existing, Value::Null);
                        *existing = deep_merge(current, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Mapping(base)
        }
        (_, overlay) => overlay,
    }
}
