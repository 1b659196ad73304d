//! Store configuration.
//!
//! Read from `taskboard.toml` in the data directory, falling back to
//! `<config dir>/taskboard/config.toml`, then to built-in defaults:
//!
//! ```toml
//! delimiter = "#"
//!
//! [files]
//! todo = "todo.txt"
//! in_progress = "in_progress.txt"
//! done = "done.txt"
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TaskError;
use crate::models::{Stage, DEFAULT_DELIMITER};

/// Config file name looked up inside the data directory
pub const LOCAL_CONFIG_FILE: &str = "taskboard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field separator used in store files
    pub delimiter: char,
    pub files: StoreFiles,
}

/// Store file name per stage, relative to the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreFiles {
    pub todo: String,
    pub in_progress: String,
    pub done: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            files: StoreFiles::default(),
        }
    }
}

impl Default for StoreFiles {
    fn default() -> Self {
        Self {
            todo: Stage::NotStarted.default_filename().to_string(),
            in_progress: Stage::InProgress.default_filename().to_string(),
            done: Stage::Completed.default_filename().to_string(),
        }
    }
}

impl StoreFiles {
    pub fn for_stage(&self, stage: Stage) -> &str {
        match stage {
            Stage::NotStarted => &self.todo,
            Stage::InProgress => &self.in_progress,
            Stage::Completed => &self.done,
        }
    }
}

impl Config {
    /// Load the config for a data directory.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(data_dir: &Path) -> Result<Self, TaskError> {
        let local = data_dir.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_file(&local);
        }

        if let Some(global) = global_config_path() {
            if global.exists() {
                return Self::load_file(&global);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load and validate a specific config file
    pub fn load_file(path: &Path) -> Result<Self, TaskError> {
        let invalid = |message: String| TaskError::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: Config = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        config.validate().map_err(invalid)?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err("delimiter cannot be a line break".to_string());
        }
        if self.delimiter.is_ascii_digit() || self.delimiter == '-' {
            return Err(format!(
                "delimiter '{}' would collide with numeric fields",
                self.delimiter
            ));
        }
        let mut seen: Vec<(Stage, PathBuf)> = Vec::new();
        for stage in Stage::all() {
            let name = self.files.for_stage(*stage);
            if name.trim().is_empty() {
                return Err(format!("file name for {stage} cannot be empty"));
            }
            let normalized = normalize_file_name(name);
            if let Some((other, _)) = seen.iter().find(|(_, p)| *p == normalized) {
                return Err(format!(
                    "{other} and {stage} cannot share the store file '{}'",
                    name.trim()
                ));
            }
            seen.push((*stage, normalized));
        }
        Ok(())
    }
}

/// `./todo.txt` and `todo.txt` name the same file
fn normalize_file_name(name: &str) -> PathBuf {
    Path::new(name.trim())
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// `<config dir>/taskboard/config.toml`, if the platform has a config dir
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taskboard").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.delimiter, '#');
        assert_eq!(config.files.for_stage(Stage::NotStarted), "todo.txt");
        assert_eq!(config.files.for_stage(Stage::InProgress), "in_progress.txt");
        assert_eq!(config.files.for_stage(Stage::Completed), "done.txt");
    }

    #[test]
    fn test_load_local_file_with_partial_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(LOCAL_CONFIG_FILE),
            "delimiter = \"|\"\n\n[files]\ndone = \"archive.txt\"\n",
        )
        .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.files.done, "archive.txt");
        assert_eq!(config.files.todo, "todo.txt");
    }

    #[test]
    fn test_rejects_multi_char_delimiter() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "delimiter = \"##\"\n").unwrap();
        assert!(matches!(
            Config::load_file(&path),
            Err(TaskError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_newline_and_digit_delimiter() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_FILE);

        fs::write(&path, "delimiter = \"\\n\"\n").unwrap();
        assert!(Config::load_file(&path).is_err());

        fs::write(&path, "delimiter = \"1\"\n").unwrap();
        assert!(Config::load_file(&path).is_err());
    }

    #[test]
    fn test_rejects_stages_sharing_a_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_FILE);

        fs::write(&path, "[files]\ndone = \"todo.txt\"\n").unwrap();
        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, TaskError::Config { .. }));
        assert!(err.to_string().contains("To do and Done"));

        fs::write(&path, "[files]\nin_progress = \"./done.txt\"\n").unwrap();
        assert!(Config::load_file(&path).is_err());

        fs::write(&path, "[files]\ndone = \"archive/done.txt\"\n").unwrap();
        assert!(Config::load_file(&path).is_ok());
    }
}
