use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{app_dirs::AppDirs, word_generator::DEFAULT_NUMBER_OF_WORDS};

/// User defaults, overridden by command-line flags
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_words: DEFAULT_NUMBER_OF_WORDS,
        }
    }
}

impl Config {
    /// Flag value wins over the configured default
    pub fn resolve_words(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.number_of_words)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("typrace_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => {
                log::info!("loaded config from {}", self.path.display());
                cfg
            }
            Err(err) => {
                log::warn!(
                    "ignoring malformed config {}: {err}",
                    self.path.display()
                );
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load(), Config::default());
        assert_eq!(store.load().number_of_words, 20);
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "number_of_words": 50 }"#).unwrap();

        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config { number_of_words: 50 });
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn malformed_config_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn flag_overrides_config() {
        let cfg = Config { number_of_words: 40 };
        assert_eq!(cfg.resolve_words(Some(5)), 5);
        assert_eq!(cfg.resolve_words(None), 40);
    }
}
