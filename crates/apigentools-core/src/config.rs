//! apigentools configuration model and loading.
//!
//! The configuration lives in `config.json` inside the config directory and
//! maps language names to per-language settings. Languages iterate in name
//! order, so repeated runs visit targets in a stable sequence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ApigentoolsError, Result};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Per-language configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LanguageConfig {
    /// Name of the generated client directory under the generated code
    /// directory. Falls back to the language name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repo_name: Option<String>,

    /// Spec versions for this language. An absent or empty list is filled
    /// from the top-level `spec_versions` at load time.
    #[serde(default)]
    pub spec_versions: Vec<String>,
}

impl LanguageConfig {
    /// Directory holding this language's generated client and test
    /// Dockerfiles.
    pub fn generated_lang_dir(&self, language: &str, generated_code_dir: &Path) -> PathBuf {
        let dir = self.github_repo_name.as_deref().unwrap_or(language);
        generated_code_dir.join(dir)
    }
}

/// Top-level apigentools configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// Spec versions shared by languages that do not set their own.
    #[serde(default)]
    pub spec_versions: Vec<String>,

    /// Language name to language configuration, iterated in name order.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ApigentoolsError::ConfigNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let mut config: Config =
            serde_json::from_str(&raw).map_err(|e| ApigentoolsError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Languages without their own versions inherit the top-level list.
        for lang_config in config.languages.values_mut() {
            if lang_config.spec_versions.is_empty() {
                lang_config.spec_versions = config.spec_versions.clone();
            }
        }
        Ok(config)
    }

    /// Load `config.json` from a config directory.
    pub fn from_dir(config_dir: &Path) -> Result<Self> {
        Self::from_file(&config_dir.join(CONFIG_FILE_NAME))
    }

    /// Configuration for a single language.
    pub fn language_config(&self, language: &str) -> Result<&LanguageConfig> {
        self.languages
            .get(language)
            .ok_or_else(|| ApigentoolsError::UnknownLanguage(language.to_string()))
    }

    /// (language, config) pairs in name order.
    pub fn language_configs(&self) -> impl Iterator<Item = (&str, &LanguageConfig)> {
        self.languages.iter().map(|(name, lc)| (name.as_str(), lc))
    }
}
