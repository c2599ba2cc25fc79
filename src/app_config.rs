use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::matching::{PronunciationChecker, SimilarityAlgorithm};
use crate::speech::{DEFAULT_SPEECH_RATE, DEFAULT_VOICE_LANG};

/// Application configuration module
/// This module handles loading, validating and saving the JSON configuration.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the vocabulary content file
    #[serde(default = "default_content_path")]
    pub content_path: String,

    /// Path to the statistics database, `None` for the user data directory
    #[serde(default)]
    pub database_path: Option<String>,

    /// Matching settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Drill settings
    #[serde(default)]
    pub drill: DrillConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Pronunciation matching settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Similarity threshold for lenient drills
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Similarity threshold for strict drills
    #[serde(default = "default_strict_threshold")]
    pub strict_threshold: f64,

    /// Similarity algorithm used when containment fails
    #[serde(default)]
    pub algorithm: SimilarityAlgorithm,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            strict_threshold: default_strict_threshold(),
            algorithm: SimilarityAlgorithm::default(),
        }
    }
}

impl MatchingConfig {
    /// Build a checker for the lenient or strict threshold
    pub fn checker(&self, strict: bool) -> PronunciationChecker {
        let threshold = if strict { self.strict_threshold } else { self.threshold };
        PronunciationChecker::new(threshold).with_algorithm(self.algorithm)
    }
}

/// Drill session settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DrillConfig {
    /// Items asked per round
    #[serde(default = "default_items_per_round")]
    pub items_per_round: usize,

    /// Tries per item before moving on
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Shuffle items before a round
    #[serde(default = "default_true")]
    pub shuffle: bool,

    /// Speak each prompt before listening
    #[serde(default = "default_true")]
    pub speak_prompts: bool,

    /// Voice language for prompts
    #[serde(default = "default_voice_lang")]
    pub voice_lang: String,

    /// Speaking rate for prompts
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            items_per_round: default_items_per_round(),
            max_attempts: default_max_attempts(),
            shuffle: true,
            speak_prompts: true,
            voice_lang: default_voice_lang(),
            speech_rate: default_speech_rate(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_content_path() -> String {
    "data/logic.json".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_strict_threshold() -> f64 {
    0.7
}

fn default_items_per_round() -> usize {
    10
}

fn default_max_attempts() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_voice_lang() -> String {
    DEFAULT_VOICE_LANG.to_string()
}

fn default_speech_rate() -> f32 {
    DEFAULT_SPEECH_RATE
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_path: default_content_path(),
            database_path: None,
            matching: MatchingConfig::default(),
            drill: DrillConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the configuration, writing the default one if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save the configuration as pretty JSON, replacing the file atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file
            .persist(path)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.content_path.trim().is_empty() {
            return Err(anyhow!("Content path must not be empty"));
        }

        for (name, value) in [
            ("threshold", self.matching.threshold),
            ("strict_threshold", self.matching.strict_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("Matching {} must be between 0 and 1, got {}", name, value));
            }
        }

        if self.drill.items_per_round == 0 {
            return Err(anyhow!("Drill items_per_round must be at least 1"));
        }

        if self.drill.max_attempts == 0 {
            return Err(anyhow!("Drill max_attempts must be at least 1"));
        }

        if self.drill.speech_rate <= 0.0 || !self.drill.speech_rate.is_finite() {
            return Err(anyhow!("Drill speech_rate must be positive, got {}", self.drill.speech_rate));
        }

        Ok(())
    }

    /// Where the statistics database lives
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => crate::database::DatabaseConnection::default_database_path(),
        }
    }
}
