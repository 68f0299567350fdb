use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::mapping::TagSet;

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// `tpy` command line tool.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Reject Typecraft XML that lacks required elements
    #[serde(default = "default_true")]
    pub strict_mode: bool,

    /// Language code for texts built from raw input (ISO 639-1 or 639-3)
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Title for texts built from raw input
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Target tagset of `--map-tags`
    #[serde(default = "default_tagset")]
    pub tagset: String,

    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Tagger settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TaggerConfig {
    // @field: JSON lexicon used by the lexicon tagger
    #[serde(default)]
    pub lexicon_path: Option<String>,

    // @field: Match lexicon entries case-insensitively
    #[serde(default)]
    pub lowercase_lookup: bool,
}

/// XML output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Indent nested elements
    #[serde(default)]
    pub pretty: bool,

    // @field: Spaces per level when pretty printing
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_width: default_indent_width(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_title() -> String {
    "Automatically generated text from tpy".to_string()
}

fn default_tagset() -> String {
    TagSet::default().as_str().to_string()
}

fn default_indent_width() -> usize {
    2
}

impl Config {
    /// Loads the configuration at `path`; a missing file gives the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.default_language)
            .with_context(|| format!("Invalid default_language '{}'", self.default_language))?;

        self.tagset()?;

        if self.output.pretty && self.output.indent_width == 0 {
            return Err(anyhow!("output.indent_width must be positive when pretty printing"));
        }

        Ok(())
    }

    pub fn tagset(&self) -> Result<TagSet> {
        self.tagset
            .parse::<TagSet>()
            .map_err(|e| anyhow!("Invalid tagset: {}", e))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            strict_mode: default_true(),
            default_language: default_language(),
            default_title: default_title(),
            tagset: default_tagset(),
            tagger: TaggerConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
