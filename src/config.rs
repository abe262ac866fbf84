//! Configuration management for the resume scanner

use crate::error::{Result, ResumeScannerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub audit: AuditConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// Tunables for text normalization and section detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Width that runs of 2+ newlines collapse to.
    pub newline_collapse: usize,
    /// Length of the first-half prefix probed for when detecting duplicated
    /// extraction output.
    pub duplicate_probe_chars: usize,
    /// Maximum length of a cleaned line still considered a section header.
    pub header_line_max_chars: usize,
    /// Length of the block prefix checked before appending to a section bucket.
    pub section_dedup_probe_chars: usize,
    pub enable_caching: bool,
}

/// Thresholds for the ATS audit checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Files smaller than this are flagged as likely-empty uploads.
    pub min_file_bytes: u64,
    pub short_resume_words: usize,
    pub long_resume_words: usize,
    /// Word count at which the substantial-content bonus applies.
    pub length_bonus_words: usize,
}

/// Penalty and bonus weights for the compatibility score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub high_issue_penalty: u32,
    pub medium_issue_penalty: u32,
    pub low_issue_penalty: u32,
    pub medium_warning_penalty: u32,
    pub low_warning_penalty: u32,
    pub email_bonus: u32,
    pub linkedin_bonus: u32,
    pub github_bonus: u32,
    pub length_bonus: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            audit: AuditConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            newline_collapse: 1,
            duplicate_probe_chars: 150,
            header_line_max_chars: 60,
            section_dedup_probe_chars: 50,
            enable_caching: true,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_file_bytes: 500,
            short_resume_words: 150,
            long_resume_words: 1200,
            length_bonus_words: 200,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high_issue_penalty: 15,
            medium_issue_penalty: 8,
            low_issue_penalty: 3,
            medium_warning_penalty: 5,
            low_warning_penalty: 2,
            email_bonus: 5,
            linkedin_bonus: 3,
            github_bonus: 3,
            length_bonus: 5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path. Unlike `load`, a missing file is an error
    /// rather than a trigger to write defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeScannerError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeScannerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("config.toml")
    }
}
