//! CLI interface for the resume scanner

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// File extensions the scanner accepts on the command line.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Resume parsing and ATS compatibility scanning tool")]
#[command(
    long_about = "Extract text from resume documents, structure it into sections and contact details, and audit it for ATS compatibility problems"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and audit a resume in one pass
    Scan {
        /// Path to resume file (PDF, DOCX, DOC, TXT)
        file: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Include section previews in console output
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Parse a resume into structured sections and contact details
    Parse {
        /// Path to resume file (PDF, DOCX, DOC, TXT)
        file: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Audit a resume for ATS compatibility problems
    Audit {
        /// Path to resume file (PDF, DOCX, DOC, TXT)
        file: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert!(matches!(parse_output_format("console"), Ok(OutputFormat::Console)));
        assert!(matches!(parse_output_format("JSON"), Ok(OutputFormat::Json)));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let resume = PathBuf::from("resume.PDF");
        assert!(validate_file_extension(&resume, SUPPORTED_EXTENSIONS).is_ok());

        let image = PathBuf::from("resume.png");
        assert!(validate_file_extension(&image, SUPPORTED_EXTENSIONS).is_err());

        let bare = PathBuf::from("resume");
        assert!(validate_file_extension(&bare, SUPPORTED_EXTENSIONS).is_err());
    }
}
