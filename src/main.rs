//! Resume scanner: resume parsing and ATS compatibility scanning tool

mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, ResumeScannerError};
use log::{error, info};
use output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use output::report::ScanReport;
use processing::pipeline::ResumePipeline;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Scan {
            file,
            output,
            detailed,
            save,
        } => {
            info!("Starting resume scan");

            cli::validate_file_extension(&file, cli::SUPPORTED_EXTENSIONS)
                .map_err(|e| ResumeScannerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = cli::parse_output_format(&output)
                .map_err(ResumeScannerError::InvalidInput)?;

            println!("🔍 Resume scan");
            println!("📄 File: {}", file.display());
            println!("🔧 Output format: {:?}", output_format);

            let mut pipeline = ResumePipeline::new(&config);
            let report = ScanReport::from_scan(pipeline.scan_file(&file).await?);

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                let target = resolve_save_path(save_path, &output_format, &file);

                // Plain rendering for files, so no ANSI codes land on disk
                let file_generator =
                    ReportGenerator::with_options(false, detailed || config.output.detailed, true);
                let content = file_generator.generate_report(&report, &output_format)?;
                save_report_to_file(&content, &target)?;
                println!("💾 Report saved to {}", target.display());
            }

            println!(
                "✅ Scan complete. Compatibility score: {}%",
                report.audit.compatibility_score
            );
        }

        Commands::Parse { file, output } => {
            info!("Parsing resume into structured sections");

            cli::validate_file_extension(&file, cli::SUPPORTED_EXTENSIONS)
                .map_err(|e| ResumeScannerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = cli::parse_output_format(&output)
                .map_err(ResumeScannerError::InvalidInput)?;

            let mut pipeline = ResumePipeline::new(&config);
            let resume = pipeline.parse_file(&file).await?;

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                config.output.detailed,
                true,
            );
            println!("{}", generator.generate_resume(&resume, &output_format)?);
        }

        Commands::Audit { file, output } => {
            info!("Auditing resume for ATS compatibility");

            cli::validate_file_extension(&file, cli::SUPPORTED_EXTENSIONS)
                .map_err(|e| ResumeScannerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = cli::parse_output_format(&output)
                .map_err(ResumeScannerError::InvalidInput)?;

            let mut pipeline = ResumePipeline::new(&config);
            let audit = pipeline.audit_file(&file).await?;

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                config.output.detailed,
                true,
            );
            println!("{}", generator.generate_audit(&audit, &output_format)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", Config::config_path().display());
                println!("\nProcessing:");
                println!("  Newline collapse width: {}", config.processing.newline_collapse);
                println!("  Duplicate probe chars: {}", config.processing.duplicate_probe_chars);
                println!("  Header line max chars: {}", config.processing.header_line_max_chars);
                println!("  Extraction caching: {}", config.processing.enable_caching);
                println!("\nAudit thresholds:");
                println!("  Minimum file bytes: {}", config.audit.min_file_bytes);
                println!("  Short resume words: {}", config.audit.short_resume_words);
                println!("  Long resume words: {}", config.audit.long_resume_words);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

/// A directory save target gets a generated, timestamped filename; anything
/// else is used as given.
fn resolve_save_path(
    save_path: PathBuf,
    output_format: &config::OutputFormat,
    source_file: &std::path::Path,
) -> PathBuf {
    if save_path.is_dir() {
        save_path.join(suggest_filename(
            output_format,
            &source_file.to_string_lossy(),
            true,
        ))
    } else {
        save_path
    }
}
