//! Pipeline coordinating extraction, structuring, and audit

use crate::config::Config;
use crate::error::Result;
use crate::input::manager::InputManager;
use crate::processing::ats_audit::{AtsAuditResult, AtsAuditor};
use crate::processing::resume::ParsedResume;
use crate::processing::structurer::ResumeStructurer;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tokio::fs;

/// Flat result of one full scan, before the output layer wraps it for
/// presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub resume: ParsedResume,
    pub audit: AtsAuditResult,
    pub source_file: String,
    pub source_format: String,
    pub file_size_bytes: Option<u64>,
    pub processing_time_ms: u64,
}

/// Coordinates the stateless components over files on disk. Extraction is
/// the only I/O; structuring and auditing are pure transforms.
pub struct ResumePipeline {
    manager: InputManager,
    structurer: ResumeStructurer,
    auditor: AtsAuditor,
}

impl ResumePipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            manager: InputManager::new().with_cache(config.processing.enable_caching),
            structurer: ResumeStructurer::new(&config.processing),
            auditor: AtsAuditor::new(config),
        }
    }

    pub async fn parse_file(&mut self, path: &Path) -> Result<ParsedResume> {
        let text = self.manager.extract_text(path).await?;
        Ok(self.structurer.structure(&text))
    }

    pub async fn audit_file(&mut self, path: &Path) -> Result<AtsAuditResult> {
        let text = self.manager.extract_text(path).await?;
        let format = declared_format(path);
        let size = file_size(path).await;

        Ok(self.auditor.audit(&format, size, &text))
    }

    pub async fn scan_file(&mut self, path: &Path) -> Result<PipelineOutput> {
        let start_time = Instant::now();

        let text = self.manager.extract_text(path).await?;
        let format = declared_format(path);
        let size = file_size(path).await;

        let resume = self.structurer.structure(&text);
        let audit = self.auditor.audit(&format, size, &text);

        let processing_time = start_time.elapsed();
        info!(
            "Scanned {} ({} words, score {}) in {} ms",
            path.display(),
            resume.word_count,
            audit.compatibility_score,
            processing_time.as_millis()
        );

        Ok(PipelineOutput {
            resume,
            audit,
            source_file: path.to_string_lossy().to_string(),
            source_format: format,
            file_size_bytes: size,
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}

fn declared_format(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// Best effort: the upload may already be cleaned up by the time the audit
/// runs, and that only skips the size check.
async fn file_size(path: &Path) -> Option<u64> {
    match fs::metadata(path).await {
        Ok(metadata) => Some(metadata.len()),
        Err(e) => {
            debug!("Could not stat {}: {}", path.display(), e);
            None
        }
    }
}
