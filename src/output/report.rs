//! Report structures combining parse and audit results

use crate::processing::ats_audit::AtsAuditResult;
use crate::processing::pipeline::PipelineOutput;
use crate::processing::resume::ParsedResume;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full scan report: the structured resume, the compatibility audit, and
/// information about when and from what the report was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Structured resume extracted from the document
    pub resume: ParsedResume,

    /// ATS compatibility audit over the same text
    pub audit: AtsAuditResult,

    /// Report metadata and generation info
    pub metadata: ReportMetadata,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the scanner used
    pub scanner_version: String,

    /// Resume file scanned
    pub source_file: String,

    /// Declared format of the source file (lowercased extension)
    pub source_format: String,

    /// Size of the source file, when it could be read
    pub file_size_bytes: Option<u64>,

    /// Total processing time
    pub processing_time_ms: u64,
}

impl ScanReport {
    /// Wrap a pipeline result with generation metadata.
    pub fn from_scan(output: PipelineOutput) -> Self {
        let metadata = Self::create_metadata(&output);

        Self {
            resume: output.resume,
            audit: output.audit,
            metadata,
        }
    }

    fn create_metadata(output: &PipelineOutput) -> ReportMetadata {
        ReportMetadata {
            generated_at: Utc::now(),
            scanner_version: env!("CARGO_PKG_VERSION").to_string(),
            source_file: output.source_file.clone(),
            source_format: output.source_format.clone(),
            file_size_bytes: output.file_size_bytes,
            processing_time_ms: output.processing_time_ms,
        }
    }
}
