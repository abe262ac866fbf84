//! Resume scanner library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeScannerError};
pub use output::report::{ReportMetadata, ScanReport};
pub use processing::ats_audit::{AtsAuditResult, AtsAuditor, AuditFinding, Severity};
pub use processing::pipeline::{PipelineOutput, ResumePipeline};
pub use processing::resume::{ContactMetadata, ParsedResume, Section, SectionMap};
pub use processing::structurer::ResumeStructurer;
