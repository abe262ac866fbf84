//! Output formatters with colored console and JSON presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScanReport;
use crate::processing::ats_audit::{AtsAuditResult, AuditFinding, Severity};
use crate::processing::resume::ParsedResume;
use colored::{Color, Colorize};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Trait for formatting scan results
pub trait OutputFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String>;
    fn format_resume(&self, resume: &ParsedResume) -> Result<String>;
    fn format_audit(&self, audit: &AtsAuditResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and rich presentation
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_severity_icon(&self, severity: &Severity) -> String {
        if self.use_colors {
            let icon = match severity {
                Severity::High => "🚨",
                Severity::Medium => "⚠️",
                Severity::Low => "💡",
            };
            format!("{} ", icon)
        } else {
            let text_icon = match severity {
                Severity::High => "[!]",
                Severity::Medium => "[*]",
                Severity::Low => "[-]",
            };
            format!("{} ", text_icon)
        }
    }

    fn severity_color(severity: &Severity) -> Color {
        match severity {
            Severity::High => Color::Red,
            Severity::Medium => Color::Yellow,
            Severity::Low => Color::Blue,
        }
    }

    fn format_findings(&self, output: &mut String, findings: &[AuditFinding]) {
        for finding in findings {
            output.push_str(&format!(
                "• {}{} {}\n",
                self.format_severity_icon(&finding.severity),
                self.colorize(&finding.category, Self::severity_color(&finding.severity)),
                self.colorize(&format!("({})", finding.description), Color::BrightBlack)
            ));
            output.push_str(&format!("  Fix: {}\n\n", finding.recommendation));
        }
    }

    fn format_contact(&self, output: &mut String, resume: &ParsedResume) {
        let metadata = &resume.metadata;
        if let Some(name) = &metadata.name {
            output.push_str(&format!("Name: {}\n", self.colorize(name, Color::White)));
        }
        if let Some(email) = &metadata.email {
            output.push_str(&format!("Email: {}\n", self.colorize(email, Color::Cyan)));
        }
        if let Some(phone) = &metadata.phone {
            output.push_str(&format!("Phone: {}\n", self.colorize(phone, Color::Cyan)));
        }
        if let Some(linkedin) = &metadata.linkedin {
            output.push_str(&format!("LinkedIn: {}\n", self.colorize(linkedin, Color::Cyan)));
        }
        if metadata.name.is_none()
            && metadata.email.is_none()
            && metadata.phone.is_none()
            && metadata.linkedin.is_none()
        {
            output.push_str(&self.colorize("No contact details detected\n", Color::Yellow));
        }
    }

    fn format_sections(&self, output: &mut String, resume: &ParsedResume) {
        for (section, content) in &resume.sections {
            output.push_str(&format!("  • {}: {} characters\n", section, content.len()));
        }

        if self.detailed {
            output.push_str(&self.format_header("📄 Section Previews", 3));
            for (section, content) in &resume.sections {
                output.push_str(&format!(
                    "{}\n{}\n\n",
                    self.colorize(&section.to_string(), Color::Cyan),
                    truncate_preview(content, 200)
                ));
            }
        }
    }

    fn format_audit_body(&self, output: &mut String, audit: &AtsAuditResult) {
        let score_badge = self.format_score_badge(audit.compatibility_score);
        output.push_str(&format!(
            "Compatibility Score: {}% {}\n",
            audit.compatibility_score, score_badge
        ));

        if !audit.issues.is_empty() {
            output.push_str(&self.format_header("🚨 Issues", 2));
            self.format_findings(output, &audit.issues);
        }

        if !audit.warnings.is_empty() {
            output.push_str(&self.format_header("⚠️  Warnings", 2));
            self.format_findings(output, &audit.warnings);
        }

        if !audit.recommendations.is_empty() {
            output.push_str(&self.format_header("💡 Recommendations", 2));
            for (i, recommendation) in audit.recommendations.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
            }
        }

        if audit.issues.is_empty() && audit.warnings.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("✅ No compatibility problems detected", Color::Green)
            ));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📋 RESUME SCAN REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        let size_note = match report.metadata.file_size_bytes {
            Some(bytes) => format!("{} bytes", bytes),
            None => "size unknown".to_string(),
        };
        output.push_str(&format!(
            "Source: {} ({}, {})\n",
            report.metadata.source_file,
            report.metadata.source_format.to_uppercase(),
            size_note
        ));

        output.push_str(&self.format_header("👤 Contact Details", 2));
        self.format_contact(&mut output, &report.resume);

        output.push_str(&self.format_header("📑 Detected Sections", 2));
        output.push_str(&format!("Word count: {}\n", report.resume.word_count));
        self.format_sections(&mut output, &report.resume);

        output.push_str(&self.format_header("🎯 ATS Compatibility", 2));
        self.format_audit_body(&mut output, &report.audit);

        output.push_str(&format!(
            "\n{} Generated by Resume Scanner v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.scanner_version
        ));

        Ok(output)
    }

    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 PARSED RESUME", 1));
        output.push_str(&format!("Word count: {}\n", resume.word_count));

        output.push_str(&self.format_header("👤 Contact Details", 2));
        self.format_contact(&mut output, resume);

        output.push_str(&self.format_header("📑 Detected Sections", 2));
        self.format_sections(&mut output, resume);

        Ok(output)
    }

    fn format_audit(&self, audit: &AtsAuditResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🎯 ATS COMPATIBILITY AUDIT", 1));
        self.format_audit_body(&mut output, audit);

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        self.to_json(resume)
    }

    fn format_audit(&self, audit: &AtsAuditResult) -> Result<String> {
        self.to_json(audit)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn generate_report(&self, report: &ScanReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }

    pub fn generate_resume(&self, resume: &ParsedResume, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_resume(resume),
            OutputFormat::Json => self.json_formatter.format_resume(resume),
        }
    }

    pub fn generate_audit(&self, audit: &AtsAuditResult, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_audit(audit),
            OutputFormat::Json => self.json_formatter.format_audit(audit),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to a grapheme count so multi-byte text never splits mid-cluster.
fn truncate_preview(text: &str, max_graphemes: usize) -> String {
    match text.grapheme_indices(true).nth(max_graphemes) {
        Some((byte_index, _)) => format!("{}...", text[..byte_index].trim_end()),
        None => text.to_string(),
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_scan{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_scan{}.json", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::resume::{ContactMetadata, Section};

    fn sample_resume() -> ParsedResume {
        let mut sections = std::collections::BTreeMap::new();
        sections.insert(Section::Experience, "Built things".to_string());
        sections.insert(Section::Skills, "Rust".to_string());

        ParsedResume {
            raw_text: "Built things".to_string(),
            metadata: ContactMetadata {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@example.com".to_string()),
                phone: None,
                linkedin: None,
            },
            sections,
            word_count: 2,
        }
    }

    fn sample_audit() -> AtsAuditResult {
        AtsAuditResult {
            compatibility_score: 72,
            issues: vec![AuditFinding {
                category: "Contact Info".to_string(),
                severity: Severity::Medium,
                description: "No phone number found".to_string(),
                recommendation: "Add a phone number to your contact details".to_string(),
            }],
            warnings: vec![],
            recommendations: vec!["Add a phone number to your contact details".to_string()],
        }
    }

    #[test]
    fn test_console_report_without_colors() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_audit(&sample_audit()).unwrap();

        assert!(output.contains("Compatibility Score: 72% [GOOD]"));
        assert!(output.contains("[*] Contact Info"));
        assert!(output.contains("Fix: Add a phone number"));
    }

    #[test]
    fn test_console_resume_lists_sections_in_order() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_resume(&sample_resume()).unwrap();

        let experience_at = output.find("Experience").unwrap();
        let skills_at = output.find("Skills").unwrap();
        assert!(experience_at < skills_at);
        assert!(output.contains("Name: Jane Doe"));
    }

    #[test]
    fn test_json_formatter_round_trips() {
        let formatter = JsonFormatter::new(false);
        let json = formatter.format_audit(&sample_audit()).unwrap();

        let parsed: AtsAuditResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.compatibility_score, 72);
        assert_eq!(parsed.issues.len(), 1);
    }

    #[test]
    fn test_truncate_preview_respects_grapheme_boundaries() {
        assert_eq!(truncate_preview("short", 10), "short");

        let accented = "résumé écrit".repeat(30);
        let truncated = truncate_preview(&accented, 50);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.trim_end_matches("...").graphemes(true).count(), 50);
    }

    #[test]
    fn test_suggest_filename_uses_stem_and_extension() {
        let name = suggest_filename(&OutputFormat::Json, "/tmp/jane_doe.pdf", false);
        assert_eq!(name, "jane_doe_scan.json");
    }
}
