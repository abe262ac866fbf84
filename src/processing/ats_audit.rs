//! ATS compatibility audit: rule-based checks and deterministic scoring

use crate::config::{AuditConfig, Config, ProcessingConfig, ScoringConfig};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::structurer::{EMAIL_PATTERN, PHONE_PATTERN};
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SUPPORTED_FORMATS: &[&str] = &["pdf", "docx", "doc", "txt"];

/// Symbols that render fine for humans and badly in ATS text dumps.
const DECORATIVE_SYMBOLS: &[char] = &['©', '®', '™', '★', '→', '←'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeywordGroup {
    Experience,
    Education,
    Skills,
    Achievement,
}

/// Keyword vocabulary scanned in one automaton pass. Presence of any word in
/// a group counts as a hit for that group.
const KEYWORD_GROUPS: &[(KeywordGroup, &[&str])] = &[
    (KeywordGroup::Experience, &["experience", "work", "employment"]),
    (
        KeywordGroup::Education,
        &["education", "academic", "university", "college", "degree"],
    ),
    (KeywordGroup::Skills, &["skills", "technologies", "programming"]),
    (
        KeywordGroup::Achievement,
        &["increased", "reduced", "improved", "delivered", "launched"],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAuditResult {
    pub compatibility_score: u8,
    pub issues: Vec<AuditFinding>,
    pub warnings: Vec<AuditFinding>,
    pub recommendations: Vec<String>,
}

pub struct AtsAuditor {
    normalizer: TextNormalizer,
    audit: AuditConfig,
    scoring: ScoringConfig,
    keyword_matcher: AhoCorasick,
    keyword_groups: Vec<KeywordGroup>,
    email_regex: Regex,
    phone_regex: Regex,
    multiplier_regex: Regex,
    currency_regex: Regex,
}

impl Default for AtsAuditor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AtsAuditor {
    pub fn new(config: &Config) -> Self {
        // The audit reports blank-line structure back to the user, so its
        // normalization keeps paragraph breaks instead of flattening them.
        let presentation = ProcessingConfig {
            newline_collapse: 2,
            ..config.processing.clone()
        };

        let mut patterns = Vec::new();
        let mut keyword_groups = Vec::new();
        for (group, words) in KEYWORD_GROUPS {
            for word in *words {
                patterns.push(*word);
                keyword_groups.push(*group);
            }
        }

        let keyword_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .expect("Invalid audit keyword set");

        Self {
            normalizer: TextNormalizer::new(&presentation),
            audit: config.audit.clone(),
            scoring: config.scoring.clone(),
            keyword_matcher,
            keyword_groups,
            email_regex: Regex::new(EMAIL_PATTERN).expect("Invalid email regex"),
            phone_regex: Regex::new(PHONE_PATTERN).expect("Invalid phone regex"),
            multiplier_regex: Regex::new(r"\b\d+(?:\.\d+)?x\b").expect("Invalid multiplier regex"),
            currency_regex: Regex::new(r"\$\d").expect("Invalid currency regex"),
        }
    }

    /// Audit a resume against the ATS rubric. Total function: any format
    /// string, any size, any text. `file_size` is `None` when the source file
    /// could not be statted, which skips the size check.
    pub fn audit(
        &self,
        file_format: &str,
        file_size: Option<u64>,
        resume_text: &str,
    ) -> AtsAuditResult {
        let text = self.normalizer.normalize(resume_text);
        let lower = text.to_lowercase();
        let word_count = text.split_whitespace().count();
        let groups = self.keyword_hits(&text);

        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        self.check_format_and_size(file_format, file_size, &mut issues);
        self.check_structure(&text, &groups, &mut issues);
        self.check_content(&text, word_count, &groups, &mut warnings);

        let compatibility_score = self.compute_score(&issues, &warnings, &lower, word_count);
        let recommendations = self.collect_recommendations(&issues, &warnings);

        AtsAuditResult {
            compatibility_score,
            issues,
            warnings,
            recommendations,
        }
    }

    fn keyword_hits(&self, text: &str) -> HashSet<KeywordGroup> {
        self.keyword_matcher
            .find_iter(text)
            .map(|mat| self.keyword_groups[mat.pattern().as_usize()])
            .collect()
    }

    fn check_format_and_size(
        &self,
        file_format: &str,
        file_size: Option<u64>,
        issues: &mut Vec<AuditFinding>,
    ) {
        let format = file_format.to_lowercase();
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            issues.push(finding(
                "File Format",
                Severity::High,
                format!("File format '{}' is not reliably parsed by ATS software", file_format),
                "Submit your resume as PDF, DOCX, or plain text",
            ));
        }

        if let Some(size) = file_size {
            if size < self.audit.min_file_bytes {
                issues.push(finding(
                    "File Size",
                    Severity::High,
                    format!("File is only {} bytes, which suggests an empty or broken upload", size),
                    "Re-export the resume and upload a complete file",
                ));
            }
        }
    }

    fn check_structure(
        &self,
        text: &str,
        groups: &HashSet<KeywordGroup>,
        issues: &mut Vec<AuditFinding>,
    ) {
        if !groups.contains(&KeywordGroup::Experience) {
            issues.push(finding(
                "Missing Section",
                Severity::High,
                "No experience-related keywords found".to_string(),
                "Add a clearly labeled work experience section",
            ));
        }
        if !groups.contains(&KeywordGroup::Education) {
            issues.push(finding(
                "Missing Section",
                Severity::Medium,
                "No education-related keywords found".to_string(),
                "Add an education section with your degree or institution",
            ));
        }
        if !groups.contains(&KeywordGroup::Skills) {
            issues.push(finding(
                "Missing Section",
                Severity::Medium,
                "No skills-related keywords found".to_string(),
                "Add a skills section listing relevant technologies",
            ));
        }

        if !self.email_regex.is_match(text) {
            issues.push(finding(
                "Contact Info",
                Severity::High,
                "No email address found".to_string(),
                "Include a professional email address near the top",
            ));
        }
        if !self.phone_regex.is_match(text) {
            issues.push(finding(
                "Contact Info",
                Severity::Medium,
                "No phone number found".to_string(),
                "Include a phone number with your contact details",
            ));
        }
    }

    fn check_content(
        &self,
        text: &str,
        word_count: usize,
        groups: &HashSet<KeywordGroup>,
        warnings: &mut Vec<AuditFinding>,
    ) {
        if word_count < self.audit.short_resume_words {
            warnings.push(finding(
                "Content Length",
                Severity::Medium,
                format!("Resume has only {} words", word_count),
                "Expand your experience and skills sections with specifics",
            ));
        } else if word_count > self.audit.long_resume_words {
            warnings.push(finding(
                "Content Length",
                Severity::Low,
                format!("Resume has {} words, more than most screeners read", word_count),
                "Tighten the content to the most relevant achievements",
            ));
        }

        let quantified = text.contains('%')
            || self.multiplier_regex.is_match(text)
            || self.currency_regex.is_match(text)
            || groups.contains(&KeywordGroup::Achievement);
        if !quantified {
            warnings.push(finding(
                "Quantified Achievements",
                Severity::Medium,
                "No quantified achievements found".to_string(),
                "Quantify results with percentages, multiples, or dollar amounts",
            ));
        }

        let found: Vec<char> = DECORATIVE_SYMBOLS
            .iter()
            .copied()
            .filter(|symbol| text.contains(*symbol))
            .collect();
        if !found.is_empty() {
            let listed = found
                .iter()
                .map(|symbol| symbol.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            warnings.push(finding(
                "Special Characters",
                Severity::Low,
                format!("Decorative symbols found: {}", listed),
                "Replace decorative symbols with plain text equivalents",
            ));
        }
    }

    /// Start at 100, subtract per finding, add bonuses, clamp to 0..=100.
    fn compute_score(
        &self,
        issues: &[AuditFinding],
        warnings: &[AuditFinding],
        lower: &str,
        word_count: usize,
    ) -> u8 {
        let mut score: i64 = 100;

        for issue in issues {
            score -= match issue.severity {
                Severity::High => self.scoring.high_issue_penalty,
                Severity::Medium => self.scoring.medium_issue_penalty,
                Severity::Low => self.scoring.low_issue_penalty,
            } as i64;
        }

        for warning in warnings {
            score -= match warning.severity {
                Severity::High | Severity::Medium => self.scoring.medium_warning_penalty,
                Severity::Low => self.scoring.low_warning_penalty,
            } as i64;
        }

        if lower.contains('@') {
            score += self.scoring.email_bonus as i64;
        }
        if lower.contains("linkedin") {
            score += self.scoring.linkedin_bonus as i64;
        }
        if lower.contains("github") {
            score += self.scoring.github_bonus as i64;
        }
        if word_count >= self.audit.length_bonus_words {
            score += self.scoring.length_bonus as i64;
        }

        score.clamp(0, 100) as u8
    }

    /// High-severity issue fixes first, then medium, then at most three of
    /// the warning suggestions.
    fn collect_recommendations(
        &self,
        issues: &[AuditFinding],
        warnings: &[AuditFinding],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        for severity in [Severity::High, Severity::Medium] {
            recommendations.extend(
                issues
                    .iter()
                    .filter(|issue| issue.severity == severity)
                    .map(|issue| issue.recommendation.clone()),
            );
        }

        recommendations.extend(
            warnings
                .iter()
                .take(3)
                .map(|warning| warning.recommendation.clone()),
        );

        recommendations
    }
}

fn finding(
    category: &str,
    severity: Severity,
    description: String,
    recommendation: &str,
) -> AuditFinding {
    AuditFinding {
        category: category.to_string(),
        severity,
        description,
        recommendation: recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auditor() -> AtsAuditor {
        AtsAuditor::default()
    }

    fn clean_resume_text() -> String {
        let mut text = String::from(
            "Jane Doe\n\
             jane.doe@example.com\n\
             Phone: +1 (555) 123-4567\n\
             linkedin.com/in/janedoe | github.com/janedoe\n\n\
             EXPERIENCE\n",
        );
        for _ in 0..18 {
            text.push_str(
                "Improved throughput and delivered measurable gains across production systems during this role.\n",
            );
        }
        text.push_str(
            "EDUCATION\n\
             BS Computer Science, State University\n\n\
             SKILLS\n\
             Rust, Python, cloud technologies, distributed systems\n",
        );
        text
    }

    #[test]
    fn test_clean_resume_scores_full_marks() {
        let a = auditor();
        let result = a.audit("pdf", Some(48_000), &clean_resume_text());

        assert_eq!(result.compatibility_score, 100);
        assert!(result.issues.is_empty());
        assert!(result.warnings.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_missing_email_is_a_high_issue_and_lowers_score() {
        let a = auditor();
        let text = clean_resume_text();
        let without_email = text.replace("jane.doe@example.com", "");

        let with_email = a.audit("pdf", Some(48_000), &text);
        let missing_email = a.audit("pdf", Some(48_000), &without_email);

        let contact_issues: Vec<&AuditFinding> = missing_email
            .issues
            .iter()
            .filter(|issue| issue.category == "Contact Info")
            .collect();
        assert_eq!(contact_issues.len(), 1);
        assert_eq!(contact_issues[0].severity, Severity::High);

        assert!(missing_email.compatibility_score < with_email.compatibility_score);
        // 100 - 15 (missing email) + 3 + 3 + 5 (linkedin, github, length)
        assert_eq!(missing_email.compatibility_score, 96);
    }

    #[test]
    fn test_short_resume_warns_and_deducts_five_points() {
        let a = auditor();
        let text = "Jane Doe\n\
                    jane@x.com\n\
                    555-123-4567\n\
                    EXPERIENCE\n\
                    Delivered services at Acme, improved reliability by 30%\n\
                    EDUCATION\n\
                    BS Computer Science, State University\n\
                    SKILLS\n\
                    Rust, Python, cloud technologies";

        let result = a.audit("pdf", Some(2_000), text);

        assert!(result.issues.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].category, "Content Length");
        assert_eq!(result.warnings[0].severity, Severity::Medium);
        // 100 - 5 (short) + 5 (email bonus)
        assert_eq!(result.compatibility_score, 100);

        // Same text behind a bad extension makes the deduction visible
        // instead of being absorbed by the 100 clamp.
        let result = a.audit("xyz", Some(2_000), text);
        assert_eq!(result.compatibility_score, 85);
    }

    #[test]
    fn test_decorative_symbols_one_warning_listing_all() {
        let a = auditor();
        let mut text = clean_resume_text();
        text.push_str("★ Employee of the month © 2024\n");

        let result = a.audit("pdf", Some(48_000), &text);

        let special: Vec<&AuditFinding> = result
            .warnings
            .iter()
            .filter(|warning| warning.category == "Special Characters")
            .collect();
        assert_eq!(special.len(), 1);
        assert_eq!(special[0].severity, Severity::Low);
        assert!(special[0].description.contains('★'));
        assert!(special[0].description.contains('©'));
    }

    #[test]
    fn test_empty_input_bad_format_tiny_file() {
        let a = auditor();
        let result = a.audit("exe", Some(10), "");

        // Issues: format 15, size 15, experience 15, education 8, skills 8,
        // email 15, phone 8. Warnings: short 5, quantified 5. No bonuses.
        assert_eq!(result.compatibility_score, 6);
        assert_eq!(result.issues.len(), 7);
        assert_eq!(result.warnings.len(), 2);

        // High recommendations lead, mediums follow, then warnings.
        assert_eq!(result.recommendations.len(), 9);
        assert_eq!(
            result.recommendations[0],
            "Submit your resume as PDF, DOCX, or plain text"
        );
        let first_medium = result
            .recommendations
            .iter()
            .position(|r| r == "Add an education section with your degree or institution")
            .unwrap();
        let last_high = result
            .recommendations
            .iter()
            .position(|r| r == "Include a professional email address near the top")
            .unwrap();
        assert!(last_high < first_medium);
    }

    #[test]
    fn test_unstattable_file_skips_size_check() {
        let a = auditor();
        let result = a.audit("pdf", None, &clean_resume_text());

        assert!(result
            .issues
            .iter()
            .all(|issue| issue.category != "File Size"));
        assert_eq!(result.compatibility_score, 100);
    }

    #[test]
    fn test_doc_and_txt_formats_are_accepted() {
        let a = auditor();
        for format in ["doc", "txt", "DOCX"] {
            let result = a.audit(format, Some(48_000), &clean_resume_text());
            assert!(
                result.issues.iter().all(|i| i.category != "File Format"),
                "format {} should be accepted",
                format
            );
        }
    }

    #[test]
    fn test_multiplier_counts_as_quantified() {
        let a = auditor();
        let base = "Jane Doe jane@x.com 555-123-4567 experience education skills ";

        let with_multiplier = format!("{} scaled ingest 3x over two quarters", base);
        let result = a.audit("pdf", Some(2_000), &with_multiplier);
        assert!(result
            .warnings
            .iter()
            .all(|w| w.category != "Quantified Achievements"));

        let without = format!("{} worked on ingest over two quarters", base);
        let result = a.audit("pdf", Some(2_000), &without);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.category == "Quantified Achievements"));
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let a = auditor();
        let long_text = "word ".repeat(2_000);
        for (format, size, text) in [
            ("exe", Some(0), ""),
            ("pdf", Some(1_000_000), long_text.as_str()),
            ("docx", None, "★ © ® ™ → ←"),
        ] {
            let result = a.audit(format, size, text);
            assert!(result.compatibility_score <= 100);
        }
    }

    #[test]
    fn test_result_serializes_with_lowercase_severities() {
        let a = auditor();
        let result = a.audit("exe", Some(10), "");

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"compatibility_score\":6"));
        assert!(json.contains("\"severity\":\"high\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }
}
