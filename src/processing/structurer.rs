//! Resume structuring: contact metadata and section partition

use crate::config::ProcessingConfig;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::resume::{ContactMetadata, ParsedResume, Section, SectionMap};
use regex::Regex;

pub(crate) const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Ten-digit core with common separators, optionally behind an international
/// calling code. Three arms: code-prefixed, parenthesized area code, bare.
pub(crate) const PHONE_PATTERN: &str = r"(?:\+\d{1,3}[ .-]?\(?\d{3}\)?[ .-]?\d{3}[ .-]?\d{4}|\(\d{3}\)[ .-]?\d{3}[ .-]?\d{4}|\b\d{3}[ .-]?\d{3}[ .-]?\d{4})\b";

const LINKEDIN_PATTERN: &str = r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+";

/// Lines that look like a person's name: 2-5 letter tokens, single interior
/// spaces, optional periods (initials).
const NAME_SHAPE_PATTERN: &str = r"^[A-Za-z][A-Za-z.]*(?: [A-Za-z][A-Za-z.]*){1,4}$";

/// A candidate name line is rejected if any of its tokens is a section
/// keyword; "Work Experience" must never win over a real name further down.
const RESERVED_NAME_TOKENS: &[&str] = &[
    "summary",
    "profile",
    "objective",
    "skills",
    "experience",
    "education",
    "projects",
    "certifications",
    "contact",
    "phone",
    "email",
    "linkedin",
    "resume",
    "cv",
];

/// Header catalog in priority order. A cleaned line matching several rows is
/// assigned to the first row that matches, so the order here is behavior, not
/// style.
const HEADER_PATTERNS: &[(Section, &str)] = &[
    (Section::Experience, r"\bexperience\b|\bemployment\b|\bhistory\b"),
    (
        Section::Education,
        r"\beducation(al)?\b|\bacademic background\b|\bqualifications?\b|\bdegrees?\b",
    ),
    (Section::Skills, r"\bskills\b"),
    (Section::Projects, r"\bprojects\b"),
    (
        Section::Certifications,
        r"\bcertifications?\b|\bcertificates?\b|\bawards?\b|\bachievements?\b|\blicenses?\b",
    ),
    (
        Section::Summary,
        r"\bsummary\b|\bprofile\b|\bobjective\b|\babout me\b",
    ),
    (Section::Languages, r"\blanguages?\b"),
    (Section::Interests, r"\binterests?\b|\bhobbies\b"),
];

pub struct ResumeStructurer {
    normalizer: TextNormalizer,
    header_catalog: Vec<(Section, Regex)>,
    header_line_max_chars: usize,
    section_dedup_probe_chars: usize,
    name_shape_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
    bullet_strip_regex: Regex,
}

impl Default for ResumeStructurer {
    fn default() -> Self {
        Self::new(&ProcessingConfig::default())
    }
}

impl ResumeStructurer {
    pub fn new(config: &ProcessingConfig) -> Self {
        let header_catalog = HEADER_PATTERNS
            .iter()
            .map(|(section, pattern)| {
                (*section, Regex::new(pattern).expect("Invalid header pattern"))
            })
            .collect();

        Self {
            normalizer: TextNormalizer::new(config),
            header_catalog,
            header_line_max_chars: config.header_line_max_chars,
            section_dedup_probe_chars: config.section_dedup_probe_chars,
            name_shape_regex: Regex::new(NAME_SHAPE_PATTERN).expect("Invalid name shape regex"),
            email_regex: Regex::new(EMAIL_PATTERN).expect("Invalid email regex"),
            phone_regex: Regex::new(PHONE_PATTERN).expect("Invalid phone regex"),
            linkedin_regex: Regex::new(LINKEDIN_PATTERN).expect("Invalid linkedin regex"),
            bullet_strip_regex: Regex::new(r"^[\s•·▪○‣>#*().:\d-]+")
                .expect("Invalid bullet strip regex"),
        }
    }

    /// Turn raw extracted text into a `ParsedResume`. Total over any input;
    /// extraction problems belong to the caller.
    pub fn structure(&self, raw_text: &str) -> ParsedResume {
        let text = self.normalizer.normalize(raw_text);

        let metadata = self.extract_metadata(&text);
        let sections = self.partition_sections(&text);
        let word_count = text.split_whitespace().count();

        ParsedResume {
            raw_text: text,
            metadata,
            sections,
            word_count,
        }
    }

    fn extract_metadata(&self, text: &str) -> ContactMetadata {
        ContactMetadata {
            name: self.extract_name(text),
            email: self
                .email_regex
                .find(text)
                .map(|m| m.as_str().to_string()),
            phone: self
                .phone_regex
                .find(text)
                .map(|m| m.as_str().to_string()),
            linkedin: self
                .linkedin_regex
                .find(text)
                .map(|m| m.as_str().to_string()),
        }
    }

    /// First line, top to bottom, that fits the name shape and is not built
    /// out of section keywords. A coarse guess by design.
    fn extract_name(&self, text: &str) -> Option<String> {
        for line in text.lines() {
            let candidate = line.trim();
            let length = candidate.chars().count();
            if !(4..=50).contains(&length) {
                continue;
            }
            if !self.name_shape_regex.is_match(candidate) {
                continue;
            }

            let reserved = candidate.split_whitespace().any(|token| {
                let token = token.to_lowercase();
                RESERVED_NAME_TOKENS.contains(&token.trim_matches('.'))
            });
            if reserved {
                continue;
            }

            return Some(candidate.to_string());
        }

        None
    }

    fn partition_sections(&self, text: &str) -> SectionMap {
        let mut sections = SectionMap::new();
        let mut current = Section::ContactInfo;
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(section) = self.match_header(trimmed) {
                self.flush_buffer(&mut sections, current, &mut buffer);
                current = section;
                continue;
            }

            buffer.push(trimmed);
        }

        self.flush_buffer(&mut sections, current, &mut buffer);
        sections
    }

    /// Short lines are header candidates; the catalog decides. Long lines are
    /// always content, whatever keywords they contain.
    fn match_header(&self, line: &str) -> Option<Section> {
        let cleaned = self.clean_header_line(line);
        if cleaned.is_empty() || cleaned.chars().count() > self.header_line_max_chars {
            return None;
        }

        for (section, pattern) in &self.header_catalog {
            if pattern.is_match(&cleaned) {
                return Some(*section);
            }
        }

        None
    }

    fn clean_header_line(&self, line: &str) -> String {
        let stripped = self.bullet_strip_regex.replace(line, "");
        stripped.trim().to_lowercase()
    }

    fn flush_buffer(&self, sections: &mut SectionMap, section: Section, buffer: &mut Vec<&str>) {
        if buffer.is_empty() {
            return;
        }

        let block = buffer.join("\n");
        buffer.clear();

        let entry = sections.entry(section).or_default();
        let probe = char_prefix(&block, self.section_dedup_probe_chars);
        if entry.contains(probe) {
            // The same block was already assigned here; a duplicated
            // extraction would otherwise double every section.
            return;
        }

        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(&block);
    }
}

fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
