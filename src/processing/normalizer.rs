//! Text normalization shared by the structurer and the ATS auditor

use crate::config::ProcessingConfig;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Literal repairs for artifacts that PDF and Word extractors are known to
/// produce (dropped spaces, OCR-style letter confusion).
const ARTIFACT_REPAIRS: &[(&str, &str)] = &[
    ("Bachelorof", "Bachelor of"),
    ("Masterof", "Master of"),
    ("Linkedln", "LinkedIn"),
    ("linkedln", "linkedin"),
];

pub struct TextNormalizer {
    newline_collapse: String,
    duplicate_probe_chars: usize,
    label_break_regex: Regex,
    label_space_regex: Regex,
    blank_run_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&ProcessingConfig::default())
    }
}

impl TextNormalizer {
    pub fn new(config: &ProcessingConfig) -> Self {
        // Labels are matched case-sensitively: "Telephone:" must not be split,
        // while a glued "JaneDoePhone:" must be.
        let label_break_regex = Regex::new(r"(\S)((?:Phone|Email):)")
            .expect("Invalid label break regex");

        let label_space_regex = Regex::new(r"((?:Phone|Email):)(\S)")
            .expect("Invalid label space regex");

        let blank_run_regex = Regex::new(r"\n{2,}")
            .expect("Invalid blank run regex");

        Self {
            newline_collapse: "\n".repeat(config.newline_collapse.max(1)),
            duplicate_probe_chars: config.duplicate_probe_chars,
            label_break_regex,
            label_space_regex,
            blank_run_regex,
        }
    }

    /// Normalize raw extracted text. Total over any input, and idempotent:
    /// `normalize(normalize(t)) == normalize(t)`.
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = self.collapse_duplicated_extraction(text);

        let mut result = collapsed.replace('\r', "");

        for (artifact, repair) in ARTIFACT_REPAIRS {
            result = result.replace(artifact, repair);
        }

        // Anchor contact labels: break before, space after.
        result = self
            .label_break_regex
            .replace_all(&result, "${1}\n${2}")
            .to_string();
        result = self
            .label_space_regex
            .replace_all(&result, "${1} ${2}")
            .to_string();

        result = self
            .blank_run_regex
            .replace_all(&result, self.newline_collapse.as_str())
            .to_string();

        result.trim().to_string()
    }

    /// Some extractors emit the whole document twice back to back. Detect the
    /// signature (the second half contains the opening of the first half) and
    /// keep only the first half. The halving repeats until the signature is
    /// gone, so a document emitted four times collapses to one copy, not two.
    fn collapse_duplicated_extraction<'a>(&self, text: &'a str) -> &'a str {
        let mut result = text;
        while let Some(first) = self.duplicated_first_half(result) {
            result = first;
        }
        result
    }

    fn duplicated_first_half<'a>(&self, text: &'a str) -> Option<&'a str> {
        let mut mid = text.len() / 2;
        while mid > 0 && !text.is_char_boundary(mid) {
            mid -= 1;
        }
        if mid == 0 {
            return None;
        }

        let (first, second) = text.split_at(mid);

        // A reliable signature needs the full probe length of material.
        let (probe_end, _) = first
            .grapheme_indices(true)
            .nth(self.duplicate_probe_chars)?;

        let probe = first[..probe_end].trim();
        if !probe.is_empty() && second.contains(probe) {
            Some(first)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::default()
    }

    fn sample_body() -> String {
        let mut body = String::from("Jane Doe\njane.doe@example.com\n");
        for i in 0..20 {
            body.push_str(&format!("Led project number {} to completion ahead of schedule.\n", i));
        }
        body
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = normalizer();
        let messy = "Jane Doe\r\n\r\n\r\nBachelorof Science\r\nEmail:jane@example.com\n\n\n\nLinkedln profile";

        let once = n.normalize(messy);
        let twice = n.normalize(&once);

        assert_eq!(once, twice);

        // Extraction bugs can emit the document more than twice.
        let quadrupled = sample_body().repeat(4);
        let once = n.normalize(&quadrupled);
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_normalize_strips_carriage_returns() {
        let n = normalizer();
        let result = n.normalize("line one\r\nline two\r\n");

        assert!(!result.contains('\r'));
        assert_eq!(result, "line one\nline two");
    }

    #[test]
    fn test_normalize_repairs_extraction_artifacts() {
        let n = normalizer();
        let result = n.normalize("Bachelorof Science in CS\nFind me on Linkedln");

        assert!(result.contains("Bachelor of Science"));
        assert!(result.contains("LinkedIn"));
    }

    #[test]
    fn test_normalize_anchors_contact_labels() {
        let n = normalizer();
        let result = n.normalize("Jane DoePhone:555-123-4567 other text");

        assert!(result.contains("Jane Doe\nPhone: 555-123-4567"));
    }

    #[test]
    fn test_normalize_leaves_telephone_alone() {
        let n = normalizer();
        let result = n.normalize("Telephone: 555-123-4567");

        assert_eq!(result, "Telephone: 555-123-4567");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let n = normalizer();
        let result = n.normalize("alpha\n\n\n\nbeta");

        assert_eq!(result, "alpha\nbeta");
    }

    #[test]
    fn test_normalize_collapse_width_two() {
        let config = ProcessingConfig {
            newline_collapse: 2,
            ..ProcessingConfig::default()
        };
        let n = TextNormalizer::new(&config);
        let result = n.normalize("alpha\n\n\n\n\nbeta\n\ngamma");

        assert_eq!(result, "alpha\n\nbeta\n\ngamma");
        assert_eq!(n.normalize(&result), result);
    }

    #[test]
    fn test_normalize_collapses_duplicated_extraction() {
        let n = normalizer();
        let body = sample_body();
        let doubled = format!("{}\n{}", body, body);

        let collapsed = n.normalize(&doubled);

        assert_eq!(collapsed, n.normalize(&body));
        assert!(collapsed.len() <= doubled.len() / 2 + 2);
    }

    #[test]
    fn test_normalize_collapses_repeated_duplication() {
        // Four copies back to back collapse to one, not to two.
        let n = normalizer();
        let body = sample_body();
        let quadrupled = body.repeat(4);

        let collapsed = n.normalize(&quadrupled);

        assert_eq!(collapsed, n.normalize(&body));
        assert_eq!(n.normalize(&collapsed), collapsed);
    }

    #[test]
    fn test_normalize_keeps_short_repetition() {
        // Too little material for a duplicate signature.
        let n = normalizer();
        let result = n.normalize("hello hello");

        assert_eq!(result, "hello hello");
    }

    #[test]
    fn test_normalize_handles_empty_input() {
        let n = normalizer();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   \n\n  "), "");
    }
}
