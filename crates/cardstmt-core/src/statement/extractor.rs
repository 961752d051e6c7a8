//! Ordered-fallback field extraction.

use regex::Regex;
use tracing::trace;

/// Pulls one field's value out of statement text.
///
/// Values are returned verbatim (trimmed); amounts and dates are never
/// parsed or reformatted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run a fallback chain against `text`.
    ///
    /// The first pattern that matches decides the outcome; later patterns
    /// are not tried even if that match yields nothing usable. The value is
    /// the last capture group, or the whole match for patterns without
    /// groups. A last group that did not participate, or a value that is
    /// empty after trimming, is a miss.
    pub fn extract(&self, text: &str, patterns: &[Regex]) -> Option<String> {
        for (index, pattern) in patterns.iter().enumerate() {
            let Some(caps) = pattern.captures(text) else {
                trace!("Pattern {} /{}/ did not match", index, pattern.as_str());
                continue;
            };

            let value = caps.get(caps.len() - 1).map(|m| m.as_str().trim());
            trace!("Pattern {} /{}/ matched: {:?}", index, pattern.as_str(), value);

            return value.filter(|v| !v.is_empty()).map(str::to_string);
        }

        None
    }
}

/// Run a fallback chain with a default extractor.
pub fn extract_field(text: &str, patterns: &[Regex]) -> Option<String> {
    FieldExtractor::new().extract(text, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn compile(patterns: &[&str]) -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_last_group_wins() {
        let patterns = compile(&[r"(\d{2})-(\d{2})-(\d{4})"]);
        assert_eq!(extract_field("01-02-2024", &patterns), Some("2024".to_string()));
    }

    #[test]
    fn test_whole_match_without_groups() {
        let patterns = compile(&[r"\d{4}X{8}\d{4}"]);
        assert_eq!(
            extract_field("Card  4315xxxxxxxx1234  ", &patterns),
            Some("4315xxxxxxxx1234".to_string())
        );
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let patterns = compile(&[r"Total:\s*(\S+)", r"Total:\s*\S+\s+(\S+)"]);
        let text = "Total: 100.00 200.00";
        assert_eq!(extract_field(text, &patterns), Some("100.00".to_string()));
    }

    #[test]
    fn test_falls_back_in_order() {
        let patterns = compile(&[r"New\s+Balance:\s*(\S+)", r"Total:\s*(\S+)"]);
        assert_eq!(extract_field("Total: 42.00", &patterns), Some("42.00".to_string()));
        assert_eq!(extract_field("nothing here", &patterns), None);
        assert_eq!(extract_field("anything", &[]), None);
    }

    #[test]
    fn test_first_match_stops_even_without_value() {
        // The optional group does not participate, and the second pattern
        // would match, but the chain stops at the first match.
        let patterns = compile(&[r"Due(:\s*\d+)?", r"Due\s+(\w+)"]);
        assert_eq!(extract_field("Due soon", &patterns), None);
    }

    #[test]
    fn test_case_insensitive_and_multiline() {
        let patterns = compile(&[r"^payment due date:\s*(.+)$"]);
        let text = "Header\nPAYMENT DUE DATE: 05 Jan, 2025  \nFooter";
        assert_eq!(extract_field(text, &patterns), Some("05 Jan, 2025".to_string()));
    }

    #[test]
    fn test_values_are_not_normalized() {
        let patterns = compile(&[r"Amount:\s*([0-9,]+\.?\d{0,2})"]);
        assert_eq!(
            extract_field("Amount: 1,23,456.7", &patterns),
            Some("1,23,456.7".to_string())
        );
    }

    #[test]
    fn test_deterministic() {
        let patterns = compile(&[r"(\w+)\s+(\w+)"]);
        let text = "alpha beta gamma";
        let first = extract_field(text, &patterns);
        assert_eq!(first, extract_field(text, &patterns));
        assert_eq!(first, Some("beta".to_string()));
    }
}
