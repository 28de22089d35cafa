//! Input sanitization and validation for post submissions.
//!
//! Posts are plain text: every markup tag (and any attributes it carries)
//! is stripped before validation, and the cleaned values are what get
//! persisted. Validation accumulates every failure instead of
//! short-circuiting so callers can surface all messages together.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum title length in characters, measured after sanitization.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum body length in characters, measured after sanitization.
pub const BODY_MAX_CHARS: usize = 1000;

/// Regex matching a markup tag, attributes included.
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

/// Strip all markup tags from a string and trim surrounding whitespace.
///
/// Equivalent to an "allow nothing" HTML sanitization policy: `<b>`,
/// `<script src=...>`, closing tags, and anything else delimited by
/// `<`...`>` is removed outright. Idempotent: the output contains no
/// remaining tag, so a second pass is a no-op.
pub fn strip_tags(input: &str) -> String {
    TAG_REGEX.replace_all(input, "").trim().to_string()
}

/// A sanitized post submission.
///
/// `title` and `body` are the cleaned values; `errors` holds every
/// validation failure in rule order. An empty `errors` list means the
/// submission may be persisted. Validation failure is data, never a
/// panic or an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Sanitized title.
    pub title: String,
    /// Sanitized body.
    pub body: String,
    /// Accumulated validation error messages.
    pub errors: Vec<String>,
}

impl Submission {
    /// Sanitize and validate a raw title/body pair.
    ///
    /// Callers coerce absent input to the empty string before calling.
    pub fn sanitize(raw_title: &str, raw_body: &str) -> Self {
        let title = strip_tags(raw_title);
        let body = strip_tags(raw_body);

        let mut errors = Vec::new();

        if title.is_empty() {
            errors.push("Title is required.".to_string());
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            errors.push("Title cannot exceed 100 characters".to_string());
        }
        if body.is_empty() {
            errors.push("Content is required.".to_string());
        }
        if body.chars().count() > BODY_MAX_CHARS {
            errors.push("Content cannot exceed 1000 characters".to_string());
        }

        Self {
            title,
            body,
            errors,
        }
    }

    /// Whether the submission passed every validation rule.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_tags_removes_markup_and_attributes() {
        assert_eq!(strip_tags("<b>bold</b>"), "bold");
        assert_eq!(
            strip_tags(r#"<script src="evil.js">alert(1)</script>"#),
            "alert(1)"
        );
        assert_eq!(strip_tags("  plain text  "), "plain text");
        assert_eq!(strip_tags("<img onerror=x>"), "");
    }

    #[test]
    fn test_strip_tags_unbalanced_input() {
        assert_eq!(strip_tags("a < b and c > d"), "a  d");
        assert_eq!(strip_tags("no closing < here"), "no closing < here");
    }

    #[test]
    fn test_valid_submission() {
        let submission = Submission::sanitize("Hi", "World");
        assert!(submission.is_valid());
        assert_eq!(submission.title, "Hi");
        assert_eq!(submission.body, "World");
    }

    #[test]
    fn test_missing_fields_accumulate() {
        let submission = Submission::sanitize("", "");
        assert_eq!(
            submission.errors,
            vec!["Title is required.", "Content is required."]
        );
    }

    #[test]
    fn test_tag_only_title_is_missing_after_sanitization() {
        let submission = Submission::sanitize("<b></b>", "body");
        assert!(submission
            .errors
            .contains(&"Title is required.".to_string()));
    }

    #[test]
    fn test_title_length_boundary() {
        // 100 accepted, 101 rejected; limits apply to the sanitized value
        let submission = Submission::sanitize(&"t".repeat(100), "body");
        assert!(submission.is_valid());

        let submission = Submission::sanitize(&"t".repeat(101), "body");
        assert_eq!(
            submission.errors,
            vec!["Title cannot exceed 100 characters"]
        );
    }

    #[test]
    fn test_body_length_boundary() {
        let submission = Submission::sanitize("title", &"b".repeat(1000));
        assert!(submission.is_valid());

        let submission = Submission::sanitize("title", &"b".repeat(1001));
        assert_eq!(
            submission.errors,
            vec!["Content cannot exceed 1000 characters"]
        );
    }

    #[test]
    fn test_length_checked_after_stripping() {
        // 101 raw characters, 98 after the tag is removed
        let raw = format!("<b>{}", "t".repeat(98));
        let submission = Submission::sanitize(&raw, "body");
        assert!(submission.is_valid());
    }

    proptest! {
        #[test]
        fn prop_strip_tags_idempotent(input in ".{0,200}") {
            let once = strip_tags(&input);
            prop_assert_eq!(strip_tags(&once), once.clone());
        }

        #[test]
        fn prop_sanitized_output_has_no_tags(input in ".{0,200}") {
            let cleaned = strip_tags(&input);
            prop_assert!(!TAG_REGEX.is_match(&cleaned));
        }
    }
}
