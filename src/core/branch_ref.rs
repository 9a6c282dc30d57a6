//! core::branch_ref
//!
//! Extraction of branch references from free-form text.
//!
//! A pull-request body or commit message can point at a branch of the
//! private companion repository with a marker line:
//!
//! ```text
//! ecobalyse-private: feat/new-materials
//! ```
//!
//! # Matching rules
//!
//! - The marker is matched case-insensitively; the captured value keeps its case.
//! - At least one whitespace character (newlines included) must follow the colon.
//! - The value is the longest run of `[A-Za-z0-9./_-]` after the whitespace and
//!   stops at the first other character.
//! - The marker may appear anywhere, even glued to a preceding word.
//! - The first match in the text wins.
//!
//! Extraction never fails: absence of a match is the only "not found" signal.
//!
//! # Example
//!
//! ```
//! use ecobalyse_release::core::branch_ref::extract_str;
//!
//! let body = "Adds the new dataset.\n\nEcobalyse-Private: data/textile-2025\n";
//! assert_eq!(extract_str(body).unwrap().as_str(), "data/textile-2025");
//!
//! assert!(extract_str("no marker here").is_none());
//! ```

use std::sync::OnceLock;

use regex::Regex;

use super::types::BranchReference;

/// Marker pattern; capture group 1 holds the branch name.
///
/// Case folding is scoped to the marker. In Unicode mode a case-insensitive
/// `[A-Za-z]` also matches letters such as U+212A KELVIN SIGN, which are not
/// allowed in a branch reference.
pub const BRANCH_MARKER_PATTERN: &str = r"(?i:ecobalyse-private):\s+([A-Za-z0-9./_-]+)";

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BRANCH_MARKER_PATTERN).expect("marker pattern is valid"))
}

/// Extract the branch reference from optional text.
///
/// `None` and empty text both yield `None`.
pub fn extract(text: Option<&str>) -> Option<BranchReference> {
    extract_str(text?)
}

/// Extract the branch reference from text.
pub fn extract_str(text: &str) -> Option<BranchReference> {
    let captures = marker_regex().captures(text)?;
    let value = captures.get(1)?.as_str();
    // The case-sensitive group only admits ASCII from the allowed set.
    BranchReference::new(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str) -> Option<String> {
        extract_str(text).map(BranchReference::into_string)
    }

    #[test]
    fn no_marker_is_absent() {
        assert_eq!(extracted(""), None);
        assert_eq!(extracted("just a commit message"), None);
        assert_eq!(extracted("ecobalyse: main"), None);
        assert_eq!(extracted("ecobalyse-private main"), None);
    }

    #[test]
    fn none_input_is_absent() {
        assert_eq!(extract(None), None);
        assert_eq!(extract(Some("")), None);
    }

    #[test]
    fn simple_marker() {
        assert_eq!(
            extracted("ecobalyse-private: test_branch_name"),
            Some("test_branch_name".to_string())
        );
    }

    #[test]
    fn marker_is_case_insensitive_value_is_not() {
        assert_eq!(
            extracted("ECOBALYSE-PRIVATE: Feature/MixedCase"),
            Some("Feature/MixedCase".to_string())
        );
        assert_eq!(
            extracted("Ecobalyse-Private: lower"),
            Some("lower".to_string())
        );
    }

    #[test]
    fn no_boundary_required_before_marker() {
        assert_eq!(
            extracted("prefixecobalyse-private: name"),
            Some("name".to_string())
        );
    }

    #[test]
    fn value_stops_at_first_disallowed_char() {
        assert_eq!(
            extracted("ecobalyse-private: test_bran<ch_name"),
            Some("test_bran".to_string())
        );
        assert_eq!(
            extracted("ecobalyse-private: feat/x, see above"),
            Some("feat/x".to_string())
        );
        assert_eq!(
            extracted("ecobalyse-private: v1.2 trailing words"),
            Some("v1.2".to_string())
        );
    }

    #[test]
    fn value_stops_at_non_ascii_letters() {
        // Both fold to ASCII letters under Unicode case-insensitive matching.
        assert_eq!(
            extracted("ecobalyse-private: feat\u{212A}x"),
            Some("feat".to_string())
        );
        assert_eq!(
            extracted("ecobalyse-private: ba\u{017F}e rest"),
            Some("ba".to_string())
        );
        assert_eq!(
            extracted("ecobalyse-private: caf\u{e9}/menu"),
            Some("caf".to_string())
        );
    }

    #[test]
    fn non_ascii_marker_case_variants_still_match() {
        // U+017F folds to `s`, so the marker itself stays Unicode-insensitive.
        assert_eq!(
            extracted("ecobaly\u{017F}e-private: main"),
            Some("main".to_string())
        );
    }

    #[test]
    fn whitespace_is_required_after_colon() {
        assert_eq!(extracted("ecobalyse-private:main"), None);
    }

    #[test]
    fn multiple_whitespace_and_newlines_after_colon() {
        assert_eq!(
            extracted("ecobalyse-private: \t  spaced"),
            Some("spaced".to_string())
        );
        assert_eq!(
            extracted("ecobalyse-private:\nnext-line"),
            Some("next-line".to_string())
        );
    }

    #[test]
    fn empty_capture_is_absent() {
        assert_eq!(extracted("ecobalyse-private: <b>"), None);
        assert_eq!(extracted("ecobalyse-private:   "), None);
    }

    #[test]
    fn marker_found_on_any_line() {
        let text = "Title of the PR\n\nSome description.\n\n\
                    ecobalyse-private: feat/multi-line\n\nMore text";
        assert_eq!(extracted(text), Some("feat/multi-line".to_string()));
    }

    #[test]
    fn html_wrapped_marker() {
        let text = "<p>ecobalyse-private: test_branch_name</p>";
        assert_eq!(extracted(text), Some("test_branch_name".to_string()));
    }

    #[test]
    fn first_match_wins() {
        let text = "ecobalyse-private: first\necobalyse-private: second";
        assert_eq!(extracted(text), Some("first".to_string()));
    }

    #[test]
    fn incomplete_marker_falls_through_to_next() {
        let text = "ecobalyse-private: <nothing>\necobalyse-private: real";
        assert_eq!(extracted(text), Some("real".to_string()));
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "body\necobalyse-private: same/branch";
        assert_eq!(extract_str(text), extract_str(text));
    }
}
