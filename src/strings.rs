//! Stateless string helpers
//!
//! Thin conveniences with no invariants beyond their literal contracts.
//! They accompany the collection but are independent of it.

/// True when `haystack` contains `needle`
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// True when `haystack` contains at least one of `needles`
pub fn contains_one_of(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// True when `haystack` ends with `needle`
pub fn ends_with(haystack: &str, needle: &str) -> bool {
    haystack.ends_with(needle)
}

/// Translates URL-safe base64 back to the standard alphabet
///
/// Substitutes `_`, `-`, `*` with `/`, `+`, `=` respectively,
/// positionally. No length or alphabet validation is performed.
pub fn to_url_unsafe(base64_url: &str) -> String {
    base64_url
        .chars()
        .map(|c| match c {
            '_' => '/',
            '-' => '+',
            '*' => '=',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_finds_substrings() {
        assert!(contains("hello world", "lo wo"));
        assert!(!contains("hello world", "goodbye"));
        assert!(contains("anything", ""));
    }

    #[test]
    fn contains_one_of_finds_any_needle() {
        assert!(contains_one_of("hello world", &["nope", "world"]));
        assert!(!contains_one_of("hello world", &["nope", "never"]));
        assert!(!contains_one_of("hello world", &[]));
    }

    #[test]
    fn ends_with_matches_suffix_only() {
        assert!(ends_with("report.pdf", ".pdf"));
        assert!(!ends_with("report.pdf.bak", ".pdf"));
    }

    #[test]
    fn to_url_unsafe_translates_the_three_characters() {
        assert_eq!(to_url_unsafe("a-b_c*"), "a+b/c=");
        assert_eq!(to_url_unsafe("PDw_Pz8-Pg**"), "PDw/Pz8+Pg==");
        assert_eq!(to_url_unsafe(""), "");
        // Untouched input passes through as-is.
        assert_eq!(to_url_unsafe("abc123"), "abc123");
    }
}
