//! Strict spelling comparison for submitted answers.
//!
//! The check is deliberately unforgiving: trim both ends, then exact
//! case-sensitive equality. No edit distance, no normalization beyond the
//! trim. Dictation practice rewards the exact spelling or nothing.

/// Returns true when `submitted` matches `expected` after trimming both ends.
///
/// Pure and deterministic: the same inputs always produce the same result.
#[must_use]
pub fn evaluate(expected: &str, submitted: &str) -> bool {
    expected.trim() == submitted.trim()
}

/// Returns true when a submission is empty or whitespace-only.
///
/// Blank submissions are rejected before evaluation and never counted as an
/// attempt.
#[must_use]
pub fn is_blank(submitted: &str) -> bool {
    submitted.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_correct() {
        assert!(evaluate("вокзал", "вокзал"));
        assert!(evaluate("station", "station"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(evaluate("деревня", "  деревня "));
        assert!(evaluate(" parachute ", "parachute"));
    }

    #[test]
    fn typo_is_incorrect() {
        assert!(!evaluate("station", "staton"));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!evaluate("station", "Station"));
        assert!(!evaluate("Вокзал", "вокзал"));
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" кот "));
    }
}
