// Jira issue keys

use regex::Regex;
use std::fmt;

/// Project key of at least two uppercase letters, a dash, then the issue number
const ISSUE_PATTERN: &str = r"[A-Z]{2,}-[0-9]+";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey(String);

impl IssueKey {
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find the first issue key anywhere in the text
///
/// The search is case-sensitive and not anchored, so `feature/ABC-12-login`
/// yields `ABC-12`.
pub fn extract_issue(text: &str) -> Option<IssueKey> {
    let issue_re = Regex::new(ISSUE_PATTERN).ok()?;
    issue_re
        .find(text)
        .map(|found| IssueKey(found.as_str().to_string()))
}

#[cfg(test)]
impl From<&str> for IssueKey {
    fn from(value: &str) -> Self {
        IssueKey(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_branch_with_prefix() {
        let issue = extract_issue("feature/JIRA-123-new-button").expect("Should find issue");
        assert_eq!(issue.as_str(), "JIRA-123");
    }

    #[test]
    fn test_extract_plain_key() {
        assert_eq!(extract_issue("ABC-7"), Some(IssueKey::from("ABC-7")));
    }

    #[test]
    fn test_leftmost_match_wins() {
        let issue = extract_issue("OPS-1/merge-of-DEV-22").unwrap();
        assert_eq!(issue.as_str(), "OPS-1");
    }

    #[test]
    fn test_single_letter_project_is_ignored() {
        assert_eq!(extract_issue("X-1"), None);
        assert_eq!(extract_issue("fix/X-1-and-more"), None);
    }

    #[test]
    fn test_lowercase_project_is_ignored() {
        assert_eq!(extract_issue("feature/jira-123"), None);
        assert_eq!(extract_issue("Jira-123"), None);
    }

    #[test]
    fn test_missing_number_is_ignored() {
        assert_eq!(extract_issue("ABC-"), None);
        assert_eq!(extract_issue("ABC-x1"), None);
    }

    #[test]
    fn test_embedded_key_still_matches() {
        // the uppercase run is taken greedily from its first letter
        assert_eq!(extract_issue("xABC-12y").unwrap().as_str(), "ABC-12");
        assert_eq!(extract_issue("release/PROJ-4567").unwrap().as_str(), "PROJ-4567");
    }

    #[test]
    fn test_issue_pattern_compiles() {
        assert!(Regex::new(ISSUE_PATTERN).is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_issue(""), None);
    }

    #[test]
    fn test_all_digits_are_kept() {
        assert_eq!(extract_issue("AB-0012345 stuff").unwrap().to_string(), "AB-0012345");
    }
}
