// Commit message handling

use crate::{
    errors::{HookError, Result},
    issue::IssueKey,
};
use regex::Regex;
use std::path::Path;

/// Conventional commit type with an optional scope, followed by a colon
const CONVENTIONAL_PATTERN: &str =
    r"^(build|chore|ci|docs|feat|fix|perf|refactor|revert|style|test)(\(.*\))?:";

/// Type used when the subject does not follow the conventional commit format
const DEFAULT_PREFIX: &str = "chore:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: String,
}

impl CommitMessage {
    /// Split a message into its first line and the trimmed remainder
    pub fn parse(text: &str) -> Self {
        let (subject, body) = match text.trim().split_once('\n') {
            Some((subject, rest)) => (subject, rest.trim()),
            None => (text.trim(), ""),
        };
        Self {
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    /// Render the message with the issue key inserted in the subject
    ///
    /// The key goes right after a conventional commit prefix such as `fix(api):`,
    /// otherwise the subject gets a `chore:` prefix followed by the key.
    pub fn with_issue(&self, issue: &IssueKey) -> String {
        let subject = match conventional_prefix_len(&self.subject) {
            Some(end) => {
                let (prefix, description) = self.subject.split_at(end);
                format!("{} {} {}", prefix, issue, description.trim_start())
            }
            None => format!("{} {} {}", DEFAULT_PREFIX, issue, self.subject),
        };

        if self.body.is_empty() {
            subject
        } else {
            format!("{}\n\n{}", subject, self.body)
        }
    }
}

/// Length of the conventional commit prefix, up to and including the first colon
pub fn conventional_prefix_len(subject: &str) -> Option<usize> {
    let conventional_re = Regex::new(CONVENTIONAL_PATTERN).ok()?;
    if !conventional_re.is_match(subject) {
        return None;
    }
    subject.find(':').map(|colon| colon + 1)
}

/// Merge commits are generated by git and keep their own format
pub fn is_merge(text: &str) -> bool {
    text.starts_with("Merge ")
}

/// Remove the lines git treats as comments, keeping every other line as is
pub fn strip_comments(raw: &str) -> String {
    raw.split_inclusive('\n')
        .filter(|line| !line.starts_with('#'))
        .collect()
}

/// Turn `\r\n` and lone `\r` line endings into `\n`
pub fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read the commit message file without its comment lines
pub fn load(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|source| HookError::CommitMessage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(strip_comments(&normalize_newlines(&raw)))
}

/// Replace the whole content of the commit message file
pub fn write(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| {
        log::error!("Cannot write commit message to {}: {}", path.display(), source);
        HookError::CommitMessage {
            path: path.to_path_buf(),
            source,
        }
    })
}
