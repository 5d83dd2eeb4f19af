use crate::{
    errors::Result,
    git::CurrentBranch,
    issue::{extract_issue, IssueKey},
    message::{self, CommitMessage},
};
use std::path::Path;

/// What the hook did with the commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The branch name carries no issue key, the file is left alone
    NoIssueInBranch,
    /// Merge commits keep the message git generated
    MergeCommit,
    /// The message already references an issue
    AlreadyTagged(IssueKey),
    /// The subject now contains the issue key from the branch
    Rewritten(IssueKey),
}

/// Tag the commit message at `path` with the issue key of the current branch
///
/// Only [`Outcome::Rewritten`] touches the file.
pub fn run(branch: &impl CurrentBranch, path: &Path) -> Result<Outcome> {
    let branch_name = branch.current_branch();
    log::debug!("Current branch: {:?}", branch_name);

    let Some(issue) = extract_issue(&branch_name) else {
        log::debug!("No issue key in branch name, nothing to do");
        return Ok(Outcome::NoIssueInBranch);
    };

    let text = message::load(path)?;

    if message::is_merge(&text) {
        log::debug!("Merge commit, leaving the message untouched");
        return Ok(Outcome::MergeCommit);
    }

    if let Some(existing) = extract_issue(&text) {
        log::debug!("Message already references {}", existing);
        return Ok(Outcome::AlreadyTagged(existing));
    }

    let rewritten = CommitMessage::parse(&text).with_issue(&issue);
    message::write(path, &rewritten)?;
    log::info!(
        "Added {} to commit message: {}",
        issue,
        rewritten.lines().next().unwrap_or_default()
    );

    Ok(Outcome::Rewritten(issue))
}
