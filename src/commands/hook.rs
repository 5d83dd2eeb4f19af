use crate::{
    core::{run, Outcome},
    errors::Result,
    git::CurrentBranch,
};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Hook {
    /// Commit message file, as passed by git to the commit-msg hook
    pub commit_msg_filepath: PathBuf,
}

impl Hook {
    pub fn execute(&self, branch: impl CurrentBranch) -> Result<()> {
        match run(&branch, &self.commit_msg_filepath)? {
            Outcome::Rewritten(issue) => log::debug!("Commit message tagged with {}", issue),
            outcome => log::debug!("Commit message left as is: {:?}", outcome),
        }
        Ok(())
    }
}
