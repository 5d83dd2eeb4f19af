use clap::Parser;
use commands::hook::Hook;
use git::{Fallback, GitCommand, Repo};

mod commands;
mod core;
mod errors;
mod git;
mod issue;
mod message;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "jira-commit-msg", version)]
#[command(
    about = "Prefix the commit subject with the Jira issue key found in the branch name",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    hook: Hook,
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let branch = Fallback(Repo::from_env(), GitCommand::new());

    if let Err(e) = args.hook.execute(branch) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
