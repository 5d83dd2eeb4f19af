use git2::Repository;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Name of the branch currently checked out
///
/// Implementations never fail: detached HEAD, a missing repository or any
/// other problem resolves to an empty string.
pub trait CurrentBranch {
    fn current_branch(&self) -> String;
}

/// Reads HEAD through libgit2
pub struct Repo {
    start: Option<PathBuf>,
}

impl Repo {
    /// Locate the repository the way git does (working directory, `GIT_DIR`, ...)
    pub fn from_env() -> Self {
        Self { start: None }
    }

    #[cfg(test)]
    pub fn discover(path: impl Into<PathBuf>) -> Self {
        Self {
            start: Some(path.into()),
        }
    }

    fn open(&self) -> Result<Repository, git2::Error> {
        match &self.start {
            Some(path) => Repository::discover(path),
            None => Repository::open_from_env(),
        }
    }
}

impl CurrentBranch for Repo {
    fn current_branch(&self) -> String {
        let repo = match self.open() {
            Ok(repo) => repo,
            Err(e) => {
                log::debug!("Cannot open repository: {}", e);
                return String::new();
            }
        };

        // HEAD is read as a reference so that unborn branches still have a name
        let head = match repo.find_reference("HEAD") {
            Ok(head) => head,
            Err(e) => {
                log::debug!("Cannot read HEAD: {}", e);
                return String::new();
            }
        };

        match head.symbolic_target() {
            Some(target) => target
                .strip_prefix("refs/heads/")
                .unwrap_or(target)
                .to_string(),
            None => {
                log::debug!("HEAD is detached");
                String::new()
            }
        }
    }
}

/// Asks `git symbolic-ref --short HEAD`, giving up after a timeout
pub struct GitCommand {
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
    timeout: Duration,
}

impl GitCommand {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    const POLL_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            args: ["symbolic-ref", "--short", "HEAD"]
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
            dir: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the command, `None` when it fails or does not finish in time
    fn run_command(&self) -> Option<String> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::debug!("Failed to execute {}: {}", self.program, e);
                return None;
            }
        };

        // drained on its own thread so a chatty child cannot block on a full pipe
        let reader = child.stdout.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut stdout = String::new();
                pipe.read_to_string(&mut stdout).map(|_| stdout)
            })
        });

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if start.elapsed() >= self.timeout => {
                    log::debug!("{} did not finish within {:?}", self.program, self.timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => std::thread::sleep(Self::POLL_INTERVAL),
                Err(e) => {
                    log::debug!("Failed to wait for {}: {}", self.program, e);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
            }
        };

        if !status.success() {
            log::debug!("{} exited with {}", self.program, status);
            return None;
        }

        let stdout = reader?.join().ok()?.ok()?;
        Some(stdout.trim().to_string())
    }
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrentBranch for GitCommand {
    fn current_branch(&self) -> String {
        self.run_command().unwrap_or_default()
    }
}

/// Uses the second source when the first one has no branch
pub struct Fallback<A, B>(pub A, pub B);

impl<A: CurrentBranch, B: CurrentBranch> CurrentBranch for Fallback<A, B> {
    fn current_branch(&self) -> String {
        let branch = self.0.current_branch();
        if branch.is_empty() {
            self.1.current_branch()
        } else {
            branch
        }
    }
}

/// In-memory branch name
#[cfg(test)]
pub struct Fixed(pub &'static str);

#[cfg(test)]
impl CurrentBranch for Fixed {
    fn current_branch(&self) -> String {
        self.0.to_string()
    }
}
