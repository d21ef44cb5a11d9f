use super::error::RemoteError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

/// Trusted source prefix. Checkouts are refused for anything else, including
/// plain HTTP, SSH, and other hosting domains.
pub const TRUSTED_SOURCE_PREFIX: &str = "https://github.com/";

/// Default wall-clock limit for a single clone.
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 30;

/// A shallow checkout in a request-private scratch directory.
///
/// The directory is removed recursively when the workspace is dropped, so a
/// handler that holds one cannot return without releasing it, whatever exit
/// path it takes.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Path to the checkout root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Repository cloner with hardened git invocation.
pub struct Cloner {
    /// Clone timeout in seconds
    timeout_secs: u64,
}

impl Default for Cloner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cloner {
    pub fn new() -> Self {
        Self {
            timeout_secs: DEFAULT_CLONE_TIMEOUT_SECS,
        }
    }

    /// Set clone timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Validate the repository URL against the allow-list.
    pub fn validate_url(&self, url: &str) -> Result<(), RemoteError> {
        if url.starts_with(TRUSTED_SOURCE_PREFIX) {
            Ok(())
        } else {
            Err(RemoteError::InvalidUrl(url.to_string()))
        }
    }

    /// Acquire a shallow checkout of `url` in a fresh workspace.
    ///
    /// On any clone failure the partially-created directory is removed before
    /// the error is returned. On success the caller owns the workspace and
    /// its eventual deletion (via drop).
    pub async fn checkout(&self, url: &str) -> Result<Workspace, RemoteError> {
        self.validate_url(url)?;

        let dir = TempDir::new().map_err(RemoteError::TempDir)?;
        // An early return below drops `dir` and with it the partial checkout.
        self.execute_clone(url, dir.path()).await?;

        debug!(url, "checkout complete");
        Ok(Workspace { dir })
    }

    async fn execute_clone(&self, url: &str, target: &Path) -> Result<(), RemoteError> {
        let mut cmd = Command::new("git");

        // No hooks, no prompts: a checkout of untrusted content must neither
        // execute repository code nor block on credentials.
        cmd.env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_TEMPLATE_DIR", "")
            .args([
                "clone",
                "--depth",
                "1",
                "--single-branch",
                "--no-tags",
                "-c",
                "core.hooksPath=/dev/null",
                "-c",
                "advice.detachedHead=false",
            ])
            .arg(url)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RemoteError::GitNotFound
            } else {
                warn!(url, error = %e, "failed to spawn git");
                RemoteError::CloneFailed {
                    url: url.to_string(),
                }
            }
        })?;

        let timeout = Duration::from_secs(self.timeout_secs);
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                warn!(url, error = %e, "failed to collect git output");
                RemoteError::CloneFailed {
                    url: url.to_string(),
                }
            })?,
            Err(_) => {
                // Dropping the timed-out future drops the child handle, and
                // kill_on_drop reaps the subprocess.
                warn!(url, timeout_secs = self.timeout_secs, "clone timed out");
                return Err(RemoteError::CloneTimeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Stderr stays in the log; clients get a fixed short reason.
            warn!(url, stderr = %stderr.trim(), "git clone failed");
            return Err(RemoteError::CloneFailed {
                url: url.to_string(),
            });
        }

        Ok(())
    }
}
