use thiserror::Error;

/// Errors produced while acquiring a repository checkout.
///
/// Clone stderr is logged at the failure site and deliberately kept out of
/// these variants so it can never leak into a client-facing message.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// URL failed the scheme/host allow-list; no clone was attempted
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),

    /// Git clone returned non-zero or could not be spawned
    #[error("git clone failed for {url}")]
    CloneFailed { url: String },

    /// Clone exceeded the wall-clock limit; the child process was killed
    #[error("clone timed out after {timeout_secs}s for {url}")]
    CloneTimeout { url: String, timeout_secs: u64 },

    /// Scratch directory could not be created
    #[error("temporary directory error: {0}")]
    TempDir(#[source] std::io::Error),

    /// Git command not found on this host
    #[error("git command not found")]
    GitNotFound,
}

impl RemoteError {
    /// Whether the failure is attributable to the request rather than the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RemoteError::InvalidUrl(_)
                | RemoteError::CloneFailed { .. }
                | RemoteError::CloneTimeout { .. }
        )
    }
}
