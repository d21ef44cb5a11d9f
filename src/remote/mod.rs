//! Repository checkout into ephemeral workspaces.
//!
//! # Security Measures
//!
//! - Only `https://github.com/` sources are accepted; nothing else is cloned
//! - All clones are shallow (depth=1) to minimize attack surface
//! - Git hooks are disabled during clone to prevent code execution
//! - Interactive credential prompting is disabled so private or nonexistent
//!   repositories fail fast instead of hanging
//! - Every clone is bounded by a wall-clock timeout
//! - Scratch directories are removed when the `Workspace` guard drops, on
//!   success and failure alike

pub mod clone;
pub mod error;

pub use clone::{Cloner, DEFAULT_CLONE_TIMEOUT_SECS, TRUSTED_SOURCE_PREFIX, Workspace};
pub use error::RemoteError;
