//! Workspace tree scanning.
//!
//! Walks every regular file under a checkout root and applies the active
//! pattern set to its text. Files that cannot be read are skipped; a single
//! unreadable file never aborts the scan.

use crate::rules::ScanMode;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Matches collected for one (file, pattern) pair during a single pass.
///
/// Several raw findings may name the same file; grouping happens later in
/// [`crate::report::aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFinding {
    /// Path relative to the scanned root.
    pub file: String,
    /// Literal matched substrings, in match order.
    pub matches: Vec<String>,
}

/// Scan the tree under `root` with the given mode's pattern set.
///
/// The walk is name-sorted so reports for the same revision come out in the
/// same order every time. An empty result is a successful scan.
pub fn scan(root: &Path, mode: ScanMode) -> Vec<RawFinding> {
    let set = mode.pattern_set();
    let mut findings = Vec::new();

    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file());

    for entry in files {
        let path = entry.path();
        if !mode.wants_file(path) {
            continue;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        // Undecodable bytes are substituted rather than failing the file.
        let content = String::from_utf8_lossy(&bytes);

        let file = path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string();

        for pattern in &set.patterns {
            let matches: Vec<String> = pattern
                .find_iter(&content)
                .map(|m| m.as_str().to_string())
                .collect();
            if !matches.is_empty() {
                trace!(
                    file = %file,
                    pattern = pattern.as_str(),
                    count = matches.len(),
                    "pattern matched"
                );
                findings.push(RawFinding {
                    file: file.clone(),
                    matches,
                });
            }
        }
    }

    findings
}
