//! Built-in detection pattern sets.
//!
//! Two fixed sets: secret-like assignments and dangerous dynamic-execution
//! calls in Python sources. The lists are intentionally hardcoded; there is
//! no rule configuration surface.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// A named set of detection patterns sharing one file filter.
#[derive(Debug)]
pub struct PatternSet {
    pub name: &'static str,
    /// File extension this set is restricted to. `None` scans every file.
    pub extension: Option<&'static str>,
    pub patterns: Vec<Regex>,
}

static SECRETS: LazyLock<PatternSet> = LazyLock::new(|| PatternSet {
    name: "secrets",
    extension: None,
    patterns: vec![
        // Quoted values match non-greedily so a hit stops at the first
        // closing quote.
        Regex::new(r#"(?i)api[_-]?key\s*=\s*["'].*?["']"#).expect("secrets: invalid regex"),
        Regex::new(r#"(?i)secret\s*=\s*["'].*?["']"#).expect("secrets: invalid regex"),
        Regex::new(r"(?i)AWS_SECRET_ACCESS_KEY").expect("secrets: invalid regex"),
    ],
});

static DANGEROUS_CODE: LazyLock<PatternSet> = LazyLock::new(|| PatternSet {
    name: "dangerous-code",
    extension: Some("py"),
    patterns: vec![
        Regex::new(r"\beval\b").expect("dangerous-code: invalid regex"),
        Regex::new(r"\bexec\b").expect("dangerous-code: invalid regex"),
        Regex::new(r"\bpickle\.load\b").expect("dangerous-code: invalid regex"),
    ],
});

/// Which pattern set a scan applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Secrets,
    DangerousCode,
}

impl ScanMode {
    pub fn pattern_set(&self) -> &'static PatternSet {
        match self {
            ScanMode::Secrets => &SECRETS,
            ScanMode::DangerousCode => &DANGEROUS_CODE,
        }
    }

    /// Whether a file takes part in this scan.
    pub fn wants_file(&self, path: &Path) -> bool {
        match self.pattern_set().extension {
            None => true,
            Some(wanted) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == wanted),
        }
    }
}
