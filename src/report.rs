//! Report shaping: grouping, dedup, ordering.

use crate::scanner::RawFinding;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One report entry per file that had at least one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub file: String,
    /// Unique matched substrings, lexicographically sorted.
    pub matches: Vec<String>,
}

/// Group raw findings into the final report.
///
/// Files keep the order they were first seen during the walk; within a file,
/// matches are deduplicated and sorted. No file appears twice.
pub fn aggregate(raw: Vec<RawFinding>) -> Vec<ReportEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, BTreeSet<String>> = HashMap::new();

    for finding in raw {
        let matches = grouped.entry(finding.file.clone()).or_insert_with(|| {
            order.push(finding.file.clone());
            BTreeSet::new()
        });
        matches.extend(finding.matches);
    }

    order
        .into_iter()
        .map(|file| {
            let matches = grouped.remove(&file).unwrap_or_default();
            ReportEntry {
                file,
                matches: matches.into_iter().collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(file: &str, matches: &[&str]) -> RawFinding {
        RawFinding {
            file: file.to_string(),
            matches: matches.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[test]
    fn test_groups_by_file() {
        let report = aggregate(vec![
            raw("a.py", &["eval"]),
            raw("a.py", &["exec"]),
            raw("b.py", &["eval"]),
        ]);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].file, "a.py");
        assert_eq!(report[0].matches, vec!["eval", "exec"]);
        assert_eq!(report[1].file, "b.py");
    }

    #[test]
    fn test_duplicate_matches_collapse() {
        let report = aggregate(vec![
            raw("a.py", &["eval", "eval", "eval"]),
            raw("a.py", &["eval"]),
        ]);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].matches, vec!["eval"]);
    }

    #[test]
    fn test_matches_are_sorted() {
        let report = aggregate(vec![raw("a.py", &["exec", "eval", "pickle.load"])]);
        assert_eq!(report[0].matches, vec!["eval", "exec", "pickle.load"]);
    }

    #[test]
    fn test_first_seen_file_order_is_preserved() {
        let report = aggregate(vec![
            raw("z.py", &["eval"]),
            raw("a.py", &["eval"]),
            raw("z.py", &["exec"]),
            raw("m.py", &["eval"]),
        ]);

        let files: Vec<&str> = report.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, vec!["z.py", "a.py", "m.py"]);
    }

    #[test]
    fn test_serializes_to_expected_shape() {
        let report = aggregate(vec![raw("a.py", &["eval"])]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "file": "a.py", "matches": ["eval"] }])
        );
    }
}
