// Names skipped at every depth during a scan
use std::collections::BTreeSet;

pub const DEFAULT_IGNORED: [&str; 5] = [".git", ".github", ".meta", ".gitattributes", ".mailmap"];

pub fn default_ignored() -> BTreeSet<String> {
    DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect()
}

/// Exact base-name match, no globbing and no case folding.
pub fn is_ignored_name(ignored: &BTreeSet<String>, name: &str) -> bool {
    ignored.contains(name)
}
