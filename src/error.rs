use std::path::PathBuf;
use thiserror::Error;

/// Conditions callers may want to tell apart from plain I/O failures.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Every ancestor of `path`, up to and including the root, has exactly one child.
    #[error("no common parent found for {}", path.display())]
    NoCommonParent { path: PathBuf },

    #[error("failed to decode payload of asset {code}")]
    Decode {
        code: String,
        #[source]
        source: serde_yaml::Error,
    },
}
