use crate::model::{AssetCode, EntryKey};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// <type>-sr<code>; type is greedy and may itself contain '-'
static PART_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)-(sr[^ -]+)$").unwrap());

/// Split `name` into `(type, code)` when it follows the `<type>-sr…` convention.
pub fn parse_asset_name(name: &str) -> Option<(String, AssetCode)> {
    PART_RE.captures(name).map(|c| (c[1].to_string(), AssetCode(c[2].to_string())))
}

/// How an item refers to the directory that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRef {
    /// The directory is itself an asset.
    Asset(AssetCode),
    /// A plain folder, still to be resolved into a Location entry.
    Folder(std::path::PathBuf),
}

impl LocationRef {
    pub fn key(&self) -> EntryKey {
        match self {
            LocationRef::Asset(code) => EntryKey::Code(code.clone()),
            LocationRef::Folder(path) => EntryKey::folder(path),
        }
    }
}

/// The root has no name and so is always a plain folder.
pub fn classify_location(dir: &Path) -> LocationRef {
    let named = dir.file_name().and_then(|n| n.to_str()).and_then(parse_asset_name);
    match named {
        Some((_, code)) => LocationRef::Asset(code),
        None => LocationRef::Folder(crate::model::normalize_rel(dir)),
    }
}
