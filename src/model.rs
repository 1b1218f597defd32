use crate::error::InventoryError;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Marker path for the traversal root. Every folder path in an inventory is relative to it.
pub const ROOT_MARKER: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCode(pub String);

impl AssetCode {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for AssetCode {
    fn from(s: &str) -> Self { AssetCode(s.to_string()) }
}

/// Key of the inventory map. Codes and folder paths share one namespace but never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryKey {
    Code(AssetCode),
    Folder(PathBuf),
}

impl EntryKey {
    pub fn root() -> Self { EntryKey::Folder(PathBuf::from(ROOT_MARKER)) }

    pub fn code(code: &str) -> Self { EntryKey::Code(AssetCode::from(code)) }

    pub fn folder(path: impl AsRef<Path>) -> Self { EntryKey::Folder(normalize_rel(path.as_ref())) }

    pub fn is_root(&self) -> bool { matches!(self, EntryKey::Folder(p) if p.as_os_str() == ROOT_MARKER) }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Code(c) => write!(f, "{}", c),
            EntryKey::Folder(p) => write!(f, "{}/", p.display()),
        }
    }
}

/// A plain folder acting as an anchor in the forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: PathBuf,
    /// Highest common parent of `path`.
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub asset_code: AssetCode,
    #[serde(rename = "type")]
    pub kind: String,
    /// Parent asset code, or the containing folder when that folder is not an asset.
    pub location: EntryKey,
    #[serde(serialize_with = "lossy_utf8")]
    pub data: Vec<u8>,
}

impl Asset {
    /// Decode the raw payload. Never called during traversal.
    pub fn load_data<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_slice(&self.data)
            .map_err(|source| InventoryError::Decode { code: self.asset_code.to_string(), source }.into())
    }

    pub fn load_document(&self) -> Result<serde_yaml::Value> { self.load_data() }
}

fn lossy_utf8<S: Serializer>(data: &[u8], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(data))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Asset(Asset),
    Location(Location),
}

impl Entry {
    /// Where this entry points in the forest.
    pub fn location_key(&self) -> EntryKey {
        match self {
            Entry::Asset(a) => a.location.clone(),
            Entry::Location(l) => EntryKey::folder(&l.location),
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self { Entry::Asset(a) => Some(a), Entry::Location(_) => None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory { pub(crate) entries: BTreeMap<EntryKey, Entry> }

impl Inventory {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn contains_key(&self, key: &EntryKey) -> bool { self.entries.contains_key(key) }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> { self.entries.get(key) }

    pub fn asset(&self, code: &str) -> Option<&Asset> { self.get(&EntryKey::code(code)).and_then(Entry::as_asset) }

    pub fn location(&self, path: impl AsRef<Path>) -> Option<&Location> {
        match self.get(&EntryKey::folder(path)) { Some(Entry::Location(l)) => Some(l), _ => None }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &Entry)> { self.entries.iter() }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> { self.entries.values().filter_map(Entry::as_asset) }

    pub fn codes(&self) -> Vec<String> { self.assets().map(|a| a.asset_code.to_string()).collect() }

    /// Parent key of `key`, or `None` when it hangs off the root (or is unknown).
    pub fn parent_of(&self, key: &EntryKey) -> Option<EntryKey> {
        let parent = self.get(key)?.location_key();
        if parent.is_root() { None } else { Some(parent) }
    }

    /// Keys from `key` upward, excluding `key` itself, ending before the root marker.
    pub fn ancestry(&self, key: &EntryKey) -> Vec<EntryKey> {
        let mut out = Vec::new();
        let mut seen: BTreeSet<EntryKey> = BTreeSet::new();
        seen.insert(key.clone());
        let mut cur = key.clone();
        while let Some(p) = self.parent_of(&cur) {
            if !seen.insert(p.clone()) { break; }
            let known = self.contains_key(&p);
            out.push(p.clone());
            if !known { break; }
            cur = p;
        }
        out
    }

    pub fn children_of(&self, key: &EntryKey) -> Vec<EntryKey> {
        self.entries.iter()
            .filter(|(k, e)| *k != key && &e.location_key() == key)
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries { map.serialize_entry(&k.to_string(), v)?; }
        map.end()
    }
}

/// Relative paths with no components collapse to the root marker.
pub(crate) fn normalize_rel(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() { PathBuf::from(ROOT_MARKER) } else { path.to_path_buf() }
}
