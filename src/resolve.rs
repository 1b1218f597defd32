use crate::error::InventoryError;
use crate::io::FsSource;
use crate::model::{normalize_rel, Entry, EntryKey, Inventory, Location, ROOT_MARKER};
use anyhow::Result;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Nearest strict ancestor of `path` whose entry count is not exactly one.
/// The root marker resolves to itself.
pub fn highest_common_parent<S: FsSource + ?Sized>(src: &S, path: &Path) -> Result<PathBuf> {
    let path = normalize_rel(path);
    if path.as_os_str() == ROOT_MARKER { return Ok(path); }
    for p in path.ancestors().skip(1) {
        let p = normalize_rel(p);
        if src.child_count(&p)? == 1 { continue; }
        return Ok(p);
    }
    Err(InventoryError::NoCommonParent { path }.into())
}

/// Back-fill a Location for every folder some Location points at, until closed.
pub fn close_locations<S: FsSource + ?Sized>(src: &S, inv: &mut Inventory) -> Result<usize> {
    let mut work: VecDeque<PathBuf> = inv.entries.values()
        .filter_map(|e| match e { Entry::Location(l) => Some(l.location.clone()), Entry::Asset(_) => None })
        .collect();
    let mut added = 0;
    while let Some(path) = work.pop_front() {
        let key = EntryKey::folder(&path);
        if key.is_root() || inv.contains_key(&key) { continue; }
        let location = highest_common_parent(src, &path)?;
        tracing::debug!(path = %path.display(), parent = %location.display(), "back-filled location");
        work.push_back(location.clone());
        inv.entries.insert(key, Entry::Location(Location { path, location }));
        added += 1;
    }
    Ok(added)
}

/// One pass in key order; each entry is checked against the map as it stands at that point.
/// Deletions made earlier in the pass remove later dependents, but nothing is re-checked, so an
/// entry ordered before its parent survives that parent's removal. Key order (codes, then folders)
/// stands in for discovery order here.
pub fn drop_unresolved(inv: &mut Inventory) -> Vec<EntryKey> {
    let keys: Vec<EntryKey> = inv.entries.keys().cloned().collect();
    let mut dropped = Vec::new();
    for key in keys {
        let Some(parent) = inv.entries.get(&key).map(Entry::location_key) else { continue };
        if parent.is_root() || inv.entries.contains_key(&parent) { continue; }
        tracing::warn!(entry = %key, location = %parent, "deleting entry with unresolved location");
        inv.entries.remove(&key);
        dropped.push(key);
    }
    dropped
}
