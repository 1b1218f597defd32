use crate::classify::{classify_location, parse_asset_name, LocationRef};
use crate::ignore::{default_ignored, is_ignored_name};
use crate::io::FsSource;
use crate::model::{normalize_rel, Asset, Entry, EntryKey, Inventory, Location, ROOT_MARKER};
use crate::resolve::highest_common_parent;
use anyhow::Result;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Base names skipped at every depth.
    pub ignored: BTreeSet<String>,
    /// File that describes its parent directory as an asset.
    pub bundle_file: String,
}

impl Default for ScanOptions {
    fn default() -> Self { Self { ignored: default_ignored(), bundle_file: "info".to_string() } }
}

fn child_path(dir: &Path, name: &OsStr) -> PathBuf {
    if dir.as_os_str() == ROOT_MARKER { PathBuf::from(name) } else { dir.join(name) }
}

fn parent_dir(dir: &Path) -> PathBuf {
    normalize_rel(dir.parent().unwrap_or_else(|| Path::new("")))
}

/// Entries already in `acc` win over those surfaced by `sub`.
pub(crate) fn merge_under(acc: &mut Inventory, sub: Inventory) {
    for (k, v) in sub.entries { acc.entries.entry(k).or_insert(v); }
}

/// Walk `dir` (relative to the source root) and everything below it. No closure or validation.
pub fn walk_dir<S: FsSource + ?Sized>(src: &S, opts: &ScanOptions, dir: &Path) -> Result<Inventory> {
    let mut acc = Inventory::new();
    for entry in src.list_dir(dir)? {
        let utf8_name = entry.name.to_str();
        if utf8_name.is_some_and(|n| is_ignored_name(&opts.ignored, n)) { continue; }
        let item = child_path(dir, &entry.name);
        if entry.is_dir {
            let sub = walk_dir(src, opts, &item)?;
            merge_under(&mut acc, sub);
            continue;
        }

        let Some(file_name) = utf8_name else {
            tracing::trace!(path = %item.display(), "non UTF-8 file name, skipping");
            continue;
        };
        let (name, location_dir) = if file_name == opts.bundle_file {
            match dir.file_name().and_then(|n| n.to_str()) {
                Some(n) => (n.to_string(), parent_dir(dir)),
                None => { tracing::trace!(path = %item.display(), "bundle file at root, skipping"); continue; }
            }
        } else {
            (file_name.to_string(), normalize_rel(dir))
        };

        let Some((kind, code)) = parse_asset_name(&name) else {
            tracing::trace!(path = %item.display(), "name does not match asset convention");
            continue;
        };
        let data = src.read(&item)?;

        let location_ref = classify_location(&location_dir);
        let location = location_ref.key();
        if let LocationRef::Folder(path) = location_ref {
            if !acc.contains_key(&location) {
                let parent = highest_common_parent(src, &path)?;
                acc.entries.insert(location.clone(), Entry::Location(Location { path, location: parent }));
            }
        }

        let key = EntryKey::Code(code.clone());
        if acc.contains_key(&key) {
            tracing::warn!(code = %code, path = %item.display(), "duplicate asset code, keeping first");
            continue;
        }
        tracing::debug!(code = %code, kind = %kind, location = %location, "asset");
        acc.entries.insert(key, Entry::Asset(Asset { asset_code: code, kind, location, data }));
    }
    Ok(acc)
}
