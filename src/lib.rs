//! Filesystem-first asset inventory.
//!
//! Walks a directory tree, classifies `<type>-sr<code>` names into assets,
//! wires each asset to its parent asset or to a collapsed folder location,
//! then closes and validates the resulting forest.

pub mod classify;
pub mod error;
pub mod fs_walk;
pub mod ignore;
pub mod io;
pub mod model;
pub mod resolve;

#[cfg(test)]
mod tests_unit;

pub use error::InventoryError;
pub use fs_walk::ScanOptions;
pub use io::{FsSource, LocalFs};
pub use model::{Asset, AssetCode, Entry, EntryKey, Inventory, Location, ROOT_MARKER};

use anyhow::Result;
use std::path::Path;

/// Traversal plus location closure, without dropping dangling entries.
pub fn scan_inventory(root: impl AsRef<Path>) -> Result<Inventory> {
    scan_inventory_with(&LocalFs::new(root.as_ref()), &ScanOptions::default())
}

pub fn scan_inventory_with<S: FsSource + ?Sized>(src: &S, opts: &ScanOptions) -> Result<Inventory> {
    let mut inv = fs_walk::walk_dir(src, opts, Path::new(ROOT_MARKER))?;
    resolve::close_locations(src, &mut inv)?;
    Ok(inv)
}

/// Fully resolved and validated inventory of `root`.
pub fn load_inventory(root: impl AsRef<Path>) -> Result<Inventory> {
    let root = root.as_ref();
    let _span = tracing::debug_span!("load_inventory", root = %root.display()).entered();
    load_inventory_with(&LocalFs::new(root), &ScanOptions::default())
}

pub fn load_inventory_with<S: FsSource + ?Sized>(src: &S, opts: &ScanOptions) -> Result<Inventory> {
    let mut inv = scan_inventory_with(src, opts)?;
    let dropped = resolve::drop_unresolved(&mut inv);
    tracing::debug!(entries = inv.len(), dropped = dropped.len(), "inventory loaded");
    Ok(inv)
}
