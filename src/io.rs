use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Raw OS name; may not be valid UTF-8.
    pub name: OsString,
    pub is_dir: bool,
}

/// Read/enumerate primitives the scanner consumes. Paths are relative to the source root.
pub trait FsSource {
    fn list_dir(&self, rel: &Path) -> Result<Vec<DirEntry>>;
    fn read(&self, rel: &Path) -> Result<Vec<u8>>;
    /// Raw entry count, ignored names included.
    fn child_count(&self, rel: &Path) -> Result<usize>;
}

#[derive(Debug, Clone)]
pub struct LocalFs { root: PathBuf }

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    fn abs(&self, rel: &Path) -> PathBuf { self.root.join(rel) }
}

impl FsSource for LocalFs {
    fn list_dir(&self, rel: &Path) -> Result<Vec<DirEntry>> {
        let dir = self.abs(rel);
        let mut out = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("failed to list {}", dir.display()))? {
            let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
            // follow symlinks like Path::is_dir
            let is_dir = entry.path().is_dir();
            out.push(DirEntry { name: entry.file_name(), is_dir });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    fn read(&self, rel: &Path) -> Result<Vec<u8>> {
        let p = self.abs(rel);
        fs::read(&p).with_context(|| format!("failed to read {}", p.display()))
    }

    fn child_count(&self, rel: &Path) -> Result<usize> {
        let dir = self.abs(rel);
        Ok(fs::read_dir(&dir).with_context(|| format!("failed to list {}", dir.display()))?.count())
    }
}
