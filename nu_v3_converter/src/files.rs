//! Working-directory access: output files, template lookup and cleanup of
//! stale client files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// The directory a pack or maketurn runs against, plus an optional root
/// directory that provides template spec files.
#[derive(Debug, Clone)]
pub struct Workdir {
    dir: PathBuf,
    root: Option<PathBuf>,
}

impl Workdir {
    pub fn new(dir: impl Into<PathBuf>, root: Option<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            root,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn write(&self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        fs::write(self.path(name), bytes).with_context(|| format!("writing {name}"))
    }

    pub fn read(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        fs::read(self.path(name)).with_context(|| format!("reading {name}"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Looks up a template file: working directory first, then the root.
    pub fn template(&self, name: &str) -> Option<Vec<u8>> {
        let candidates = [
            Some(self.dir.as_path()),
            self.root.as_deref(),
        ];
        for dir in candidates.into_iter().flatten() {
            if let Ok(bytes) = fs::read(dir.join(name)) {
                return Some(bytes);
            }
        }
        None
    }

    /// Removes a stale file; missing files are fine.
    pub fn remove(&self, name: &str) {
        let path = self.path(name);
        if path.exists() {
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("could not remove {}: {err}", path.display());
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
