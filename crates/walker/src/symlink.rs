use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use same_file::Handle;

/// Outcome of resolving one symlink through the shared visited-paths state
/// machine: *unseen* -> *seen-once* -> *visited*, per §4.8.
pub enum Resolution {
    /// First time this real path has been seen; now marked visited.
    Resolved(PathBuf),
    /// The real path was already visited by an earlier symlink.
    Loop,
    /// The link target does not exist.
    Dangling,
}

/// Tracks the identity (`same_file::Handle`, device+inode rather than a
/// string path) of every real file visited while following symlinks, so a
/// cycle of links pointing at the same target is detected even when the
/// paths spelling it differ.
pub struct SymlinkResolver {
    visited: Mutex<HashSet<Handle>>,
}

impl SymlinkResolver {
    pub fn new() -> SymlinkResolver {
        SymlinkResolver { visited: Mutex::new(HashSet::new()) }
    }

    /// Resolves `path` (known to be a symlink) to its real path, marking it
    /// visited. A real path seen by any earlier call yields `Loop`.
    pub fn resolve(&self, path: &Path) -> Resolution {
        let handle = match Handle::from_path(path) {
            Ok(handle) => handle,
            Err(_) => return Resolution::Dangling,
        };
        let real = match std::fs::canonicalize(path) {
            Ok(real) => real,
            Err(_) => return Resolution::Dangling,
        };
        let mut visited = self.visited.lock().unwrap_or_else(|e| e.into_inner());
        if !visited.insert(handle) {
            return Resolution::Loop;
        }
        Resolution::Resolved(real)
    }

    /// Returns every path tracked back to *unseen*.
    pub fn reset(&self) {
        self.visited.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for SymlinkResolver {
    fn default() -> SymlinkResolver {
        SymlinkResolver::new()
    }
}
