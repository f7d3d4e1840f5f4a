//! Discovers every ignore file of a given name (`.gitignore` or
//! `.harvxignore`) under a tree and builds a matcher anchored per directory,
//! so a path can be evaluated against the whole hierarchy at once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::gitignore::Gitignore;
use crate::{IgnoreMatcher, Match};

/// A collection of [`Gitignore`] matchers, one per directory that contains
/// an ignore file of `file_name`, keyed by that directory's path relative to
/// the tree root (`.` for the root itself).
pub struct IgnoreHierarchy {
    anchors: HashMap<PathBuf, Gitignore>,
}

impl IgnoreHierarchy {
    /// Walks `root` once, compiling a matcher for every `file_name` found.
    /// The `.git` directory is pruned from this discovery pass; missing or
    /// unreadable ignore files are logged and otherwise ignored.
    pub fn discover(root: impl AsRef<Path>, file_name: &'static str) -> IgnoreHierarchy {
        let root = root.as_ref();
        let mut anchors = HashMap::new();

        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0 || entry.file_name() != ".git"
        });
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("error walking for {}: {}", file_name, err);
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.file_name() != file_name {
                continue;
            }
            let dir = entry.path().parent().unwrap_or(root);
            let (matcher, err) = Gitignore::new(entry.path());
            if let Some(err) = err {
                log::warn!("error parsing {}: {}", entry.path().display(), err);
            }
            if matcher.is_empty() {
                continue;
            }
            let anchor = dir.strip_prefix(root).unwrap_or(Path::new(".")).to_path_buf();
            anchors.insert(anchor, matcher);
        }

        IgnoreHierarchy { anchors }
    }

    /// An empty hierarchy, for when a harvxignore/gitignore hierarchy was
    /// never requested.
    pub fn empty() -> IgnoreHierarchy {
        IgnoreHierarchy { anchors: HashMap::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Evaluates every applicable anchor in root-to-leaf order. A child
    /// anchor's match (ignore or whitelist) overrides the parent's; an
    /// anchor that does not match the path at all leaves the running
    /// decision untouched, so parent ignores are inherited by default.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.anchors.is_empty() {
            return false;
        }
        let mut decision = Match::<()>::None;
        for anchor in self.ancestors_root_to_leaf(rel_path) {
            let Some(matcher) = self.anchors.get(&anchor) else { continue };
            let path_in_anchor = rel_path.strip_prefix(&anchor).unwrap_or(rel_path);
            match matcher.matched(path_in_anchor, is_dir) {
                Match::None => {}
                Match::Ignored(_) => decision = Match::Ignored(()),
                Match::Whitelisted(_) => decision = Match::Whitelisted(()),
            }
        }
        decision.is_ignored()
    }

    /// Ancestor directories of `rel_path`'s parent, from the tree root down
    /// to (and including) the immediate parent directory, plus the root
    /// itself (`.`).
    fn ancestors_root_to_leaf(&self, rel_path: &Path) -> Vec<PathBuf> {
        let parent = rel_path.parent().unwrap_or_else(|| Path::new(""));
        let mut chain = vec![PathBuf::from(".")];
        let mut acc = PathBuf::new();
        for component in parent.components() {
            acc.push(component);
            chain.push(acc.clone());
        }
        chain
    }
}

impl IgnoreMatcher for IgnoreHierarchy {
    fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        IgnoreHierarchy::is_ignored(self, path, is_dir)
    }
}
