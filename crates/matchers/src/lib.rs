//! Gitignore-style pattern matchers and the include/exclude/extension
//! filter backing the harvx discovery walker.
//!
//! Every matcher variant — default, single-file gitignore/harvxignore,
//! directory hierarchy, and composite — implements [`IgnoreMatcher`], a
//! single-method capability. Nothing in this crate reaches for dynamic
//! dispatch beyond that one method.

mod composite;
pub mod defaults;
pub mod dir;
mod error;
pub mod filter;
pub mod gitignore;
mod pathutil;

use std::path::Path;

pub use composite::CompositeMatcher;
pub use defaults::DefaultMatcher;
pub use error::Error;
pub use filter::PathFilter;
pub use gitignore::{Gitignore, GitignoreBuilder, Glob};
pub use pathutil::normalize_relative;

/// Evaluates whether a path should be ignored. The sole extension point
/// shared by every matcher in this crate.
pub trait IgnoreMatcher {
    /// Returns true if `path` (already relative to whatever this matcher is
    /// anchored to) should be ignored. `is_dir` must be set for directory
    /// entries so directory-only patterns apply.
    fn is_ignored(&self, path: &Path, is_dir: bool) -> bool;
}

/// The outcome of matching a path against one gitignore-style pattern set,
/// preserving which glob (if any) produced the result for diagnostics.
#[derive(Clone, Copy, Debug)]
pub enum Match<T> {
    /// No pattern in this set applied to the path.
    None,
    /// The path is ignored by the returned glob.
    Ignored(T),
    /// The path was whitelisted (re-included) by the returned glob.
    Whitelisted(T),
}

impl<T> Match<T> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Match::Ignored(_))
    }

    pub fn is_whitelisted(&self) -> bool {
        matches!(self, Match::Whitelisted(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Match::None)
    }
}
