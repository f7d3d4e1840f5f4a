//! A short-circuit-OR aggregation of independent matchers.

use std::path::Path;

use crate::IgnoreMatcher;

/// Holds an ordered list of matchers — typically default, then gitignore,
/// then harvxignore, then CLI excludes — and ignores a path iff any member
/// does. The order only matters for diagnostic attribution elsewhere
/// (the explainer walks the same members to report which one fired); the
/// boolean result here is order-independent.
pub struct CompositeMatcher {
    members: Vec<Box<dyn IgnoreMatcher + Send + Sync>>,
}

impl CompositeMatcher {
    pub fn new() -> CompositeMatcher {
        CompositeMatcher { members: Vec::new() }
    }

    pub fn push(&mut self, matcher: Box<dyn IgnoreMatcher + Send + Sync>) -> &mut Self {
        self.members.push(matcher);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for CompositeMatcher {
    fn default() -> CompositeMatcher {
        CompositeMatcher::new()
    }
}

impl IgnoreMatcher for CompositeMatcher {
    fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.members.iter().any(|m| m.is_ignored(path, is_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DefaultMatcher;
    use crate::dir::IgnoreHierarchy;
    use std::path::Path;

    #[test]
    fn ignored_if_any_member_matches() {
        let mut composite = CompositeMatcher::new();
        composite.push(Box::new(DefaultMatcher::new()));
        composite.push(Box::new(IgnoreHierarchy::empty()));
        assert!(composite.is_ignored(Path::new("node_modules"), true));
        assert!(!composite.is_ignored(Path::new("src/main.rs"), false));
    }

    #[test]
    fn empty_composite_ignores_nothing() {
        let composite = CompositeMatcher::new();
        assert!(composite.is_empty());
        assert!(!composite.is_ignored(Path::new("node_modules"), true));
    }
}
