//! The fixed, compiled-in pattern list every walk consults first.

use std::path::Path;
use std::sync::OnceLock;

use crate::gitignore::{Gitignore, GitignoreBuilder};
use crate::pathutil::{normalize_relative, with_dir_suffix};
use crate::IgnoreMatcher;

/// Directory patterns that are always ignored regardless of any project
/// `.gitignore`.
const DIRECTORIES: &[&str] = &[
    ".git/",
    "node_modules/",
    "dist/",
    "build/",
    "coverage/",
    "__pycache__/",
    ".next/",
    "target/",
    "vendor/",
    ".harvx/",
    ".idea/",
    ".vscode/",
];

const ENV_FILES: &[&str] = &[".env", ".env.*"];
const CERT_KEY_FILES: &[&str] = &["*.pem", "*.key", "*.p12", "*.pfx"];
const SENSITIVE_NAMES: &[&str] = &["*secret*", "*credential*", "*password*"];

const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Gemfile.lock",
    "Cargo.lock",
    "go.sum",
    "poetry.lock",
];

const COMPILED_ARTIFACTS: &[&str] = &[
    "*.pyc", "*.pyo", "*.class", "*.o", "*.obj", "*.exe", "*.dll", "*.so", "*.dylib",
];

const OS_EDITOR_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "*.swp", "*.swo"];

/// Returns the patterns that should warn when a user override un-ignores
/// them (env files, cert/key files, sensitive naming).
pub fn sensitive_patterns() -> Vec<&'static str> {
    ENV_FILES
        .iter()
        .chain(CERT_KEY_FILES)
        .chain(SENSITIVE_NAMES)
        .copied()
        .collect()
}

fn all_patterns() -> impl Iterator<Item = &'static str> {
    DIRECTORIES
        .iter()
        .chain(ENV_FILES)
        .chain(CERT_KEY_FILES)
        .chain(SENSITIVE_NAMES)
        .chain(LOCK_FILES)
        .chain(COMPILED_ARTIFACTS)
        .chain(OS_EDITOR_FILES)
        .copied()
}

fn build() -> Gitignore {
    let mut builder = GitignoreBuilder::new("");
    for pattern in all_patterns() {
        builder.add_line(None, pattern).expect("built-in default pattern must be valid");
    }
    builder.build().expect("built-in defaults must compile")
}

/// The compiled-in default matcher, built once and shared across every
/// walk. Construction is cheap enough that `OnceLock` is just an
/// optimization, not a correctness requirement.
pub struct DefaultMatcher {
    inner: &'static Gitignore,
}

impl DefaultMatcher {
    pub fn new() -> DefaultMatcher {
        static DEFAULTS: OnceLock<Gitignore> = OnceLock::new();
        DefaultMatcher { inner: DEFAULTS.get_or_init(build) }
    }

    /// Returns true if `rel_path` is ignored by the built-in default list.
    ///
    /// Normalizes to forward slashes, strips a leading `./`, and returns
    /// false for an empty path or `.`.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        let normalized = normalize_relative(rel_path);
        if normalized.is_empty() {
            return false;
        }
        let candidate = with_dir_suffix(normalized, is_dir);
        self.inner.matched(candidate, is_dir).is_ignored()
    }
}

impl Default for DefaultMatcher {
    fn default() -> DefaultMatcher {
        DefaultMatcher::new()
    }
}

impl IgnoreMatcher for DefaultMatcher {
    fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        DefaultMatcher::is_ignored(self, path, is_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn ignores_node_modules_dir() {
        let m = DefaultMatcher::new();
        assert!(m.is_ignored(Path::new("node_modules"), true));
        assert!(m.is_ignored(Path::new("a/b/node_modules"), true));
    }

    #[test]
    fn does_not_ignore_node_modules_as_file() {
        let m = DefaultMatcher::new();
        assert!(!m.is_ignored(Path::new("node_modules"), false));
    }

    #[test]
    fn ignores_env_files() {
        let m = DefaultMatcher::new();
        assert!(m.is_ignored(Path::new(".env"), false));
        assert!(m.is_ignored(Path::new(".env.production"), false));
    }

    #[test]
    fn ignores_lock_files() {
        let m = DefaultMatcher::new();
        assert!(m.is_ignored(Path::new("Cargo.lock"), false));
        assert!(m.is_ignored(Path::new("go.sum"), false));
    }

    #[test]
    fn ignores_sensitive_names() {
        let m = DefaultMatcher::new();
        assert!(m.is_ignored(Path::new("my_secret_key.txt"), false));
        assert!(m.is_ignored(Path::new("db_password.yaml"), false));
    }

    #[test]
    fn empty_and_dot_path_never_ignored() {
        let m = DefaultMatcher::new();
        assert!(!m.is_ignored(Path::new(""), false));
        assert!(!m.is_ignored(Path::new("."), false));
    }

    #[test]
    fn ordinary_source_file_not_ignored() {
        let m = DefaultMatcher::new();
        assert!(!m.is_ignored(Path::new("src/main.rs"), false));
    }
}
