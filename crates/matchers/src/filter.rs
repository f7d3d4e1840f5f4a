//! User-supplied include globs, exclude globs, and extension filters,
//! combined with the fixed precedence spelled out in [`PathFilter::matches`].

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::Error;

/// Compiles include/exclude globs and a bare-extension list into a single
/// filter. Globs use doublestar semantics (`**` crosses directories), the
/// same as the gitignore-style matchers.
pub struct PathFilter {
    include: GlobSet,
    exclude: GlobSet,
    extensions: Vec<String>,
    has_include: bool,
    has_exclude: bool,
}

impl PathFilter {
    pub fn builder() -> PathFilterBuilder {
        PathFilterBuilder::default()
    }

    /// True iff any of includes, excludes, or extensions were configured.
    pub fn has_filters(&self) -> bool {
        self.has_include || self.has_exclude || !self.extensions.is_empty()
    }

    /// Evaluates the filter against a forward-slash relative path, in the
    /// fixed precedence order: empty path fails; exclude always wins;
    /// pass-through if no includes/extensions are configured; otherwise an
    /// include glob or a matching extension lets the path through.
    pub fn matches(&self, rel_path: &str) -> bool {
        if rel_path.is_empty() {
            return false;
        }
        if self.has_exclude && self.exclude.is_match(rel_path) {
            return false;
        }
        if !self.has_include && self.extensions.is_empty() {
            return true;
        }
        if self.has_include && self.include.is_match(rel_path) {
            return true;
        }
        if let Some(ext) = extension_of(rel_path) {
            if self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
                return true;
            }
        }
        false
    }
}

fn extension_of(rel_path: &str) -> Option<String> {
    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() || ext == file_name {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[derive(Default)]
pub struct PathFilterBuilder {
    include: Vec<String>,
    exclude: Vec<String>,
    extensions: Vec<String>,
}

impl PathFilterBuilder {
    pub fn include(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn extensions(mut self, exts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions.extend(exts.into_iter().map(|e| {
            let e = e.into();
            e.strip_prefix('.').unwrap_or(&e).to_ascii_lowercase()
        }));
        self
    }

    pub fn build(self) -> Result<PathFilter, Error> {
        let build_set = |patterns: &[String]| -> Result<GlobSet, Error> {
            let mut builder = GlobSetBuilder::new();
            for pattern in patterns {
                let glob = Glob::new(pattern)
                    .map_err(|err| Error::Glob { glob: pattern.clone(), message: err.to_string() })?;
                builder.add(glob);
            }
            builder.build().map_err(|err| Error::Glob { glob: String::new(), message: err.to_string() })
        };
        Ok(PathFilter {
            has_include: !self.include.is_empty(),
            has_exclude: !self.exclude.is_empty(),
            include: build_set(&self.include)?,
            exclude: build_set(&self.exclude)?,
            extensions: self.extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_through_with_no_filters() {
        let f = PathFilter::builder().build().unwrap();
        assert!(!f.has_filters());
        assert!(f.matches("anything.rs"));
    }

    #[test]
    fn exclude_always_wins() {
        let f = PathFilter::builder()
            .include(["src/**"])
            .exclude(["**/*.test.ts"])
            .build()
            .unwrap();
        assert!(f.matches("src/app.ts"));
        assert!(!f.matches("src/app.test.ts"));
        assert!(!f.matches("other/app.ts"));
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let f = PathFilter::builder().extensions([".RS", "md"]).build().unwrap();
        assert!(f.matches("src/main.rs"));
        assert!(f.matches("README.MD"));
        assert!(!f.matches("data.json"));
    }

    #[test]
    fn empty_path_never_matches() {
        let f = PathFilter::builder().build().unwrap();
        assert!(!f.matches(""));
    }

    #[test]
    fn include_and_extension_combine_with_or() {
        let f = PathFilter::builder().include(["docs/**"]).extensions(["rs"]).build().unwrap();
        assert!(f.matches("docs/guide.md"));
        assert!(f.matches("src/lib.rs"));
        assert!(!f.matches("src/lib.py"));
    }
}
