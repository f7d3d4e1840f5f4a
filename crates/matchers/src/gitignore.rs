//! A matcher for the globs declared in a single gitignore-style file (or an
//! in-memory equivalent), anchored to one directory.
//!
//! This implements the `gitignore` man page pattern syntax from scratch; it
//! does not shell out to `git`. The same implementation backs both
//! `.gitignore` and `.harvxignore` files — only the file name searched for
//! during tree discovery (see `dir.rs`) differs.

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use globset::{Candidate, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{Error, PartialErrorBuilder};
use crate::pathutil::{is_file_name, strip_prefix};
use crate::Match;

/// A single compiled glob extracted from a gitignore-style file, retained so
/// diagnostics (the explainer, `excluded_by`) can report which line actually
/// matched.
#[derive(Clone, Debug)]
pub struct Glob {
    from: Option<PathBuf>,
    original: String,
    actual: String,
    is_whitelist: bool,
    is_only_dir: bool,
}

impl Glob {
    /// The file this glob was read from, if any (`None` for programmatically
    /// added patterns).
    pub fn from(&self) -> Option<&Path> {
        self.from.as_deref()
    }

    /// The glob exactly as written in the ignore file.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether this glob was negated with a leading `!`.
    pub fn is_whitelist(&self) -> bool {
        self.is_whitelist
    }

    /// Whether this glob only matches directories (trailing `/`).
    pub fn is_only_dir(&self) -> bool {
        self.is_only_dir
    }
}

/// A matcher for every glob declared in one gitignore-style file, anchored
/// to the directory containing that file.
#[derive(Clone, Debug)]
pub struct Gitignore {
    set: GlobSet,
    root: PathBuf,
    globs: Vec<Glob>,
}

impl Gitignore {
    /// Builds a matcher from the ignore file at `path`. Always returns a
    /// usable matcher, even if some lines failed to parse; non-fatal parse
    /// errors are returned alongside it for the caller to log.
    pub fn new<P: AsRef<Path>>(path: P) -> (Gitignore, Option<Error>) {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let mut builder = GitignoreBuilder::new(parent);
        let mut errs = PartialErrorBuilder::default();
        errs.maybe_push_ignore_io(builder.add(path));
        match builder.build() {
            Ok(gi) => (gi, errs.into_errors().into_iter().next()),
            Err(err) => {
                errs.push(err);
                (Gitignore::empty(), errs.into_errors().into_iter().next())
            }
        }
    }

    /// An empty matcher that never ignores anything.
    pub fn empty() -> Gitignore {
        GitignoreBuilder::new("").build().expect("empty builder never fails")
    }

    /// The directory all matches are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.globs.len()
    }

    /// Matches `path` (relative or absolute; it is stripped to `root` first)
    /// against this file's globs, respecting in-file negation order.
    pub fn matched<P: AsRef<Path>>(&self, path: P, is_dir: bool) -> Match<&Glob> {
        if self.is_empty() {
            return Match::None;
        }
        self.matched_stripped(self.strip(path.as_ref()), is_dir)
    }

    fn matched_stripped(&self, path: &Path, is_dir: bool) -> Match<&Glob> {
        if self.is_empty() {
            return Match::None;
        }
        let candidate = Candidate::new(path);
        let mut matches = Vec::new();
        self.set.matches_candidate_into(&candidate, &mut matches);
        for &i in matches.iter().rev() {
            let glob = &self.globs[i];
            if !glob.is_only_dir() || is_dir {
                return if glob.is_whitelist() {
                    Match::Whitelisted(glob)
                } else {
                    Match::Ignored(glob)
                };
            }
        }
        Match::None
    }

    fn strip<'a>(&'a self, path: &'a Path) -> &'a Path {
        let mut path = path;
        if let Some(p) = strip_prefix("./", path) {
            path = p;
        }
        if !is_file_name(path) {
            if let Some(p) = strip_prefix(self.root.to_str().unwrap_or(""), path) {
                path = p;
                if let Some(p) = strip_prefix("/", path) {
                    path = p;
                }
            }
        }
        path
    }
}

/// Builds a [`Gitignore`] matcher, anchored to the directory passed to
/// [`GitignoreBuilder::new`].
pub struct GitignoreBuilder {
    builder: GlobSetBuilder,
    root: PathBuf,
    globs: Vec<Glob>,
    case_insensitive: bool,
}

impl GitignoreBuilder {
    pub fn new<P: AsRef<Path>>(root: P) -> GitignoreBuilder {
        let root = root.as_ref();
        GitignoreBuilder {
            builder: GlobSetBuilder::new(),
            root: strip_prefix("./", root).unwrap_or(root).to_path_buf(),
            globs: vec![],
            case_insensitive: false,
        }
    }

    pub fn build(&self) -> Result<Gitignore, Error> {
        let set = self.builder.build().map_err(|err| Error::Glob {
            glob: String::new(),
            message: err.to_string(),
        })?;
        Ok(Gitignore { set, root: self.root.clone(), globs: self.globs.clone() })
    }

    /// Reads and adds every line of the ignore file at `path`. I/O errors
    /// reading the file are returned, but a bad individual glob line is
    /// skipped and does not stop the rest of the file from loading.
    pub fn add<P: AsRef<Path>>(&mut self, path: P) -> Option<Error> {
        let path = path.as_ref();
        let file = match fs::File::open(path) {
            Err(err) => return Some(Error::io(path, err)),
            Ok(file) => file,
        };
        let rdr = io::BufReader::new(file);
        let mut errs = PartialErrorBuilder::default();
        for (i, line) in rdr.lines().enumerate() {
            let lineno = (i + 1) as u64;
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    errs.push(Error::io(path, err).tagged(path, lineno));
                    break;
                }
            };
            if let Err(err) = self.add_line(Some(path.to_path_buf()), &line) {
                errs.push(err.tagged(path, lineno));
            }
        }
        errs.into_errors().into_iter().next()
    }

    /// Adds every line from an in-memory gitignore-formatted string
    /// (used by the default matcher and by tests).
    pub fn add_str(&mut self, from: Option<PathBuf>, contents: &str) -> Result<&mut Self, Error> {
        for line in contents.lines() {
            self.add_line(from.clone(), line)?;
        }
        Ok(self)
    }

    /// Parses and adds a single gitignore line, implementing negation,
    /// anchoring, directory-only and `**` semantics per the `gitignore` man
    /// page.
    pub fn add_line(&mut self, from: Option<PathBuf>, mut line: &str) -> Result<&mut Self, Error> {
        if line.starts_with('#') {
            return Ok(self);
        }
        if !line.ends_with("\\ ") {
            line = line.trim_end();
        }
        if line.is_empty() {
            return Ok(self);
        }
        let mut glob =
            Glob { from, original: line.to_string(), actual: String::new(), is_whitelist: false, is_only_dir: false };

        let mut literal_separator = false;
        let has_slash = line.contains('/');
        let mut is_absolute = false;

        if let Some(rest) = line.strip_prefix("\\!").or_else(|| line.strip_prefix("\\#")) {
            line = rest;
            is_absolute = line.starts_with('/');
        } else {
            if let Some(rest) = line.strip_prefix('!') {
                glob.is_whitelist = true;
                line = rest;
            }
            if let Some(rest) = line.strip_prefix('/') {
                literal_separator = true;
                line = rest;
                is_absolute = true;
            }
        }

        if let Some(stripped) = line.strip_suffix('/') {
            glob.is_only_dir = true;
            line = stripped;
        }

        glob.actual = line.to_string();
        if has_slash {
            literal_separator = true;
        }
        if !is_absolute && !glob.actual.starts_with("**/") {
            glob.actual = format!("**/{}", glob.actual);
        }
        if glob.actual.ends_with("/**") {
            glob.actual = format!("{}/*", glob.actual);
        }

        let parsed = GlobBuilder::new(&glob.actual)
            .literal_separator(literal_separator)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|err| Error::Glob { glob: glob.original.clone(), message: err.to_string() })?;
        self.builder.add(parsed);
        self.globs.push(glob);
        Ok(self)
    }

    /// Toggles case-insensitive matching (disabled by default).
    pub fn case_insensitive(&mut self, yes: bool) -> &mut Self {
        self.case_insensitive = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Gitignore, GitignoreBuilder};
    use std::path::Path;

    fn gi_from_str<P: AsRef<Path>>(root: P, s: &str) -> Gitignore {
        let mut builder = GitignoreBuilder::new(root);
        builder.add_str(None, s).unwrap();
        builder.build().unwrap()
    }

    macro_rules! ignored {
        ($name:ident, $root:expr, $gi:expr, $path:expr) => {
            ignored!($name, $root, $gi, $path, false);
        };
        ($name:ident, $root:expr, $gi:expr, $path:expr, $is_dir:expr) => {
            #[test]
            fn $name() {
                let gi = gi_from_str($root, $gi);
                assert!(gi.matched($path, $is_dir).is_ignored());
            }
        };
    }

    macro_rules! not_ignored {
        ($name:ident, $root:expr, $gi:expr, $path:expr) => {
            not_ignored!($name, $root, $gi, $path, false);
        };
        ($name:ident, $root:expr, $gi:expr, $path:expr, $is_dir:expr) => {
            #[test]
            fn $name() {
                let gi = gi_from_str($root, $gi);
                assert!(!gi.matched($path, $is_dir).is_ignored());
            }
        };
    }

    const ROOT: &str = "/home/user/proj";

    ignored!(ig1, ROOT, "months", "months");
    ignored!(ig2, ROOT, "*.lock", "Cargo.lock");
    ignored!(ig3, ROOT, "*.rs", "src/main.rs");
    ignored!(ig4, ROOT, "src/*.rs", "src/main.rs");
    ignored!(ig5, ROOT, "/*.c", "cat-file.c");
    ignored!(ig6, ROOT, "/src/*.rs", "src/main.rs");
    ignored!(ig7, ROOT, "!src/main.rs\n*.rs", "src/main.rs");
    ignored!(ig8, ROOT, "foo/", "foo", true);
    ignored!(ig9, ROOT, "**/foo", "foo");
    ignored!(ig10, ROOT, "**/foo", "src/foo");
    ignored!(ig11, ROOT, "**/foo/**", "src/foo/bar");
    ignored!(ig15, ROOT, "abc/**", "abc/x");
    ignored!(ig18, ROOT, "a/**/b", "a/b");
    ignored!(ig19, ROOT, "a/**/b", "a/x/b");
    ignored!(ig21, ROOT, r"\!xy", "!xy");
    ignored!(ig23, ROOT, "foo", "./foo");
    ignored!(ig24, ROOT, "target", "grep/target");
    ignored!(ig27, ROOT, "foo/", "xyz/foo", true);
    ignored!(ig28, ROOT, "src/*.rs", "src/grep/src/main.rs");
    ignored!(ig30, ROOT, "node_modules/ ", "node_modules", true);

    not_ignored!(ignot1, ROOT, "amonths", "months");
    not_ignored!(ignot2, ROOT, "monthsa", "months");
    not_ignored!(ignot3, ROOT, "/src/*.rs", "src/grep/src/main.rs");
    not_ignored!(ignot4, ROOT, "/*.c", "mozilla-sha1/sha1.c");
    not_ignored!(ignot6, ROOT, "*.rs\n!src/main.rs", "src/main.rs");
    not_ignored!(ignot7, ROOT, "foo/", "foo", false);
    not_ignored!(ignot11, ROOT, "#foo", "#foo");
    not_ignored!(ignot12, ROOT, "\n\n\n", "foo");
    not_ignored!(ignot13, ROOT, "foo/**", "foo", true);
    not_ignored!(ignot15, ROOT, "!/bar", "foo/bar");

    #[test]
    fn case_insensitive() {
        let gi = GitignoreBuilder::new(ROOT)
            .case_insensitive(true)
            .add_str(None, "*.html")
            .unwrap()
            .build()
            .unwrap();
        assert!(gi.matched("foo.html", false).is_ignored());
        assert!(gi.matched("foo.HTML", false).is_ignored());
        assert!(!gi.matched("foo.htm", false).is_ignored());
    }

    ignored!(cs1, ROOT, "*.html", "foo.html");
    not_ignored!(cs2, ROOT, "*.html", "foo.HTML");
}
