use std::path::{Path, PathBuf};

/// An error that can occur while building or evaluating a pattern matcher.
///
/// Glob compilation failures and unreadable ignore files are the two cases
/// that actually arise in practice; both are partial-failure conditions (the
/// rest of the ignore file still loads) rather than fatal ones, so callers
/// generally log this rather than propagate it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {source}")]
    IoLine {
        path: PathBuf,
        line: u64,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing glob '{glob}': {message}")]
    Glob { glob: String, message: String },
    #[error("{path}:{line}: error parsing glob '{glob}': {message}")]
    GlobLine { path: PathBuf, line: u64, glob: String, message: String },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Error {
        Error::Io { path: path.to_path_buf(), source }
    }

    pub(crate) fn tagged(self, path: &Path, line: u64) -> Error {
        match self {
            Error::Io { source, .. } => Error::IoLine { path: path.to_path_buf(), line, source },
            Error::Glob { glob, message } => {
                Error::GlobLine { path: path.to_path_buf(), line, glob, message }
            }
            already_tagged => already_tagged,
        }
    }
}

/// Accumulates non-fatal errors encountered while building a matcher from a
/// file that may be partially valid (some globs compile, some don't).
///
/// Mirrors the "one bad line doesn't sink the whole ignore file" behavior
/// required by the matcher construction rules: every valid glob is still
/// added, and only the first error per line is kept.
#[derive(Debug, Default)]
pub struct PartialErrorBuilder {
    errs: Vec<Error>,
}

impl PartialErrorBuilder {
    pub fn push(&mut self, err: Error) {
        self.errs.push(err);
    }

    pub fn maybe_push_ignore_io(&mut self, err: Option<Error>) {
        if let Some(Error::Io { path, source }) = err {
            if source.kind() == std::io::ErrorKind::NotFound {
                return;
            }
            self.errs.push(Error::Io { path, source });
        } else if let Some(err) = err {
            self.errs.push(err);
        }
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errs
    }
}
