use std::path::PathBuf;

/// Fatal failures of the walker itself. Per-path problems never reach here —
/// they become skip reasons or a `FileDescriptor.error`, per §7's
/// `PerPathSkip`/`PerFileReadError` split.
#[derive(thiserror::Error, Debug)]
pub enum DiscoveryError {
    #[error("root path does not exist: {0}")]
    RootMissing(PathBuf),
    #[error("root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),
    #[error("walk cancelled")]
    Cancelled,
}
