use std::collections::HashMap;
use std::path::{Path, PathBuf};

use harvx_matchers::CompositeMatcher;
use harvx_matchers::PathFilter;

use crate::cancel::CancellationToken;

/// Why a path did not make it into the final `DiscoveryResult`. Distinct
/// from `DiscoveryError`: a skip reason is always non-fatal, recorded on a
/// running counter map and never aborts the walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    Ignored,
    IgnoredDir,
    Binary,
    LargeFile,
    PatternFilter,
    NotTracked,
    SymlinkError,
    SymlinkLoop,
    StatError,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Ignored => "ignored",
            SkipReason::IgnoredDir => "ignored_dir",
            SkipReason::Binary => "binary",
            SkipReason::LargeFile => "large_file",
            SkipReason::PatternFilter => "pattern_filter",
            SkipReason::NotTracked => "not_tracked",
            SkipReason::SymlinkError => "symlink_error",
            SkipReason::SymlinkLoop => "symlink_loop",
            SkipReason::StatError => "stat_error",
        }
    }
}

/// One discovered file, created during Phase 1 with `content` empty and
/// filled in during Phase 2. Never mutated by the core after that.
#[derive(Clone, Debug)]
pub struct FileDescriptor {
    /// Forward-slash relative path, anchored at the walk root.
    pub rel_path: String,
    pub abs_path: PathBuf,
    pub size: u64,
    pub is_symlink: bool,
    /// Relevance tier, 0..=5; defaults to 2 until a profile assigns one.
    pub tier: u8,
    pub content: String,
    pub error: Option<String>,
}

impl FileDescriptor {
    pub(crate) fn new(rel_path: String, abs_path: PathBuf, size: u64, is_symlink: bool) -> Self {
        FileDescriptor { rel_path, abs_path, size, is_symlink, tier: 2, content: String::new(), error: None }
    }
}

/// The outcome of a full two-phase walk.
#[derive(Clone, Debug, Default)]
pub struct DiscoveryResult {
    pub files: Vec<FileDescriptor>,
    pub total_found: u64,
    pub total_skipped: u64,
    pub skip_reasons: HashMap<&'static str, u64>,
}

impl DiscoveryResult {
    /// True if any file carries a Phase 2 read error, for callers deciding
    /// between exit code 0 and 2 per §6.
    pub fn had_file_errors(&self) -> bool {
        self.files.iter().any(|f| f.error.is_some())
    }
}

/// Everything the walker needs: where to look, what to consult, how hard to
/// parallelize, and how to be told to stop.
pub struct WalkerConfig {
    pub root: PathBuf,
    pub matcher: Option<CompositeMatcher>,
    pub filter: Option<PathFilter>,
    pub git_tracked_only: bool,
    pub tracked_files: Option<std::collections::HashSet<String>>,
    /// 0 disables the large-file skip.
    pub skip_large_files: u64,
    pub concurrency: usize,
    pub cancel: CancellationToken,
}

impl WalkerConfig {
    pub fn new(root: impl Into<PathBuf>) -> WalkerConfig {
        WalkerConfig {
            root: root.into(),
            matcher: None,
            filter: None,
            git_tracked_only: false,
            tracked_files: None,
            skip_large_files: 0,
            concurrency: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_matcher(mut self, matcher: CompositeMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_skip_large_files(mut self, threshold: u64) -> Self {
        self.skip_large_files = threshold;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_git_tracked_only(mut self, tracked_files: std::collections::HashSet<String>) -> Self {
        self.git_tracked_only = true;
        self.tracked_files = Some(tracked_files);
        self
    }
}

pub(crate) fn is_tracked(cfg: &WalkerConfig, rel_path: &str) -> bool {
    match &cfg.tracked_files {
        Some(tracked) => tracked.contains(rel_path),
        None => true,
    }
}

pub(crate) fn to_rel_slash(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    harvx_matchers::normalize_relative(rel)
}
