use std::fs;
use std::path::Path;
use std::sync::Mutex;

use walkdir::WalkDir;

use crate::error::DiscoveryError;
use crate::symlink::{Resolution, SymlinkResolver};
use crate::types::{is_tracked, to_rel_slash, FileDescriptor, SkipReason, WalkerConfig};

const BINARY_SNIFF_BYTES: usize = 8192;

/// Phase 1: single-threaded enumerate+filter. Returns the sorted
/// descriptors (content not yet loaded) plus the skip-reason tally.
pub(crate) fn enumerate(
    cfg: &WalkerConfig,
) -> Result<(Vec<FileDescriptor>, u64, Mutex<std::collections::HashMap<&'static str, u64>>), DiscoveryError> {
    if !cfg.root.exists() {
        return Err(DiscoveryError::RootMissing(cfg.root.clone()));
    }
    if !cfg.root.is_dir() {
        return Err(DiscoveryError::RootNotADirectory(cfg.root.clone()));
    }

    let skip_reasons: Mutex<std::collections::HashMap<&'static str, u64>> = Mutex::new(std::collections::HashMap::new());
    let mut total_found: u64 = 0;
    let mut descriptors = Vec::new();
    let symlinks = SymlinkResolver::new();

    let mut record_skip = |reason: SkipReason| {
        *skip_reasons.lock().unwrap_or_else(|e| e.into_inner()).entry(reason.as_str()).or_insert(0) += 1;
    };

    // Driven manually (rather than a `for` loop over the iterator) so an
    // ignored directory can be pruned with `skip_current_dir`: dropping a
    // yielded `DirEntry` on the floor does not stop walkdir from descending
    // into it.
    let mut walker = WalkDir::new(&cfg.root).into_iter();

    while let Some(entry) = walker.next() {
        if cfg.cancel.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("walk error: {}", err);
                record_skip(SkipReason::StatError);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let is_dir = entry.file_type().is_dir();

        if is_dir && entry.file_name() == ".git" {
            walker.skip_current_dir();
            continue;
        }

        let rel_path = to_rel_slash(&cfg.root, entry.path());

        if let Some(matcher) = &cfg.matcher {
            use harvx_matchers::IgnoreMatcher;
            if matcher.is_ignored(Path::new(&rel_path), is_dir) {
                if is_dir {
                    log::debug!("pruning ignored directory: {}", rel_path);
                    record_skip(SkipReason::IgnoredDir);
                    walker.skip_current_dir();
                    continue;
                }
                total_found += 1;
                record_skip(SkipReason::Ignored);
                continue;
            }
        }

        if is_dir {
            continue;
        }
        total_found += 1;

        let is_symlink = entry.path_is_symlink();
        let resolved_path = if is_symlink {
            match symlinks.resolve(entry.path()) {
                Resolution::Resolved(real) => real,
                Resolution::Loop => {
                    record_skip(SkipReason::SymlinkLoop);
                    continue;
                }
                Resolution::Dangling => {
                    record_skip(SkipReason::SymlinkError);
                    continue;
                }
            }
        } else {
            entry.path().to_path_buf()
        };

        if cfg.git_tracked_only && !is_tracked(cfg, &rel_path) {
            record_skip(SkipReason::NotTracked);
            continue;
        }

        let metadata = match fs::metadata(&resolved_path) {
            Ok(metadata) => metadata,
            Err(err) => {
                log::debug!("stat error for {}: {}", resolved_path.display(), err);
                record_skip(SkipReason::StatError);
                continue;
            }
        };

        if cfg.skip_large_files > 0 && metadata.len() > cfg.skip_large_files {
            record_skip(SkipReason::LargeFile);
            continue;
        }

        if is_binary(&resolved_path) {
            record_skip(SkipReason::Binary);
            continue;
        }

        if let Some(filter) = &cfg.filter {
            if !filter.matches(&rel_path) {
                record_skip(SkipReason::PatternFilter);
                continue;
            }
        }

        descriptors.push(FileDescriptor::new(rel_path, resolved_path, metadata.len(), is_symlink));
    }

    descriptors.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok((descriptors, total_found, skip_reasons))
}

/// Reads up to the first 8 KiB of `path` and reports whether a `0x00` byte
/// appears in it. An empty file is text by definition; a read error here is
/// non-fatal and simply treats the file as text, letting Phase 2 surface
/// the real error.
fn is_binary(path: &Path) -> bool {
    use std::io::Read;
    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut buf = [0u8; BINARY_SNIFF_BYTES];
    let n = match file.read(&mut buf) {
        Ok(n) => n,
        Err(_) => return false,
    };
    buf[..n].contains(&0)
}
