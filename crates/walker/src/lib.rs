//! The concurrent discovery walker: enumerate and filter a tree in a single
//! pass, then fill in file content across a bounded worker pool.

mod cancel;
mod content;
mod error;
mod symlink;
mod types;
mod walk;

pub use cancel::CancellationToken;
pub use error::DiscoveryError;
pub use symlink::{Resolution, SymlinkResolver};
pub use types::{DiscoveryResult, FileDescriptor, SkipReason, WalkerConfig};

/// Runs both phases of the walk and returns the sorted result. Fatal only
/// if the root is missing, not a directory, or the walk was cancelled;
/// every other problem becomes a skip reason or a per-file error.
pub fn discover(cfg: &WalkerConfig) -> Result<DiscoveryResult, DiscoveryError> {
    let (descriptors, total_found, skip_reasons) = walk::enumerate(cfg)?;
    let skip_reasons = skip_reasons.into_inner().unwrap_or_default();
    let total_skipped: u64 = skip_reasons.values().sum();

    let descriptors = content::fill_content(descriptors, cfg.concurrency, &cfg.cancel);

    Ok(DiscoveryResult { files: descriptors, total_found, total_skipped, skip_reasons })
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvx_matchers::{CompositeMatcher, DefaultMatcher};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scenario_s1_defaults_skip_node_modules() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.go"), "package main\n").unwrap();
        fs::write(dir.path().join("README.md"), "# hi\n").unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "module.exports = {}\n").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();

        let mut matcher = CompositeMatcher::new();
        matcher.push(Box::new(DefaultMatcher::new()));
        let cfg = WalkerConfig::new(dir.path()).with_matcher(matcher);

        let result = discover(&cfg).unwrap();
        let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "main.go"]);
        assert!(result.total_skipped >= 2);
        assert!(*result.skip_reasons.get("ignored_dir").unwrap_or(&0) >= 1);
    }

    #[test]
    fn scenario_s2_binary_detection() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "hello\n").unwrap();
        fs::write(dir.path().join("image.bin"), [1u8, 2, 0, 3, 4, 5, 6, 7, 8, 9]).unwrap();

        let cfg = WalkerConfig::new(dir.path());
        let result = discover(&cfg).unwrap();
        let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["hello.txt"]);
        assert_eq!(result.skip_reasons.get("binary"), Some(&1));
    }

    #[test]
    fn missing_root_is_fatal() {
        let cfg = WalkerConfig::new("/does/not/exist/ever");
        assert!(matches!(discover(&cfg), Err(DiscoveryError::RootMissing(_))));
    }

    #[test]
    fn root_that_is_a_file_is_fatal() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();
        let cfg = WalkerConfig::new(&file);
        assert!(matches!(discover(&cfg), Err(DiscoveryError::RootNotADirectory(_))));
    }

    #[test]
    fn large_file_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("big.txt"), vec![b'a'; 100]).unwrap();
        fs::write(dir.path().join("small.txt"), "ok").unwrap();
        let cfg = WalkerConfig::new(dir.path()).with_skip_large_files(10);
        let result = discover(&cfg).unwrap();
        let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["small.txt"]);
        assert_eq!(result.skip_reasons.get("large_file"), Some(&1));
    }

    #[test]
    fn result_is_sorted_and_counters_are_consistent() {
        let dir = tempdir().unwrap();
        for name in ["zeta.txt", "alpha.txt", "mid.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let cfg = WalkerConfig::new(dir.path());
        let result = discover(&cfg).unwrap();
        let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["alpha.txt", "mid.txt", "zeta.txt"]);
        let sum: u64 = result.skip_reasons.values().sum();
        assert_eq!(sum, result.total_skipped);
    }
}
