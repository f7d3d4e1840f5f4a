//! The harvx core engine: wires the configuration resolver, the pattern
//! matchers, and the discovery walker together into the single operation a
//! CLI layer needs — "resolve a profile for this directory, then walk it".

use std::path::Path;

use harvx_config::{CliOverrides, ConfigError, ResolvedProfile};
use harvx_matchers::{CompositeMatcher, DefaultMatcher, PathFilter};
use harvx_walker::{CancellationToken, DiscoveryError, DiscoveryResult, WalkerConfig};

/// Everything a caller supplies beyond the repo path: which profile to
/// use, user include/exclude/extension filters, and the CLI flag
/// overrides layered on top of the resolved profile.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub profile_name: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub extensions: Vec<String>,
    pub git_tracked_only: bool,
    pub skip_large_files: u64,
    pub concurrency: Option<usize>,
    pub cli_overrides: CliOverrides,
}

#[derive(thiserror::Error, Debug)]
pub enum HarvxError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Filter(#[from] harvx_matchers::Error),
}

/// Resolves configuration for `repo_dir` (defaults/global/repo/env/flags,
/// per §4.6), builds the matcher and filter the resolved profile implies,
/// and runs the two-phase walk. This is the control flow described in §2:
/// "the CLI layer constructs `WalkerConfig` from a resolved profile + CLI
/// flag overrides, then invokes the walker."
pub fn run(repo_dir: &Path, options: &RunOptions) -> Result<(ResolvedProfile, DiscoveryResult), HarvxError> {
    let config = harvx_config::load_config(repo_dir)?;
    let profile_name = options.profile_name.as_deref().unwrap_or("default");
    let mut resolved = harvx_config::resolve_profile(profile_name, &config)?;
    harvx_config::env::apply_env_overrides(&mut resolved);
    harvx_config::apply_cli_overrides(&mut resolved, &options.cli_overrides);

    let mut matcher = CompositeMatcher::new();
    matcher.push(Box::new(DefaultMatcher::new()));
    matcher.push(Box::new(harvx_matchers::dir::IgnoreHierarchy::discover(repo_dir, ".gitignore")));
    matcher.push(Box::new(harvx_matchers::dir::IgnoreHierarchy::discover(repo_dir, ".harvxignore")));
    if !resolved.exclude_paths.is_empty() || !options.exclude.is_empty() {
        let cli_exclude = PathFilter::builder()
            .exclude(resolved.exclude_paths.iter().cloned().chain(options.exclude.iter().cloned()))
            .build()?;
        matcher.push(Box::new(ExcludeOnlyFilter(cli_exclude)));
    }

    let mut walker_cfg = WalkerConfig::new(repo_dir).with_matcher(matcher);
    if !options.include.is_empty() || !options.extensions.is_empty() || !options.exclude.is_empty() {
        let filter = PathFilter::builder()
            .include(options.include.iter().cloned())
            .exclude(options.exclude.iter().cloned())
            .extensions(options.extensions.iter().cloned())
            .build()?;
        walker_cfg = walker_cfg.with_filter(filter);
    }
    if options.skip_large_files > 0 {
        walker_cfg = walker_cfg.with_skip_large_files(options.skip_large_files);
    }
    if let Some(concurrency) = options.concurrency {
        walker_cfg = walker_cfg.with_concurrency(concurrency);
    }

    let result = harvx_walker::discover(&walker_cfg)?;
    Ok((resolved, result))
}

/// A cancellation-aware variant of [`run`] for callers (e.g. an
/// interactive CLI) that want to abort a long walk in progress.
pub fn run_cancellable(
    repo_dir: &Path,
    options: &RunOptions,
    cancel: CancellationToken,
) -> Result<(ResolvedProfile, DiscoveryResult), HarvxError> {
    let config = harvx_config::load_config(repo_dir)?;
    let profile_name = options.profile_name.as_deref().unwrap_or("default");
    let mut resolved = harvx_config::resolve_profile(profile_name, &config)?;
    harvx_config::env::apply_env_overrides(&mut resolved);
    harvx_config::apply_cli_overrides(&mut resolved, &options.cli_overrides);

    let mut matcher = CompositeMatcher::new();
    matcher.push(Box::new(DefaultMatcher::new()));
    matcher.push(Box::new(harvx_matchers::dir::IgnoreHierarchy::discover(repo_dir, ".gitignore")));

    let mut walker_cfg = WalkerConfig::new(repo_dir).with_matcher(matcher).with_cancel(cancel);
    if options.skip_large_files > 0 {
        walker_cfg = walker_cfg.with_skip_large_files(options.skip_large_files);
    }
    let result = harvx_walker::discover(&walker_cfg)?;
    Ok((resolved, result))
}

/// Wraps a [`PathFilter`] configured only with excludes as an
/// [`harvx_matchers::IgnoreMatcher`], so `exclude_paths`/`--exclude` can
/// join the composite matcher alongside the gitignore-style layers
/// instead of only applying inside the separate include/exclude filter.
struct ExcludeOnlyFilter(PathFilter);

impl harvx_matchers::IgnoreMatcher for ExcludeOnlyFilter {
    fn is_ignored(&self, path: &std::path::Path, _is_dir: bool) -> bool {
        let rel = harvx_matchers::normalize_relative(path);
        !self.0.matches(&rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn run_resolves_profile_and_walks_repo() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/pkg.js"), "x").unwrap();

        let options = RunOptions::default();
        let (resolved, result) = run(dir.path(), &options).unwrap();
        assert_eq!(resolved.name, "default");
        let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["main.rs"]);
    }

    #[test]
    fn run_honors_repo_harvx_toml_profile_format() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("harvx.toml"), "[profile.default]\nformat = \"xml\"\n").unwrap();
        fs::write(dir.path().join("a.txt"), "hi").unwrap();

        let options = RunOptions::default();
        let (resolved, _) = run(dir.path(), &options).unwrap();
        assert_eq!(resolved.format, harvx_config::Format::Xml);
    }

    #[test]
    fn run_applies_cli_exclude_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.rs"), "x").unwrap();
        fs::write(dir.path().join("skip.rs"), "x").unwrap();

        let options = RunOptions { exclude: vec!["skip.rs".to_string()], ..Default::default() };
        let (_, result) = run(dir.path(), &options).unwrap();
        let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["keep.rs"]);
    }
}
