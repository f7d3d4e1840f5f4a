use std::path::Path;

use globset::{Glob, GlobSetBuilder};
use harvx_matchers::{DefaultMatcher, IgnoreMatcher};

use crate::resolve::ResolvedProfile;

#[derive(Clone, Debug)]
pub struct TraceStep {
    pub step: u32,
    pub rule: String,
    pub outcome: String,
    pub matched: bool,
}

#[derive(Clone, Debug)]
pub struct ExplainResult {
    pub path: String,
    pub profile_name: String,
    pub extends_parent: Option<String>,
    pub included: bool,
    pub tier: u8,
    pub matched_tier_pattern: Option<String>,
    pub excluded_by: Option<String>,
    pub redaction_on: bool,
    pub is_priority: bool,
    pub compression_hint: Option<String>,
    pub trace: Vec<TraceStep>,
}

fn glob_set_matches(patterns: &[String], path: &str) -> Option<String> {
    let mut builder = GlobSetBuilder::new();
    let mut valid = Vec::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
            valid.push(pattern.clone());
        }
    }
    let set = builder.build().ok()?;
    let matches = set.matches(path);
    matches.first().map(|&i| valid[i].clone())
}

fn compression_hint(path: &str) -> Option<String> {
    let ext = path.rsplit('.').next()?.to_ascii_lowercase();
    let lang = match ext.as_str() {
        "rs" => "rust",
        "py" => "python",
        "go" => "go",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "rb" => "ruby",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "md" => "markdown",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        _ => return None,
    };
    Some(lang.to_string())
}

/// Simulates the Phase 1 filtering pipeline for a single path, touching
/// nothing on disk: defaults, then `exclude_paths`, then `priority_files`,
/// then relevance tiers 0 through 5 in order (first match wins).
pub fn explain_file(path: &str, profile: &ResolvedProfile) -> ExplainResult {
    let mut trace = Vec::new();
    let mut step = 0u32;
    let mut excluded_by = None;

    // `explain_file` never touches the filesystem, so it has no real
    // `is_dir` flag to offer the default matcher. Directory-only patterns
    // (the bulk of the default list: `node_modules/`, `target/`, `.git/`,
    // …) only fire when `is_dir` is true, so try both and take either hit —
    // a file path never collides with those directory-only globs, so this
    // cannot produce a false positive for an ordinary file.
    let defaults = DefaultMatcher::new();
    let default_hit =
        defaults.is_ignored(Path::new(path), false) || defaults.is_ignored(Path::new(path), true);
    step += 1;
    trace.push(TraceStep {
        step,
        rule: "defaults".to_string(),
        outcome: if default_hit { "excluded".to_string() } else { "pass".to_string() },
        matched: default_hit,
    });
    if default_hit {
        excluded_by = Some("default ignore rule".to_string());
    }

    let exclude_hit = excluded_by.is_none().then(|| glob_set_matches(&profile.exclude_paths, path)).flatten();
    step += 1;
    trace.push(TraceStep {
        step,
        rule: "exclude_paths".to_string(),
        outcome: match &exclude_hit {
            Some(pattern) => format!("excluded by {pattern}"),
            None => "pass".to_string(),
        },
        matched: exclude_hit.is_some(),
    });
    if let Some(pattern) = &exclude_hit {
        excluded_by = Some(format!("exclude_paths: {pattern}"));
    }

    let is_priority = glob_set_matches(&profile.priority_files, path).is_some();
    step += 1;
    trace.push(TraceStep {
        step,
        rule: "priority_files".to_string(),
        outcome: if is_priority { "priority".to_string() } else { "not priority".to_string() },
        matched: is_priority,
    });

    let mut tier = 2u8;
    let mut matched_tier_pattern = None;
    for (tier_num, patterns) in profile.relevance.ordered() {
        let hit = glob_set_matches(patterns, path);
        step += 1;
        trace.push(TraceStep {
            step,
            rule: format!("tier_{tier_num}"),
            outcome: match &hit {
                Some(pattern) => format!("matched {pattern}"),
                None => "pass".to_string(),
            },
            matched: hit.is_some(),
        });
        if let Some(pattern) = hit {
            tier = tier_num;
            matched_tier_pattern = Some(pattern);
            break;
        }
    }

    ExplainResult {
        path: path.to_string(),
        profile_name: profile.name.clone(),
        extends_parent: profile.chain.get(1).cloned(),
        included: excluded_by.is_none(),
        tier,
        matched_tier_pattern,
        excluded_by,
        redaction_on: profile.redact,
        is_priority,
        compression_hint: compression_hint(path),
        trace,
    }
}
