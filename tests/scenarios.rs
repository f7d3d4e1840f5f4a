//! End-to-end scenarios S1-S7, exercising the public surface of the three
//! subsystem crates together the way a CLI layer would.

use std::collections::HashMap;
use std::fs;

use harvx_config::{resolve_profile, Config, Format, Profile, SourceLayer};
use harvx_matchers::PathFilter;
use harvx_core::{run, RunOptions};
use tempfile::tempdir;

#[test]
fn s1_defaults_skip_node_modules() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n").unwrap();
    fs::write(dir.path().join("README.md"), "# hi\n").unwrap();
    fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
    fs::write(dir.path().join("node_modules/pkg/index.js"), "module.exports = {}\n").unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();

    let (_, result) = run(dir.path(), &RunOptions::default()).unwrap();
    let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
    assert_eq!(paths, vec!["README.md", "main.go"]);
    assert!(result.total_skipped >= 2);
    assert!(*result.skip_reasons.get("ignored_dir").unwrap_or(&0) >= 1);
}

#[test]
fn s2_binary_detection() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("hello.txt"), "hello\n").unwrap();
    fs::write(dir.path().join("image.bin"), [1u8, 2, 0, 3, 4, 5, 6, 7, 8, 9]).unwrap();

    let (_, result) = run(dir.path(), &RunOptions::default()).unwrap();
    let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
    assert_eq!(paths, vec!["hello.txt"]);
    assert_eq!(result.skip_reasons.get("binary"), Some(&1));
}

#[test]
fn s3_nested_gitignore() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/.gitignore"), "*.generated.go\n").unwrap();
    fs::write(dir.path().join("app.log"), "x").unwrap();
    fs::write(dir.path().join("src/app.log"), "x").unwrap();
    fs::write(dir.path().join("src/types.generated.go"), "x").unwrap();
    fs::write(dir.path().join("types.generated.go"), "x").unwrap();
    fs::write(dir.path().join("src/main.go"), "package main\n").unwrap();

    let (_, result) = run(dir.path(), &RunOptions::default()).unwrap();
    let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
    assert_eq!(paths, vec!["src/main.go", "types.generated.go"]);
}

#[test]
fn s4_filter_precedence() {
    let filter = PathFilter::builder().include(["src/**"]).exclude(["**/*.test.ts"]).build().unwrap();
    assert!(filter.matches("src/app.ts"));
    assert!(!filter.matches("src/app.test.ts"));
    assert!(!filter.matches("other/app.ts"));
}

#[test]
fn s5_profile_inheritance_with_override() {
    let mut config = Config::new();
    let mut child = Profile::default();
    child.extends = Some("default".to_string());
    child.format = Some("xml".to_string());
    config.merge_file(HashMap::from([("child".to_string(), child)]), SourceLayer::Repo);

    let resolved = resolve_profile("child", &config).unwrap();
    assert_eq!(resolved.format, Format::Xml);
    assert_eq!(resolved.provenance.get("format"), Some(&SourceLayer::Repo));
    assert_eq!(resolved.chain, vec!["child".to_string(), "default".to_string()]);
}

#[test]
fn s6_explain_on_ignored_path() {
    let config = Config::new();
    let resolved = resolve_profile("default", &config).unwrap();
    let result = harvx_config::explain::explain_file("node_modules", &resolved);
    assert!(!result.included);
    assert!(result.excluded_by.unwrap().contains("default"));
    assert!(result.trace.iter().any(|t| t.rule == "defaults" && t.matched));
}

#[test]
fn s7_lint_flags_invalid_format() {
    let mut config = Config::new();
    let mut bad = Profile::default();
    bad.format = Some("html".to_string());
    config.merge_file(HashMap::from([("bad".to_string(), bad)]), SourceLayer::Repo);

    let findings = harvx_config::lint::lint(&config);
    assert!(findings
        .iter()
        .any(|f| f.severity == harvx_config::lint::Severity::Error && f.field == "profile.bad.format"));
}

#[test]
fn invariant_1_discovery_result_sorted_and_consistent() {
    let dir = tempdir().unwrap();
    for name in ["z.txt", "a.txt", "m.txt"] {
        fs::write(dir.path().join(name), "x").unwrap();
    }
    let (_, result) = run(dir.path(), &RunOptions::default()).unwrap();
    let paths: Vec<&str> = result.files.iter().map(|f| f.rel_path.as_str()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
    let sum: u64 = result.skip_reasons.values().sum();
    assert_eq!(sum, result.total_skipped);
    for file in &result.files {
        assert!(!file.rel_path.is_empty());
        assert!(!file.rel_path.contains(".."));
        assert!(!file.rel_path.starts_with('/'));
    }
}

#[test]
fn invariant_4_profile_resolution_is_idempotent() {
    let mut config = Config::new();
    let mut child = Profile::default();
    child.extends = Some("default".to_string());
    child.max_tokens = Some(4096);
    config.merge_file(HashMap::from([("child".to_string(), child)]), SourceLayer::Global);

    let first = resolve_profile("child", &config).unwrap();
    let second = resolve_profile("child", &config).unwrap();
    assert_eq!(first.max_tokens, second.max_tokens);
    assert_eq!(first.chain, second.chain);
    assert_eq!(first.provenance.get("max_tokens"), second.provenance.get("max_tokens"));
}
