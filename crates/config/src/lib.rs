//! Hierarchical, multi-source profile configuration: built-in defaults, a
//! global file, a repo file, environment variables, and CLI flag
//! overrides, resolved through a profile's `extends` chain with per-field
//! provenance tracking.

pub mod debug;
pub mod env;
pub mod error;
pub mod explain;
pub mod lint;
pub mod profile;
pub mod resolve;
pub mod source;
pub mod toml_file;

use std::path::Path;

pub use error::ConfigError;
pub use profile::{Format, Profile, RelevanceTiers, Target, TruncationStrategy};
pub use resolve::{resolve_profile, Config, ResolvedProfile};
pub use source::SourceLayer;

/// Plain struct of CLI flag overrides the core accepts as input; it never
/// parses `argv` itself (the dispatcher is out of scope, per §1/§6).
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub output: Option<String>,
    pub format: Option<String>,
    pub target: Option<String>,
    pub max_tokens: Option<u64>,
    pub tokenizer: Option<String>,
    pub truncation_strategy: Option<String>,
    pub line_numbers: Option<bool>,
    pub redact: Option<bool>,
}

/// Applies CLI overrides directly to a chain+env-resolved profile, the
/// highest-precedence layer.
pub fn apply_cli_overrides(resolved: &mut ResolvedProfile, overrides: &CliOverrides) {
    if let Some(output) = &overrides.output {
        resolved.output = Some(output.clone());
        resolved.provenance.insert("output".to_string(), SourceLayer::Flag);
    }
    if let Some(format) = overrides.format.as_deref().and_then(Format::parse) {
        resolved.format = format;
        resolved.provenance.insert("format".to_string(), SourceLayer::Flag);
    }
    if let Some(target) = overrides.target.as_deref().and_then(Target::parse) {
        resolved.target = target;
        resolved.provenance.insert("target".to_string(), SourceLayer::Flag);
    }
    if let Some(max_tokens) = overrides.max_tokens {
        resolved.max_tokens = max_tokens;
        resolved.provenance.insert("max_tokens".to_string(), SourceLayer::Flag);
    }
    if let Some(tokenizer) = &overrides.tokenizer {
        resolved.tokenizer = tokenizer.clone();
        resolved.provenance.insert("tokenizer".to_string(), SourceLayer::Flag);
    }
    if let Some(strategy) = overrides.truncation_strategy.as_deref().and_then(TruncationStrategy::parse) {
        resolved.truncation_strategy = strategy;
        resolved.provenance.insert("truncation_strategy".to_string(), SourceLayer::Flag);
    }
    if let Some(line_numbers) = overrides.line_numbers {
        resolved.line_numbers = line_numbers;
        resolved.provenance.insert("line_numbers".to_string(), SourceLayer::Flag);
    }
    if let Some(redact) = overrides.redact {
        resolved.redact = redact;
        resolved.provenance.insert("redact".to_string(), SourceLayer::Flag);
    }
}

/// Loads the default, global, and repo layers into one [`Config`], the
/// first three of the five source layers described in §4.6. Env vars and
/// CLI overrides are applied afterward, per-profile, by
/// [`env::apply_env_overrides`] and [`apply_cli_overrides`].
pub fn load_config(repo_dir: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::new();

    if let Some(global_path) = toml_file::global_config_path() {
        let global = toml_file::load_global(&global_path)?;
        config.merge_file(global, SourceLayer::Global);
    }

    let repo = toml_file::load_repo(repo_dir)?;
    config.merge_file(repo, SourceLayer::Repo);

    Ok(config)
}
