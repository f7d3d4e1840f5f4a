use std::collections::HashMap;

use crate::error::ConfigError;
use crate::profile::{Format, Profile, RelevanceTiers, TruncationStrategy};
use crate::source::SourceLayer;

/// A profile plus which layer last set each of its non-`None` fields. Used
/// only while assembling [`Config`] from the default/global/repo layers,
/// before chain resolution collapses everything into a [`ResolvedProfile`].
#[derive(Clone, Debug, Default)]
pub struct LayeredProfile {
    pub profile: Profile,
    pub field_layers: HashMap<&'static str, SourceLayer>,
}

impl LayeredProfile {
    /// Merges `patch` on top of `self`, recording `layer` against every
    /// field `patch` actually sets.
    pub fn merge_patch(&mut self, patch: &Profile, layer: SourceLayer) {
        macro_rules! apply {
            ($field:ident) => {
                if patch.$field.is_some() {
                    self.profile.$field = patch.$field.clone();
                    self.field_layers.insert(stringify!($field), layer);
                }
            };
        }
        apply!(extends);
        apply!(output);
        apply!(format);
        apply!(target);
        apply!(max_tokens);
        apply!(tokenizer);
        apply!(truncation_strategy);
        apply!(line_numbers);
        apply!(redact);
        apply!(exclude_paths);
        apply!(priority_files);
        apply!(relevance);
    }
}

/// A named mapping of profiles, assembled from the default/global/repo
/// layers. Always contains a `"default"` entry, synthesized from
/// [`Profile::builtin_default`] if no file supplies one.
#[derive(Clone, Debug, Default)]
pub struct Config {
    profiles: HashMap<String, LayeredProfile>,
}

impl Config {
    pub fn new() -> Config {
        let mut profiles = HashMap::new();
        let mut default = LayeredProfile::default();
        default.merge_patch(&Profile::builtin_default(), SourceLayer::Default);
        profiles.insert("default".to_string(), default);
        Config { profiles }
    }

    /// Merges every profile table in `patch` into this config at `layer`.
    /// A profile name not yet present is created first from an empty
    /// [`LayeredProfile`] (all fields unset until the chain is resolved).
    pub fn merge_file(&mut self, patch: HashMap<String, Profile>, layer: SourceLayer) {
        for (name, profile_patch) in patch {
            let entry = self.profiles.entry(name).or_default();
            entry.merge_patch(&profile_patch, layer);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// The merged (post default/global/repo layering, pre-`extends`)
    /// profile for each name, for callers like the linter that need to
    /// inspect raw field values rather than a fully resolved chain.
    pub fn raw_profiles(&self) -> HashMap<String, Profile> {
        self.profiles.iter().map(|(name, entry)| (name.clone(), entry.profile.clone())).collect()
    }
}

/// The fully merged result of walking a profile's `extends` chain: concrete
/// values for every field, the chain (child first, ending at `default`),
/// and per-field provenance.
#[derive(Clone, Debug)]
pub struct ResolvedProfile {
    pub name: String,
    pub output: Option<String>,
    pub format: Format,
    pub target: crate::profile::Target,
    pub max_tokens: u64,
    pub tokenizer: String,
    pub truncation_strategy: TruncationStrategy,
    pub line_numbers: bool,
    pub redact: bool,
    pub exclude_paths: Vec<String>,
    pub priority_files: Vec<String>,
    pub relevance: RelevanceTiers,
    /// Child first, terminal ancestor (`"default"` unless otherwise
    /// terminated) last.
    pub chain: Vec<String>,
    pub provenance: HashMap<String, SourceLayer>,
}

/// Builds the `extends` chain for `name`, detects cycles, and merges
/// ancestors-first (child overriding). Fields left unset by the whole
/// chain fall back to [`Profile::builtin_default`], attributed to
/// [`SourceLayer::Default`].
pub fn resolve_profile(name: &str, config: &Config) -> Result<ResolvedProfile, ConfigError> {
    let mut chain = Vec::new();
    let mut seen = Vec::new();
    let mut current = name.to_string();
    loop {
        if seen.contains(&current) {
            let mut cycle = seen.clone();
            cycle.push(current);
            return Err(ConfigError::ExtendsCycle(cycle));
        }
        seen.push(current.clone());
        let entry = config
            .profiles
            .get(&current)
            .ok_or_else(|| ConfigError::UnknownProfile(current.clone()))?;
        chain.push(current.clone());
        match &entry.profile.extends {
            Some(parent) => current = parent.clone(),
            None => break,
        }
    }
    let builtin = Profile::builtin_default();
    let mut merged = Profile::default();
    let mut provenance: HashMap<String, SourceLayer> = HashMap::new();

    // Ancestors-first: the terminal ancestor merges first, the requested
    // profile (chain[0]) merges last and so wins ties.
    for profile_name in chain.iter().rev() {
        let entry = &config.profiles[profile_name];
        for (field, layer) in &entry.field_layers {
            provenance.insert((*field).to_string(), *layer);
        }
        merged = entry.profile.combine(&merged);
    }
    // Anything still unset falls back to the built-in constants.
    for (field, is_set) in field_presence(&merged) {
        if !is_set {
            provenance.entry(field.to_string()).or_insert(SourceLayer::Default);
        }
    }
    merged = merged.combine(&builtin);

    Ok(ResolvedProfile {
        name: name.to_string(),
        output: merged.output,
        format: merged.format.as_deref().and_then(Format::parse).unwrap_or(Format::Markdown),
        target: merged.target.as_deref().and_then(crate::profile::Target::parse).unwrap_or(crate::profile::Target::Generic),
        max_tokens: merged.max_tokens.unwrap_or(0),
        tokenizer: merged.tokenizer.unwrap_or_else(|| "none".to_string()),
        truncation_strategy: merged
            .truncation_strategy
            .as_deref()
            .and_then(TruncationStrategy::parse)
            .unwrap_or(TruncationStrategy::Truncate),
        line_numbers: merged.line_numbers.unwrap_or(false),
        redact: merged.redact.unwrap_or(true),
        exclude_paths: merged.exclude_paths.unwrap_or_default(),
        priority_files: merged.priority_files.unwrap_or_default(),
        relevance: merged.relevance.unwrap_or_default(),
        chain,
        provenance,
    })
}

fn field_presence(p: &Profile) -> [(&'static str, bool); 9] {
    [
        ("output", p.output.is_some()),
        ("format", p.format.is_some()),
        ("target", p.target.is_some()),
        ("max_tokens", p.max_tokens.is_some()),
        ("tokenizer", p.tokenizer.is_some()),
        ("truncation_strategy", p.truncation_strategy.is_some()),
        ("line_numbers", p.line_numbers.is_some()),
        ("redact", p.redact.is_some()),
        ("relevance", p.relevance.is_some()),
    ]
}
