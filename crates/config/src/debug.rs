use crate::resolve::ResolvedProfile;
use crate::toml_file::ConfigFileEntry;

pub struct ResolvedFieldEntry {
    pub key: String,
    pub value: String,
    pub source: &'static str,
}

pub struct EnvVarEntry {
    pub name: String,
    pub applied: bool,
}

/// Everything `config debug` reports: which config files were found, the
/// active profile, which env vars were consulted, the final resolved
/// fields with provenance, and the inheritance chain if any.
pub struct DebugOutput {
    pub config_files: Vec<ConfigFileEntry>,
    pub active_profile: String,
    pub env_vars: Vec<EnvVarEntry>,
    pub fields: Vec<ResolvedFieldEntry>,
    pub inherit_chain: Option<Vec<String>>,
}

/// Assembles the debug view from an already-resolved profile, the config
/// files consulted to build it, and the `HARVX_` variables observed in the
/// process environment.
pub fn build_debug_output(profile: &ResolvedProfile, config_files: Vec<ConfigFileEntry>) -> DebugOutput {
    let env_vars: Vec<EnvVarEntry> = std::env::vars()
        .filter_map(|(key, _)| key.strip_prefix("HARVX_").map(|field| (key.clone(), field.to_ascii_lowercase())))
        .map(|(name, field)| EnvVarEntry { applied: profile.provenance.get(&field).copied() == Some(crate::source::SourceLayer::Env), name })
        .collect();

    let mut fields = vec![
        ("format", format!("{:?}", profile.format).to_ascii_lowercase()),
        ("target", format!("{:?}", profile.target).to_ascii_lowercase()),
        ("max_tokens", profile.max_tokens.to_string()),
        ("tokenizer", profile.tokenizer.clone()),
        ("truncation_strategy", format!("{:?}", profile.truncation_strategy).to_ascii_lowercase()),
        ("line_numbers", profile.line_numbers.to_string()),
        ("redact", profile.redact.to_string()),
    ];
    if let Some(output) = &profile.output {
        fields.push(("output", output.clone()));
    }

    let fields = fields
        .into_iter()
        .map(|(key, value)| ResolvedFieldEntry {
            key: key.to_string(),
            value,
            source: profile.provenance.get(key).map(|l| l.as_str()).unwrap_or("default"),
        })
        .collect();

    let inherit_chain = if profile.chain.len() > 1 { Some(profile.chain.clone()) } else { None };

    DebugOutput {
        config_files,
        active_profile: profile.name.clone(),
        env_vars,
        fields,
        inherit_chain,
    }
}
