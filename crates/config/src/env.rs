use crate::profile::{Format, Target, TruncationStrategy};
use crate::resolve::ResolvedProfile;
use crate::source::SourceLayer;

const PREFIX: &str = "HARVX_";

/// Applies `HARVX_<FIELD>` environment variable overrides to an already
/// chain-resolved profile, the highest-precedence layer before CLI flags.
/// Reads from the process environment; callers testing this should prefer
/// [`apply_from`] with an explicit variable source.
pub fn apply_env_overrides(resolved: &mut ResolvedProfile) {
    let vars: Vec<(String, String)> = std::env::vars().collect();
    apply_from(resolved, vars);
}

pub fn apply_from(resolved: &mut ResolvedProfile, vars: Vec<(String, String)>) {
    for (key, value) in vars {
        let Some(field) = key.strip_prefix(PREFIX) else { continue };
        let field = field.to_ascii_lowercase();
        log::debug!("considering env override {key}");
        if apply_field(resolved, &field, &value) {
            resolved.provenance.insert(field, SourceLayer::Env);
        }
    }
}

fn apply_field(resolved: &mut ResolvedProfile, field: &str, value: &str) -> bool {
    match field {
        "output" => {
            resolved.output = Some(value.to_string());
            true
        }
        "format" => match value.to_ascii_lowercase().as_str() {
            "markdown" => {
                resolved.format = Format::Markdown;
                true
            }
            "xml" => {
                resolved.format = Format::Xml;
                true
            }
            _ => false,
        },
        "target" => match value.to_ascii_lowercase().as_str() {
            "claude" => {
                resolved.target = Target::Claude;
                true
            }
            "chatgpt" => {
                resolved.target = Target::Chatgpt;
                true
            }
            "generic" => {
                resolved.target = Target::Generic;
                true
            }
            _ => false,
        },
        "max_tokens" => match value.parse::<u64>() {
            Ok(n) => {
                resolved.max_tokens = n;
                true
            }
            Err(_) => false,
        },
        "tokenizer" => {
            resolved.tokenizer = value.to_string();
            true
        }
        "truncation_strategy" => match value.to_ascii_lowercase().as_str() {
            "truncate" => {
                resolved.truncation_strategy = TruncationStrategy::Truncate;
                true
            }
            "skip" => {
                resolved.truncation_strategy = TruncationStrategy::Skip;
                true
            }
            _ => false,
        },
        "line_numbers" => match value.parse::<bool>() {
            Ok(b) => {
                resolved.line_numbers = b;
                true
            }
            Err(_) => false,
        },
        "redact" => match value.parse::<bool>() {
            Ok(b) => {
                resolved.redact = b;
                true
            }
            Err(_) => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> ResolvedProfile {
        ResolvedProfile {
            name: "default".to_string(),
            output: None,
            format: Format::Markdown,
            target: Target::Generic,
            max_tokens: 0,
            tokenizer: "none".to_string(),
            truncation_strategy: TruncationStrategy::Truncate,
            line_numbers: false,
            redact: true,
            exclude_paths: Vec::new(),
            priority_files: Vec::new(),
            relevance: Default::default(),
            chain: vec!["default".to_string()],
            provenance: HashMap::new(),
        }
    }

    #[test]
    fn format_and_max_tokens_are_overridden() {
        let mut resolved = sample();
        apply_from(
            &mut resolved,
            vec![("HARVX_FORMAT".to_string(), "xml".to_string()), ("HARVX_MAX_TOKENS".to_string(), "8000".to_string())],
        );
        assert_eq!(resolved.format, Format::Xml);
        assert_eq!(resolved.max_tokens, 8000);
        assert_eq!(resolved.provenance.get("format"), Some(&SourceLayer::Env));
        assert_eq!(resolved.provenance.get("max_tokens"), Some(&SourceLayer::Env));
    }

    #[test]
    fn unrelated_env_vars_are_ignored() {
        let mut resolved = sample();
        apply_from(&mut resolved, vec![("PATH".to_string(), "/usr/bin".to_string())]);
        assert_eq!(resolved.format, Format::Markdown);
    }

    #[test]
    fn invalid_value_leaves_field_untouched() {
        let mut resolved = sample();
        apply_from(&mut resolved, vec![("HARVX_FORMAT".to_string(), "html".to_string())]);
        assert_eq!(resolved.format, Format::Markdown);
        assert!(!resolved.provenance.contains_key("format"));
    }
}
