use std::collections::HashMap;

use crate::profile::Profile;
use crate::resolve::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug)]
pub struct LintFinding {
    pub severity: Severity,
    pub field: String,
    pub message: String,
    pub suggested_fix: Option<String>,
}

const MAX_TOKENS_SOFT_CAP: u64 = 500_000;

/// Validates every profile in `config` and returns all findings. At least
/// one `Severity::Error` finding should cause the caller's lint command to
/// exit non-zero; warnings/info should not.
pub fn lint(config: &Config) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let profiles = config.raw_profiles();

    for (name, profile) in &profiles {
        let prefix = format!("profile.{name}");

        if let Some(format) = &profile.format {
            if crate::profile::Format::parse(format).is_none() {
                findings.push(LintFinding {
                    severity: Severity::Error,
                    field: format!("{prefix}.format"),
                    message: format!("unrecognized format {format:?}"),
                    suggested_fix: Some("use \"markdown\" or \"xml\"".to_string()),
                });
            }
        }

        if let Some(truncation) = &profile.truncation_strategy {
            if crate::profile::TruncationStrategy::parse(truncation).is_none() {
                findings.push(LintFinding {
                    severity: Severity::Error,
                    field: format!("{prefix}.truncation_strategy"),
                    message: format!("unrecognized truncation_strategy {truncation:?}"),
                    suggested_fix: Some("use \"truncate\" or \"skip\"".to_string()),
                });
            }
        }

        if let Some(tokenizer) = &profile.tokenizer {
            if tokenizer != "none" && !KNOWN_TOKENIZERS.contains(&tokenizer.as_str()) {
                findings.push(LintFinding {
                    severity: Severity::Warning,
                    field: format!("{prefix}.tokenizer"),
                    message: format!("tokenizer {tokenizer:?} is not a recognized name"),
                    suggested_fix: None,
                });
            }
        }

        if let Some(max_tokens) = profile.max_tokens {
            if max_tokens > MAX_TOKENS_SOFT_CAP {
                findings.push(LintFinding {
                    severity: Severity::Warning,
                    field: format!("{prefix}.max_tokens"),
                    message: format!("max_tokens {max_tokens} exceeds the soft cap of {MAX_TOKENS_SOFT_CAP}"),
                    suggested_fix: None,
                });
            }
        }

        if let Some(relevance) = &profile.relevance {
            let mut seen: HashMap<&str, u8> = HashMap::new();
            for (tier_num, patterns) in relevance.ordered() {
                for pattern in patterns {
                    if let Some(&earlier_tier) = seen.get(pattern.as_str()) {
                        findings.push(LintFinding {
                            severity: Severity::Warning,
                            field: format!("{prefix}.relevance"),
                            message: format!(
                                "pattern {pattern:?} appears in both tier_{earlier_tier} and tier_{tier_num} (overlapping)"
                            ),
                            suggested_fix: Some("keep each pattern in exactly one tier".to_string()),
                        });
                    } else {
                        seen.insert(pattern.as_str(), tier_num);
                    }
                }
            }
        }

        if let Some(parent) = &profile.extends {
            if !config.contains(parent) {
                findings.push(LintFinding {
                    severity: Severity::Error,
                    field: format!("{prefix}.extends"),
                    message: format!("extends unknown profile {parent:?}"),
                    suggested_fix: None,
                });
            } else if let Err(err) = crate::resolve::resolve_profile(name, config) {
                findings.push(LintFinding {
                    severity: Severity::Error,
                    field: format!("{prefix}.extends"),
                    message: err.to_string(),
                    suggested_fix: None,
                });
            }
        }
    }

    findings
}

const KNOWN_TOKENIZERS: &[&str] = &["cl100k_base", "o200k_base", "p50k_base", "claude"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceLayer;

    #[test]
    fn scenario_s7_lint_flags_invalid_format() {
        let mut config = Config::new();
        let mut bad = Profile::default();
        bad.format = Some("html".to_string());
        config.merge_file(HashMap::from([("bad".to_string(), bad)]), SourceLayer::Repo);

        let findings = lint(&config);
        assert!(findings.iter().any(|f| f.severity == Severity::Error && f.field == "profile.bad.format"));
    }

    #[test]
    fn high_max_tokens_is_a_warning_not_an_error() {
        let mut config = Config::new();
        let mut p = Profile::default();
        p.max_tokens = Some(1_000_000);
        config.merge_file(HashMap::from([("big".to_string(), p)]), SourceLayer::Repo);
        let findings = lint(&config);
        assert!(findings.iter().all(|f| f.severity != Severity::Error));
        assert!(findings.iter().any(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn overlapping_tier_patterns_warn() {
        let mut config = Config::new();
        let mut p = Profile::default();
        let mut relevance = crate::profile::RelevanceTiers::default();
        relevance.tier_0 = vec!["README.md".to_string()];
        relevance.tier_1 = vec!["README.md".to_string()];
        p.relevance = Some(relevance);
        config.merge_file(HashMap::from([("dup".to_string(), p)]), SourceLayer::Repo);
        let findings = lint(&config);
        assert!(findings.iter().any(|f| f.message.contains("overlapping")));
    }

    #[test]
    fn clean_profile_has_no_findings() {
        let config = Config::new();
        assert!(lint(&config).is_empty());
    }
}
