use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Markdown,
    Xml,
}

impl Format {
    pub fn parse(s: &str) -> Option<Format> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" => Some(Format::Markdown),
            "xml" => Some(Format::Xml),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Claude,
    Chatgpt,
    Generic,
}

impl Target {
    pub fn parse(s: &str) -> Option<Target> {
        match s.to_ascii_lowercase().as_str() {
            "claude" => Some(Target::Claude),
            "chatgpt" => Some(Target::Chatgpt),
            "generic" => Some(Target::Generic),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncationStrategy {
    Truncate,
    Skip,
}

impl TruncationStrategy {
    pub fn parse(s: &str) -> Option<TruncationStrategy> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Some(TruncationStrategy::Truncate),
            "skip" => Some(TruncationStrategy::Skip),
            _ => None,
        }
    }
}

/// Ordered glob lists for relevance tiers 0 (highest) through 5 (lowest).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RelevanceTiers {
    #[serde(default)]
    pub tier_0: Vec<String>,
    #[serde(default)]
    pub tier_1: Vec<String>,
    #[serde(default)]
    pub tier_2: Vec<String>,
    #[serde(default)]
    pub tier_3: Vec<String>,
    #[serde(default)]
    pub tier_4: Vec<String>,
    #[serde(default)]
    pub tier_5: Vec<String>,
}

impl RelevanceTiers {
    /// Tiers in evaluation order, 0 (most relevant) through 5, each paired
    /// with its tier number.
    pub fn ordered(&self) -> [(u8, &Vec<String>); 6] {
        [
            (0, &self.tier_0),
            (1, &self.tier_1),
            (2, &self.tier_2),
            (3, &self.tier_3),
            (4, &self.tier_4),
            (5, &self.tier_5),
        ]
    }
}

/// A bundle of recognized configuration fields. Every field is `Option`:
/// `None` means "not set here, inherit from the parent in the `extends`
/// chain (or the built-in default)". This is deliberately stricter than a
/// zero-value sentinel — it lets a child profile restate `redact = false`
/// and have that actually win, rather than a literal `false` being
/// indistinguishable from "unset".
///
/// `format`, `target`, and `truncation_strategy` are kept as raw strings
/// here rather than parsed enums: an invalid value (`format = "html"`) must
/// load successfully so the linter can flag it by name, rather than fail
/// at the TOML-parsing stage with a generic deserialization error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u64>,
    #[serde(default)]
    pub tokenizer: Option<String>,
    #[serde(default)]
    pub truncation_strategy: Option<String>,
    #[serde(default)]
    pub line_numbers: Option<bool>,
    #[serde(default)]
    pub redact: Option<bool>,
    #[serde(default)]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(default)]
    pub priority_files: Option<Vec<String>>,
    #[serde(default)]
    pub relevance: Option<RelevanceTiers>,
}

impl Profile {
    /// The built-in `default` profile, synthesized when no file supplies
    /// one. Every field is populated so it can terminate any chain.
    pub fn builtin_default() -> Profile {
        Profile {
            extends: None,
            output: None,
            format: Some("markdown".to_string()),
            target: Some("generic".to_string()),
            max_tokens: Some(0),
            tokenizer: Some("none".to_string()),
            truncation_strategy: Some("truncate".to_string()),
            line_numbers: Some(false),
            redact: Some(true),
            exclude_paths: Some(Vec::new()),
            priority_files: Some(Vec::new()),
            relevance: Some(RelevanceTiers::default()),
        }
    }

    /// Overlays `self`'s set fields onto `parent`, child winning. Mirrors
    /// the `field.or(parent.field)` combine idiom used for profile
    /// inheritance elsewhere in the ecosystem.
    pub fn combine(&self, parent: &Profile) -> Profile {
        Profile {
            extends: self.extends.clone().or_else(|| parent.extends.clone()),
            output: self.output.clone().or_else(|| parent.output.clone()),
            format: self.format.clone().or_else(|| parent.format.clone()),
            target: self.target.clone().or_else(|| parent.target.clone()),
            max_tokens: self.max_tokens.or(parent.max_tokens),
            tokenizer: self.tokenizer.clone().or_else(|| parent.tokenizer.clone()),
            truncation_strategy: self.truncation_strategy.clone().or_else(|| parent.truncation_strategy.clone()),
            line_numbers: self.line_numbers.or(parent.line_numbers),
            redact: self.redact.or(parent.redact),
            exclude_paths: self.exclude_paths.clone().or_else(|| parent.exclude_paths.clone()),
            priority_files: self.priority_files.clone().or_else(|| parent.priority_files.clone()),
            relevance: self.relevance.clone().or_else(|| parent.relevance.clone()),
        }
    }
}
