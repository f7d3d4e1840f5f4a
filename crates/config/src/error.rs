use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {path}: {source}")]
    TomlParse { path: PathBuf, source: toml::de::Error },

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("cyclic profile inheritance: {}", .0.join(" -> "))]
    ExtendsCycle(Vec<String>),

    #[error("invalid value {value:?} for field {field}")]
    InvalidFieldValue { field: String, value: String },
}
