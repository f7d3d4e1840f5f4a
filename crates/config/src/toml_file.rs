use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::profile::Profile;

/// The on-disk shape of `harvx.toml` / `<userconfig>/harvx/config.toml`:
/// a top-level `[profile.<name>]` table per profile.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    profile: HashMap<String, Profile>,
}

/// One queried config-file layer, for `BuildDebugOutput`'s file listing.
pub struct ConfigFileEntry {
    pub label: &'static str,
    pub path: PathBuf,
    pub found: bool,
}

fn read_profiles(path: &Path) -> Result<HashMap<String, Profile>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let file: ConfigFile =
        toml::from_str(&text).map_err(|source| ConfigError::TomlParse { path: path.to_path_buf(), source })?;
    Ok(file.profile)
}

/// Resolves the platform-appropriate global config path
/// (`<userconfig>/harvx/config.toml`), without requiring it to exist.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("harvx").join("config.toml"))
}

/// Loads the global config file's profiles, if the file exists. Returns an
/// empty map (not an error) when the file is simply absent.
pub fn load_global(path: &Path) -> Result<HashMap<String, Profile>, ConfigError> {
    if !path.exists() {
        log::debug!("global config not found at {}", path.display());
        return Ok(HashMap::new());
    }
    log::debug!("loading global config from {}", path.display());
    read_profiles(path)
}

/// Walks from `start_dir` upward looking for `harvx.toml`, returning its
/// path if found anywhere in the ancestry (repo-root discovery).
pub fn find_repo_config(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(d) = dir {
        let candidate = d.join("harvx.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}

/// The two config-file layers consulted for `repo_dir`, found or not, in
/// the shape `BuildDebugOutput` lists them.
pub fn config_file_entries(repo_dir: &Path) -> Vec<ConfigFileEntry> {
    let mut entries = Vec::new();
    if let Some(global_path) = global_config_path() {
        let found = global_path.exists();
        entries.push(ConfigFileEntry { label: "global", path: global_path, found });
    }
    let repo_path = find_repo_config(repo_dir).unwrap_or_else(|| repo_dir.join("harvx.toml"));
    let found = repo_path.is_file();
    entries.push(ConfigFileEntry { label: "repo", path: repo_path, found });
    entries
}

/// Loads the repo config file's profiles, if found. Returns an empty map
/// (not an error) when no `harvx.toml` exists in the ancestry.
pub fn load_repo(start_dir: &Path) -> Result<HashMap<String, Profile>, ConfigError> {
    match find_repo_config(start_dir) {
        Some(path) => {
            log::debug!("loading repo config from {}", path.display());
            read_profiles(&path)
        }
        None => {
            log::debug!("no harvx.toml found above {}", start_dir.display());
            Ok(HashMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_profile_table_with_relevance_subtable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harvx.toml");
        fs::write(
            &path,
            r#"
            [profile.default]
            format = "xml"

            [profile.default.relevance]
            tier_0 = ["README.md"]
            "#,
        )
        .unwrap();

        let profiles = read_profiles(&path).unwrap();
        let default = &profiles["default"];
        assert_eq!(default.format, Some("xml".to_string()));
        assert_eq!(default.relevance.as_ref().unwrap().tier_0, vec!["README.md".to_string()]);
    }

    #[test]
    fn find_repo_config_walks_upward() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("harvx.toml"), "").unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = find_repo_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("harvx.toml"));
    }

    #[test]
    fn missing_repo_config_is_not_an_error() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("x");
        fs::create_dir_all(&nested).unwrap();
        assert!(load_repo(&nested).unwrap().is_empty());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harvx.toml");
        fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(read_profiles(&path), Err(ConfigError::TomlParse { .. })));
    }
}
