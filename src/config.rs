use crate::error::{FolioError, Result};
use crate::types::config::FolioConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "repofolio.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".repofolio/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repofolio/config.toml";
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

pub fn load_config(root: &Path) -> Result<FolioConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<FolioConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    merged
        .try_into()
        .map_err(|e: toml::de::Error| FolioError::ConfigParse(e.to_string()))
}

/// Loads `.env.local` then `.env`; variables already set in the process win.
pub fn load_env_files(root: &Path) {
    for name in ENV_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to load env file"),
        }
    }
}

pub fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(FolioError::MissingEnv(name.to_string())),
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| FolioError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
