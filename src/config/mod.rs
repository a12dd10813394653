pub mod schema;

pub use schema::QuillConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default config directory (~/.config/quill on Linux).
pub fn default_config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "quill")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".quill"))
}

/// Default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load config from the given path (or defaults if absent), then fold in
/// environment overrides and the key-file fallback.
pub fn load_config(path: &Path) -> Result<QuillConfig> {
    let mut config = if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read quill config file")?;
        toml::from_str(&contents).context("Failed to parse quill config (TOML)")?
    } else {
        QuillConfig::default()
    };

    apply_env_overrides(&mut config);

    // A bare `api_key` file in the config dir works as a fallback
    // credential source for deployments that avoid environment variables.
    if config.api_key.is_empty() {
        let key_file = default_config_dir().join("api_key");
        if let Ok(key) = std::fs::read_to_string(&key_file) {
            config.api_key = key.trim().to_string();
        }
    }

    Ok(config)
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &QuillConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}

/// Environment variables take precedence over the config file.
fn apply_env_overrides(config: &mut QuillConfig) {
    if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
        if !key.is_empty() {
            config.api_key = key;
        }
    }
    if let Ok(proxy) = std::env::var("QUILL_PROXY") {
        if !proxy.is_empty() {
            config.proxy_url = proxy;
        }
    }
    if let Ok(model) = std::env::var("QUILL_MODEL") {
        if !model.is_empty() {
            config.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.max_turns, 50);
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = QuillConfig::default();
        config.model = "claude-opus-4-20250514".into();
        config.max_turns = 10;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.max_turns, 10);
        // QUILL_MODEL may override in a polluted environment; only check
        // when it is unset.
        if std::env::var("QUILL_MODEL").is_err() {
            assert_eq!(loaded.model, "claude-opus-4-20250514");
        }
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_turns = 7\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.max_turns, 7);
        assert_eq!(config.bash_timeout_secs, 120);
    }
}
