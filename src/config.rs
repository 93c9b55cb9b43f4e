use crate::dispatch::DEFAULT_BASE_URL;
use crate::message::DEFAULT_COMPOSE_DELAY_MS;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub contacts: ContactsConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    pub base_url: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    pub delay_ms: u64,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self { delay_ms: DEFAULT_COMPOSE_DELAY_MS }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    pub load_samples: bool,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self { load_samples: true }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save()?;
            return Ok(default_config);
        }

        // Read and parse config file
        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Serialize and save config
        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Reads one setting by its dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "messaging.base_url" => Some(self.messaging.base_url.clone()),
            "compose.delay_ms" => Some(self.compose.delay_ms.to_string()),
            "contacts.load_samples" => Some(self.contacts.load_samples.to_string()),
            _ => None,
        }
    }

    /// Updates one setting by its dotted key, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "messaging.base_url" => {
                url::Url::parse(value)
                    .with_context(|| format!("'{}' is not a valid base URL", value))?;
                self.messaging.base_url = value.trim_end_matches('/').to_string();
            }
            "compose.delay_ms" => {
                self.compose.delay_ms = value
                    .parse()
                    .with_context(|| format!("'{}' is not a valid delay in milliseconds", value))?;
            }
            "contacts.load_samples" => {
                self.contacts.load_samples = value
                    .parse()
                    .with_context(|| format!("'{}' is not true or false", value))?;
            }
            _ => return Err(anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// All known dotted keys, in display order.
    pub fn keys() -> &'static [&'static str] {
        &["messaging.base_url", "compose.delay_ms", "contacts.load_samples"]
    }
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "confetti", "confetti")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.messaging.base_url, "https://wa.me");
        assert_eq!(config.compose.delay_ms, 1500);
        assert!(config.contacts.load_samples);
    }

    #[test]
    fn test_partial_file_fills_missing_sections_and_fields() -> Result<()> {
        let config: Config = toml::from_str("[compose]\ndelay_ms = 250\n")?;
        assert_eq!(config.compose.delay_ms, 250);
        assert_eq!(config.messaging.base_url, "https://wa.me");
        assert!(config.contacts.load_samples);

        let config: Config = toml::from_str("[messaging]\n")?;
        assert_eq!(config.messaging.base_url, "https://wa.me");
        Ok(())
    }

    #[test]
    fn test_get_and_set_by_key() -> Result<()> {
        let mut config = Config::default();

        config.set("compose.delay_ms", "100")?;
        assert_eq!(config.get("compose.delay_ms").as_deref(), Some("100"));

        config.set("contacts.load_samples", "false")?;
        assert_eq!(config.get("contacts.load_samples").as_deref(), Some("false"));

        config.set("messaging.base_url", "https://example.test/")?;
        assert_eq!(config.get("messaging.base_url").as_deref(), Some("https://example.test"));

        assert!(config.set("compose.delay_ms", "soon").is_err());
        assert!(config.set("messaging.base_url", "not a url").is_err());
        assert!(config.set("unknown.key", "1").is_err());
        assert!(config.get("unknown.key").is_none());
        Ok(())
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        // Create temporary directory
        let temp_dir = tempdir()?;

        // Set up temporary config directory
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());

        // Create and save config
        let mut config = Config::default();
        config.set("compose.delay_ms", "42")?;
        config.save()?;

        // Load config
        let loaded = Config::load()?;

        // Verify loaded config matches saved config
        assert_eq!(loaded.compose.delay_ms, 42);
        assert_eq!(loaded.messaging.base_url, config.messaging.base_url);

        Ok(())
    }
}
