use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::model::{ForecastWindow, Units};
use crate::provider::ProviderId;

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Optional default provider id, e.g. "weatherapi" or "openweather".
    pub default_provider: Option<String>,

    /// City used when geolocation is denied and no city was typed.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Startup temperature units.
    #[serde(default = "default_units")]
    pub units: Units,

    /// Startup forecast window (4 or 9 days).
    #[serde(default = "default_window")]
    pub forecast_window: ForecastWindow,

    /// Whether today's date is filtered out of the daily forecast list.
    #[serde(default = "default_exclude_today")]
    pub exclude_today: bool,

    /// Example TOML:
    /// [providers.weatherapi]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_city() -> String {
    "Mumbai".to_string()
}

fn default_units() -> Units {
    Units::Celsius
}

fn default_window() -> ForecastWindow {
    ForecastWindow::Short
}

fn default_exclude_today() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: None,
            default_city: default_city(),
            units: default_units(),
            forecast_window: default_window(),
            exclude_today: default_exclude_today(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let s = self.default_provider.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No default provider configured.\n\
                 Hint: run `skycast configure <provider>` (e.g. `skycast configure weatherapi`) first."
            )
        })?;

        ProviderId::try_from(s.as_str())
    }

    pub fn has_provider(&self, id: ProviderId) -> bool {
        self.providers.contains_key(id.as_str())
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a provider API key and optionally set default provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present. The environment override
    /// (`SKYCAST_<PROVIDER>_API_KEY`) wins over the config file so keys never
    /// have to be written to disk.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<String> {
        if let Ok(key) = env::var(provider_id.env_key())
            && !key.trim().is_empty()
        {
            return Some(key);
        }

        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.clone())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn default_provider_id_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.default_provider_id().unwrap_err();

        assert!(err.to_string().contains("No default provider configured"));
    }

    #[test]
    fn defaults_match_the_dashboard_startup_state() {
        let cfg = Config::default();

        assert_eq!(cfg.default_city, "Mumbai");
        assert_eq!(cfg.units, Units::Celsius);
        assert_eq!(cfg.forecast_window, ForecastWindow::Short);
        assert!(cfg.exclude_today);
    }

    #[test]
    fn set_api_key_and_default_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "WA_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::WeatherApi);

        let key = cfg.provider_api_key(ProviderId::WeatherApi);
        assert_eq!(key.as_deref(), Some("WA_KEY"));
        assert!(cfg.is_provider_configured(ProviderId::WeatherApi));
    }

    #[test]
    fn upsert_does_not_override_existing_default() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "WA_KEY".into());
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OW_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");

        assert_eq!(default, ProviderId::WeatherApi);
        assert!(cfg.is_provider_configured(ProviderId::WeatherApi));
        assert!(cfg.is_provider_configured(ProviderId::OpenWeather));
    }

    #[test]
    fn set_default_provider_overrides_default() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "WA_KEY".into());
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OW_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::WeatherApi);

        cfg.set_default_provider(ProviderId::OpenWeather);

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::OpenWeather);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults_when_parsing() {
        let cfg: Config = toml::from_str("default_provider = \"weatherapi\"").unwrap();

        assert_eq!(cfg.default_city, "Mumbai");
        assert_eq!(cfg.units, Units::Celsius);
        assert!(cfg.exclude_today);
    }
}
