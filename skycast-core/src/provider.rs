use crate::{
    Config,
    error::FetchError,
    model::{LocationQuery, WeatherBundle},
    provider::{openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweather;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    WeatherApi,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::OpenWeather => "openweather",
        }
    }

    /// Environment variable consulted before the config file for this
    /// provider's API key.
    pub const fn env_key(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "SKYCAST_WEATHERAPI_API_KEY",
            ProviderId::OpenWeather => "SKYCAST_OPENWEATHER_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::WeatherApi, ProviderId::OpenWeather]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weatherapi" => Ok(ProviderId::WeatherApi),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: weatherapi, openweather."
            )),
        }
    }
}

/// One outbound HTTP call per invocation; no retry, no backoff. Each user
/// action is a fresh independent attempt.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_bundle(&self, query: &LocationQuery) -> Result<WeatherBundle, FetchError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> Result<Box<dyn WeatherProvider>, FetchError> {
    let api_key = config
        .provider_api_key(id)
        .ok_or_else(|| FetchError::MissingApiKey { provider: id.to_string() })?;

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::WeatherApi => Box::new(WeatherApiProvider::new(api_key)),
        ProviderId::OpenWeather => Box::new(OpenWeatherProvider::new(api_key)),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    Ok(provider_from_config(id, config)?)
}
