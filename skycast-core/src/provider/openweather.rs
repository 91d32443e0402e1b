use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::FetchError,
    format::degrees_to_compass,
    model::{LocationQuery, Temperature, WeatherBundle, WeatherSnapshot},
};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current-only provider variant. No `units` parameter is sent, so the
/// payload carries Kelvin; the bundle's forecast list stays empty.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_bundle(&self, query: &LocationQuery) -> Result<WeatherBundle, FetchError> {
        let q = query.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", q.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("OpenWeather current request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("OpenWeather current body: {e}")))?;

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { query: q });
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "OpenWeather current request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let parsed: OwResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("OpenWeather current JSON: {e}")))?;

        Ok(bundle_from_response(parsed))
    }
}

fn bundle_from_response(parsed: OwResponse) -> WeatherBundle {
    // Theme lookups key off `main` ("Clear", "Rain", ...), not the free-text
    // description.
    let condition = parsed
        .weather
        .first()
        .map(|w| w.main.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let wind_degree = parsed.wind.deg.unwrap_or(0);

    let current = WeatherSnapshot {
        condition,
        temperature: Temperature::from_kelvin(parsed.main.temp),
        feels_like: Temperature::from_kelvin(parsed.main.feels_like),
        humidity_pct: parsed.main.humidity,
        wind_kph: parsed.wind.speed * 3.6,
        wind_degree,
        wind_dir: degrees_to_compass(wind_degree).to_string(),
        location_name: parsed.name,
        region: String::new(),
        country: parsed.sys.country.unwrap_or_default(),
    };

    WeatherBundle { provider: "openweather".to_string(), current, days: Vec::new() }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "name": "Delhi",
        "sys": { "country": "IN" },
        "main": { "temp": 300.15, "feels_like": 302.65, "humidity": 61 },
        "weather": [ { "main": "Haze" } ],
        "wind": { "speed": 4.1, "deg": 250 }
    }"#;

    #[test]
    fn kelvin_payload_maps_to_current_only_bundle() {
        let parsed: OwResponse = serde_json::from_str(FIXTURE).unwrap();
        let bundle = bundle_from_response(parsed);

        assert_eq!(bundle.provider, "openweather");
        assert_eq!(bundle.current.condition, "Haze");
        assert_eq!(bundle.current.location_name, "Delhi");
        assert_eq!(bundle.current.country, "IN");
        assert!((bundle.current.temperature.celsius - 27.0).abs() < 1e-9);
        assert!((bundle.current.wind_kph - 14.76).abs() < 1e-9);
        assert_eq!(bundle.current.wind_dir, "WSW");
        assert!(bundle.days.is_empty());
    }

    #[test]
    fn missing_weather_array_yields_unknown_condition() {
        let parsed: OwResponse = serde_json::from_str(
            r#"{
                "name": "Delhi",
                "main": { "temp": 290.0, "feels_like": 290.0, "humidity": 50 },
                "weather": [],
                "wind": { "speed": 0.0 }
            }"#,
        )
        .unwrap();

        let bundle = bundle_from_response(parsed);
        assert_eq!(bundle.current.condition, "Unknown");
        assert_eq!(bundle.current.country, "");
    }
}
