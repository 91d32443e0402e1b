use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

use crate::{
    error::FetchError,
    format::{parse_date, parse_datetime},
    model::{ForecastDay, HourEntry, LocationQuery, Temperature, WeatherBundle, WeatherSnapshot},
};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.weatherapi.com/v1/forecast.json";

/// Fixed day-count parameter of the forecast call; windowing happens client-side.
const FORECAST_DAYS: &str = "10";

/// Forecast-capable provider: one GET returns current conditions plus ten
/// days of hourly forecast, temperatures in both units.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch_bundle(&self, query: &LocationQuery) -> Result<WeatherBundle, FetchError> {
        let q = query.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("days", FORECAST_DAYS),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("WeatherAPI forecast request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("WeatherAPI forecast body: {e}")))?;

        if !status.is_success() {
            return Err(error_for_status(status, query, &body));
        }

        let parsed: WaResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("WeatherAPI forecast JSON: {e}")))?;

        Ok(bundle_from_response(parsed))
    }
}

/// WeatherAPI reports an unmatched location as 400 (error code 1006); some
/// deployments front it with a plain 404.
fn error_for_status(status: StatusCode, query: &LocationQuery, body: &str) -> FetchError {
    if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
        FetchError::NotFound { query: query.to_string() }
    } else {
        FetchError::Network(format!(
            "WeatherAPI forecast request failed with status {status}: {}",
            truncate_body(body),
        ))
    }
}

fn bundle_from_response(parsed: WaResponse) -> WeatherBundle {
    let current = WeatherSnapshot {
        condition: parsed.current.condition.text,
        temperature: Temperature::from_pair(parsed.current.temp_c, parsed.current.temp_f),
        feels_like: Temperature::from_pair(parsed.current.feelslike_c, parsed.current.feelslike_f),
        humidity_pct: parsed.current.humidity,
        wind_kph: parsed.current.wind_kph,
        wind_degree: parsed.current.wind_degree,
        wind_dir: parsed.current.wind_dir,
        location_name: parsed.location.name,
        region: parsed.location.region,
        country: parsed.location.country,
    };

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .filter_map(|fd| {
            let Some(date) = parse_date(&fd.date) else {
                warn!(date = %fd.date, "skipping forecast day with unparseable date");
                return None;
            };

            let hours = fd
                .hour
                .into_iter()
                .filter_map(|h| {
                    let Some(time) = parse_datetime(&h.time) else {
                        warn!(time = %h.time, "skipping hour entry with unparseable time");
                        return None;
                    };
                    Some(HourEntry {
                        time,
                        temperature: Temperature::from_pair(h.temp_c, h.temp_f),
                        condition: h.condition.text,
                    })
                })
                .collect();

            Some(ForecastDay {
                date,
                min_temp: Temperature::from_pair(fd.day.mintemp_c, fd.day.mintemp_f),
                max_temp: Temperature::from_pair(fd.day.maxtemp_c, fd.day.maxtemp_f),
                condition: fd.day.condition.text,
                rain_chance_pct: fd.day.daily_chance_of_rain,
                snow_chance_pct: fd.day.daily_chance_of_snow,
                sunrise: fd.astro.sunrise,
                sunset: fd.astro.sunset,
                hours,
            })
        })
        .collect();

    WeatherBundle { provider: "weatherapi".to_string(), current, days }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: f64,
    feelslike_c: f64,
    feelslike_f: f64,
    humidity: u8,
    wind_kph: f64,
    wind_degree: u16,
    wind_dir: String,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    maxtemp_f: f64,
    mintemp_c: f64,
    mintemp_f: f64,
    #[serde(default)]
    daily_chance_of_rain: u8,
    #[serde(default)]
    daily_chance_of_snow: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    time: String,
    temp_c: f64,
    temp_f: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    astro: WaAstro,
    hour: Vec<WaHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
