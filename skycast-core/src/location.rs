//! Location resolution.
//!
//! Produces the single query term the weather fetch runs with: a typed city
//! name wins, then a one-shot geolocation attempt, then the configured
//! default city. Geolocation failure is non-fatal and surfaces no retry.

use async_trait::async_trait;
use tracing::debug;

use crate::error::GeolocationError;
use crate::model::LocationQuery;

/// One-shot platform geolocation hook. The platform owns prompting and
/// timeout; implementations resolve or fail, never block indefinitely.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<(f64, f64), GeolocationError>;
}

/// Platform without a geolocation capability (or permission denied up front).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocator;

#[async_trait]
impl Geolocator for DeniedGeolocator {
    async fn current_position(&self) -> Result<(f64, f64), GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Pre-granted coordinates, e.g. from `--lat`/`--lon` flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<(f64, f64), GeolocationError> {
        Ok((self.lat, self.lon))
    }
}

/// Resolve the query term for the next fetch. Exactly one fetch is expected
/// downstream per resolution.
pub async fn resolve(
    geolocator: &dyn Geolocator,
    typed_city: Option<&str>,
    default_city: &str,
) -> LocationQuery {
    if let Some(city) = typed_city.map(str::trim).filter(|c| !c.is_empty()) {
        return LocationQuery::City(city.to_string());
    }

    match geolocator.current_position().await {
        Ok((lat, lon)) => {
            debug!(lat, lon, "geolocation granted");
            LocationQuery::Coordinates { lat, lon }
        }
        Err(err) => {
            debug!(%err, fallback = default_city, "geolocation unavailable");
            LocationQuery::City(default_city.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn typed_city_wins_over_geolocation() {
        let geo = FixedGeolocator { lat: 19.076, lon: 72.8777 };
        let query = resolve(&geo, Some("Delhi"), "Mumbai").await;
        assert_eq!(query, LocationQuery::City("Delhi".into()));
    }

    #[tokio::test]
    async fn granted_geolocation_produces_coordinates() {
        let geo = FixedGeolocator { lat: 19.076, lon: 72.8777 };
        let query = resolve(&geo, None, "Mumbai").await;
        assert_eq!(query, LocationQuery::Coordinates { lat: 19.076, lon: 72.8777 });
    }

    #[tokio::test]
    async fn denied_geolocation_falls_back_to_default_city() {
        let query = resolve(&DeniedGeolocator, None, "Mumbai").await;
        assert_eq!(query, LocationQuery::City("Mumbai".into()));
    }

    #[tokio::test]
    async fn whitespace_city_is_treated_as_absent() {
        let query = resolve(&DeniedGeolocator, Some("   "), "Mumbai").await;
        assert_eq!(query, LocationQuery::City("Mumbai".into()));
    }
}
