//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers
//! - Condition theming, formatting, and the dashboard state machine
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod format;
pub mod location;
pub mod model;
pub mod provider;
pub mod state;
pub mod theme;

pub use config::{Config, ProviderConfig};
pub use dashboard::Dashboard;
pub use error::{FetchError, GeolocationError};
pub use location::{DeniedGeolocator, FixedGeolocator, Geolocator};
pub use model::{
    ForecastDay, ForecastWindow, HourEntry, LocationQuery, Temperature, Units, WeatherBundle,
    WeatherSnapshot,
};
pub use provider::{ProviderId, WeatherProvider};
pub use state::{DashboardState, Event, Notice};
pub use theme::{Condition, ConditionTheme, DEFAULT_THEME};
