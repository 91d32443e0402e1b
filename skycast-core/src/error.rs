use thiserror::Error;

/// Failure modes of a single weather fetch.
///
/// Every variant is recovered at the call site: the dashboard clears the live
/// bundle, raises one transient notice, and the user may retry immediately.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no location matched '{query}'")]
    NotFound { query: String },

    #[error("weather provider request failed: {0}")]
    Network(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error(
        "No API key configured for provider '{provider}'.\n\
         Hint: run `skycast configure {provider}` and enter your API key."
    )]
    MissingApiKey { provider: String },
}

/// Why a one-shot geolocation attempt produced no coordinates.
///
/// Non-fatal: the location resolver falls back to the configured default city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    Denied,

    #[error("geolocation is not supported on this platform")]
    Unsupported,
}
