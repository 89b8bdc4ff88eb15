use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to build request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Geocoding API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),

    #[error("Geocoding timed out after {0:?}")]
    Timeout(Duration),

    #[error("Geocoding unavailable: {0}")]
    Unavailable(String),
}

pub type GeocodingResult<T> = Result<T, GeocodingError>;
