use crate::food::models::Coordinates;
use std::env;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

/// Fixed search location used until geolocation exists (near UConn).
pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    lat: 41.808,
    lng: -72.249,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API URL '{0}': {1}")]
    InvalidUrl(String, String),
    #[error("Invalid {0} value '{1}'")]
    InvalidCoordinate(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub location: Coordinates,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            location: DEFAULT_LOCATION,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: &str, location: Coordinates) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            location,
        })
    }

    /// Reads `SMARTEATS_API_URL`, `SMARTEATS_LAT` and `SMARTEATS_LNG`,
    /// falling back to the built-in defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("SMARTEATS_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let lat = match env::var("SMARTEATS_LAT") {
            Ok(raw) => parse_coordinate("latitude", &raw)?,
            Err(_) => DEFAULT_LOCATION.lat,
        };
        let lng = match env::var("SMARTEATS_LNG") {
            Ok(raw) => parse_coordinate("longitude", &raw)?,
            Err(_) => DEFAULT_LOCATION.lng,
        };

        Self::new(&api_url, Coordinates { lat, lng })
    }

    /// Root of the backend, i.e. the API URL without its `/api` path.
    pub fn root_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_url)
            .and_then(|u| u.join("/"))
            .map_err(|e| ConfigError::InvalidUrl(self.api_url.clone(), e.to_string()))
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::InvalidUrl(
            raw.to_string(),
            format!("unsupported scheme {}", other),
        )),
    }
}

pub fn parse_coordinate(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let limit = if name == "latitude" { 90.0 } else { 180.0 };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| ConfigError::InvalidCoordinate(name, raw.to_string()))
}
