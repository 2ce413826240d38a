use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Environment variable that overrides the Detection Service URL.
pub const DETECTION_URL_ENV: &str = "ML_API_URL";

pub const DEFAULT_DETECTION_URL: &str = "http://localhost:8000/predict";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid detection service URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Unsupported scheme {0:?} for detection service URL")]
    UnsupportedScheme(String),
}

/// Absolute http(s) URL the detection request is posted to.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionEndpoint(Url);

impl DetectionEndpoint {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Uses `configured` when it is set and not blank, the default otherwise.
    pub fn resolve(configured: Option<&str>) -> Result<Self, ConfigError> {
        match configured.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Self::parse(raw),
            None => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for DetectionEndpoint {
    fn default() -> Self {
        // The default is a fixed, well-formed literal.
        Self(Url::parse(DEFAULT_DETECTION_URL).expect("default detection URL is valid"))
    }
}

impl fmt::Display for DetectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime settings the backend hands to the browser client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub detection_url: String,
}

impl From<&DetectionEndpoint> for ClientConfig {
    fn from(endpoint: &DetectionEndpoint) -> Self {
        Self {
            detection_url: endpoint.to_string(),
        }
    }
}
