use shared::config::DETECTION_URL_ENV;
use shared::{ConfigError, DetectionEndpoint};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8081;
const CONTAINER_FRONTEND_DIR: &str = "/usr/src/app/frontend/dist";

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),
    #[error(transparent)]
    Detection(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub detection_endpoint: DetectionEndpoint,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ServerConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let frontend_dir = match lookup("FRONTEND_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => match lookup("CARGO_MANIFEST_DIR") {
                Some(manifest_dir) => PathBuf::from(manifest_dir).join("../frontend/dist"),
                None => PathBuf::from(CONTAINER_FRONTEND_DIR),
            },
        };

        let detection_endpoint = DetectionEndpoint::resolve(lookup(DETECTION_URL_ENV).as_deref())?;

        Ok(Self {
            port,
            frontend_dir,
            detection_endpoint,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
