use serde::{Deserialize, Serialize};
use std::fmt;

/// Multipart field the Detection Service reads the image from.
pub const IMAGE_FIELD: &str = "image";

/// File name sent when the browser does not provide one.
pub const FALLBACK_FILE_NAME: &str = "image.jpg";

/// Value of `prediction` the service uses to signal a failed detection.
pub const ERROR_SENTINEL: &str = "Error";

pub const DETECTION_FAILED_MESSAGE: &str = "An error occurred during detection. Please try again.";

const RENDERABLE_IMAGE_PREFIX: &str = "data:image/jpeg;base64,";

/// Decision threshold as the service sent it. Observed both as a number and
/// as a string, so neither form is normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Number(f64),
    Text(String),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Number(value) => write!(f, "{}", value),
            Threshold::Text(value) => f.write_str(value),
        }
    }
}

/// Raw body of a Detection Service reply. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub threshold: Option<Threshold>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub prediction: String,
    pub threshold: Option<Threshold>,
    pub renderable_image: String,
}

impl DetectionResult {
    pub fn new(prediction: String, threshold: Option<Threshold>) -> Self {
        let renderable_image = renderable_image(&prediction);
        Self {
            prediction,
            threshold,
            renderable_image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    #[error("Failed to build detection request: {0}")]
    Request(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Detection service returned status {status}")]
    Service { status: u16, message: Option<String> },
    #[error("Failed to parse detection response: {0}")]
    Decode(String),
    #[error("Detection service rejected the image")]
    Rejected { message: Option<String> },
}

impl DetectionError {
    /// Message shown to the user: the service's own words when it sent any,
    /// otherwise the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            DetectionError::Service { message, .. } | DetectionError::Rejected { message } => {
                non_empty(message.as_deref())
                    .map(str::to_string)
                    .unwrap_or_else(|| DETECTION_FAILED_MESSAGE.to_string())
            }
            _ => DETECTION_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Builds the `data:` URL the annotated image is displayed from.
pub fn renderable_image(prediction: &str) -> String {
    format!("{}{}", RENDERABLE_IMAGE_PREFIX, prediction)
}

/// Maps an HTTP status and body from the Detection Service to an outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<DetectionResult, DetectionError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<DetectionResponse>(body)
            .ok()
            .and_then(|response| response.error);
        return Err(DetectionError::Service { status, message });
    }

    let response: DetectionResponse =
        serde_json::from_str(body).map_err(|e| DetectionError::Decode(e.to_string()))?;

    match non_empty(response.prediction.as_deref()) {
        Some(prediction) if prediction != ERROR_SENTINEL => Ok(DetectionResult::new(
            prediction.to_string(),
            response.threshold,
        )),
        _ => Err(DetectionError::Rejected {
            message: response.error,
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
