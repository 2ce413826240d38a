use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::detection::{self, FALLBACK_FILE_NAME, IMAGE_FIELD};
use shared::{ClientConfig, DetectionEndpoint, DetectionError, DetectionResult};

const CONFIG_PATH: &str = "/api/config";

/// Endpoint baked in at compile time from `ML_API_URL`, or the default.
pub fn build_time_endpoint() -> DetectionEndpoint {
    DetectionEndpoint::resolve(option_env!("ML_API_URL")).unwrap_or_else(|e| {
        log::error!("{}; falling back to {}", e, DetectionEndpoint::default());
        DetectionEndpoint::default()
    })
}

/// Runtime override served by the backend. Absent when the app is hosted
/// elsewhere.
pub async fn fetch_client_config() -> Result<ClientConfig, gloo_net::Error> {
    let response = Request::get(CONFIG_PATH).send().await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "{} returned status {}",
            CONFIG_PATH,
            response.status()
        )));
    }
    response.json::<ClientConfig>().await
}

/// Posts one image to the Detection Service. Makes exactly one attempt.
pub async fn detect_mask_wearing(
    url: &str,
    file: &GlooFile,
) -> Result<DetectionResult, DetectionError> {
    let form_data = web_sys::FormData::new()
        .map_err(|e| DetectionError::Request(format!("{:?}", e)))?;

    let file_name = match file.name() {
        name if name.is_empty() => FALLBACK_FILE_NAME.to_string(),
        name => name,
    };
    form_data
        .append_with_blob_and_filename(IMAGE_FIELD, file.as_ref(), &file_name)
        .map_err(|e| DetectionError::Request(format!("{:?}", e)))?;

    // The browser sets the multipart boundary, so no explicit Content-Type.
    let response = Request::post(url)
        .body(form_data)
        .map_err(|e| DetectionError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| DetectionError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DetectionError::Network(e.to_string()))?;

    detection::interpret_response(status, &body)
}
