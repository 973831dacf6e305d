use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use lesion_capture_core::{ImageArtifact, InferenceClient, InferenceError, InferenceResult};

use crate::config::{ConfigError, ServiceConfig};

/// Upload limit enforced client-side, matching the service's own cap.
const MAX_UPLOAD_MB: u32 = 25;

/// MIME types the service accepts.
const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Client for the inference service's `POST /predict` endpoint.
///
/// Submits the artifact as one multipart binary field and parses the
/// `{label, confidence, probabilities?, inference_ms?}` response. Non-2xx
/// responses are reported with the best-effort `detail` from the error body.
pub struct HttpInferenceClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpInferenceClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ConfigError::ClientBuild(err.to_string()))?;
        Ok(Self {
            base_url: config.inference_base_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn predict(&self, artifact: &ImageArtifact) -> Result<InferenceResult, InferenceError> {
        validate_artifact(artifact)?;

        let part = multipart::Part::bytes(artifact.bytes.clone())
            .file_name(artifact.file_name.clone())
            .mime_str(&artifact.mime_type)
            .map_err(|_| InferenceError::UnsupportedMediaType(artifact.mime_type.clone()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| InferenceError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| InferenceError::Transport(err.to_string()))?;

        if !status.is_success() {
            log::warn!("inference request rejected with status {status}");
            return Err(InferenceError::Rejected {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        parse_prediction(&body)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Best-effort extraction of the `detail` field from an error body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .unwrap_or_else(|| "no detail provided".to_string())
}

fn parse_prediction(body: &str) -> Result<InferenceResult, InferenceError> {
    let result: InferenceResult = serde_json::from_str(body)
        .map_err(|err| InferenceError::MalformedResponse(err.to_string()))?;
    if !(0.0..=1.0).contains(&result.confidence) {
        return Err(InferenceError::MalformedResponse(format!(
            "confidence {} outside [0, 1]",
            result.confidence
        )));
    }
    Ok(result)
}

/// Reject payloads the service would refuse, before going on the wire.
fn validate_artifact(artifact: &ImageArtifact) -> Result<(), InferenceError> {
    if artifact.is_empty() {
        return Err(InferenceError::EmptyPayload);
    }
    if !ACCEPTED_MIME_TYPES.contains(&artifact.mime_type.as_str()) {
        return Err(InferenceError::UnsupportedMediaType(
            artifact.mime_type.clone(),
        ));
    }
    if artifact.len() > MAX_UPLOAD_MB as usize * 1024 * 1024 {
        return Err(InferenceError::PayloadTooLarge(MAX_UPLOAD_MB));
    }
    Ok(())
}
