use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lesion_capture_core::{RecommendationClient, RecommendationError, RecommendationResult};

use crate::config::{ConfigError, ServiceConfig};

/// Client for the recommendation service's `POST /recommendations` endpoint.
///
/// Posts `{label, confidence}` and stores the returned text verbatim. The
/// service holds the upstream text-generation credential; its absence is a
/// misconfiguration signalled as 503 with a credential detail, distinct from
/// transient failures.
pub struct HttpRecommendationClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecommendationClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ConfigError::ClientBuild(err.to_string()))?;
        Ok(Self {
            base_url: config.recommendation_base_url.clone(),
            client,
        })
    }
}

#[derive(Serialize)]
struct RecommendationRequest<'a> {
    label: &'a str,
    confidence: f32,
}

#[derive(Deserialize)]
struct RecommendationResponse {
    recommendations: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[async_trait]
impl RecommendationClient for HttpRecommendationClient {
    async fn recommend(
        &self,
        label: &str,
        confidence: f32,
    ) -> Result<RecommendationResult, RecommendationError> {
        if label.trim().is_empty() || !(0.0..=1.0).contains(&confidence) {
            return Err(RecommendationError::InvalidRequest);
        }

        let response = self
            .client
            .post(format!("{}/recommendations", self.base_url))
            .json(&RecommendationRequest { label, confidence })
            .send()
            .await
            .map_err(|err| {
                log::warn!("recommendation request failed in transport: {err}");
                RecommendationError::Unavailable
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|_| RecommendationError::Unavailable)?;

        if !(200..300).contains(&status) {
            return Err(classify_failure(status, error_detail(&body)));
        }

        parse_recommendation(&body)
    }
}

fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
}

/// Map a non-2xx response onto the stage's failure taxonomy.
fn classify_failure(status: u16, detail: Option<String>) -> RecommendationError {
    let mentions_credentials = detail
        .as_deref()
        .map(|text| text.to_ascii_lowercase().contains("credential"))
        .unwrap_or(false);

    match status {
        503 if mentions_credentials => RecommendationError::CredentialsMissing,
        400 | 422 => RecommendationError::InvalidRequest,
        _ => RecommendationError::UpstreamRejected {
            detail: detail.unwrap_or_else(|| format!("status {status}")),
        },
    }
}

fn parse_recommendation(body: &str) -> Result<RecommendationResult, RecommendationError> {
    let parsed: RecommendationResponse =
        serde_json::from_str(body).map_err(|_| RecommendationError::UpstreamRejected {
            detail: "unparseable response body".into(),
        })?;
    match parsed.recommendations {
        Some(text) => Ok(RecommendationResult { text }),
        None => Err(RecommendationError::UpstreamRejected {
            detail: "response missing recommendation text".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_misconfiguration_is_distinct() {
        let err = classify_failure(
            503,
            Some("upstream credentials not configured".into()),
        );
        assert_eq!(err, RecommendationError::CredentialsMissing);

        // A 503 without the credential marker is an ordinary rejection.
        let err = classify_failure(503, Some("overloaded".into()));
        assert_eq!(
            err,
            RecommendationError::UpstreamRejected {
                detail: "overloaded".into()
            }
        );
    }

    #[test]
    fn bad_request_statuses_map_to_invalid_request() {
        assert_eq!(classify_failure(400, None), RecommendationError::InvalidRequest);
        assert_eq!(
            classify_failure(422, Some("missing label".into())),
            RecommendationError::InvalidRequest
        );
    }

    #[test]
    fn other_failures_propagate_upstream_detail() {
        let err = classify_failure(500, Some("boom".into()));
        assert_eq!(
            err.to_string(),
            "upstream service rejected the request: boom"
        );

        let err = classify_failure(500, None);
        assert_eq!(
            err,
            RecommendationError::UpstreamRejected {
                detail: "status 500".into()
            }
        );
    }

    #[test]
    fn stores_recommendation_text_verbatim() {
        let result =
            parse_recommendation(r#"{"recommendations":"  Monitor the lesion.\n"}"#).unwrap();
        assert_eq!(result.text, "  Monitor the lesion.\n");
    }

    #[test]
    fn success_without_text_field_is_a_failure() {
        let err = parse_recommendation(r#"{}"#).unwrap_err();
        assert_eq!(
            err,
            RecommendationError::UpstreamRejected {
                detail: "response missing recommendation text".into()
            }
        );
    }
}
