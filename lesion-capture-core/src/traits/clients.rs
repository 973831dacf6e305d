use async_trait::async_trait;

use crate::models::artifact::ImageArtifact;
use crate::models::error::{InferenceError, RecommendationError};
use crate::models::inference::{InferenceResult, RecommendationResult};

/// Client for the remote inference collaborator (`POST /predict`).
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Submit one artifact for classification.
    async fn predict(&self, artifact: &ImageArtifact) -> Result<InferenceResult, InferenceError>;
}

/// Client for the remote text-recommendation collaborator
/// (`POST /recommendations`).
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Request guidance text for a label/confidence pair.
    async fn recommend(
        &self,
        label: &str,
        confidence: f32,
    ) -> Result<RecommendationResult, RecommendationError>;
}
