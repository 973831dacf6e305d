use crate::models::artifact::ImageArtifact;
use crate::models::inference::{InferenceResult, RecommendationResult};
use crate::models::state::{CaptureSessionState, SessionPhase};

/// Event delegate for screening session notifications.
///
/// Implemented by the embedding UI layer. Callbacks fire synchronously from
/// controller operations; implementations should marshal to their own event
/// loop if needed and must not call back into the controller.
pub trait ScreeningDelegate: Send + Sync {
    /// Called when the session phase changes.
    fn on_phase_changed(&self, phase: &SessionPhase);

    /// Called when the camera session state changes.
    fn on_camera_state_changed(&self, state: &CaptureSessionState);

    /// Called when a frame has been frozen into an artifact.
    fn on_frame_captured(&self, artifact: &ImageArtifact);

    /// Called when inference completes successfully.
    fn on_inference_completed(&self, result: &InferenceResult);

    /// Called when recommendation text is available.
    fn on_recommendation_ready(&self, recommendation: &RecommendationResult);

    /// Called when a stage fails with a user-facing message.
    fn on_stage_error(&self, message: &str);
}
