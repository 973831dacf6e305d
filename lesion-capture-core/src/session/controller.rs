use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::artifact::{ImageArtifact, PreviewHandle};
use crate::models::error::{CaptureError, DeviceError, InferenceError, RecommendationError};
use crate::models::inference::{InferenceResult, RecommendationResult};
use crate::models::state::{CaptureSessionState, SessionPhase};
use crate::session::capture::CaptureSession;
use crate::session::selector::{AcquisitionSelector, AcquisitionSource};
use crate::stages::inference::InferenceStage;
use crate::stages::recommendation::RecommendationStage;
use crate::stages::Stage;
use crate::traits::clients::{InferenceClient, RecommendationClient};
use crate::traits::delegate::ScreeningDelegate;
use crate::traits::frame_provider::FrameProvider;

/// Counters for debugging screening sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionDiagnostics {
    pub captures_taken: u64,
    pub inferences_run: u64,
    pub recommendations_run: u64,
    pub stale_results_discarded: u64,
}

/// Internal mutable controller state, protected by `parking_lot::Mutex`.
struct ControllerState {
    phase: SessionPhase,
    selector: AcquisitionSelector,
    inference: InferenceStage,
    recommendation: RecommendationStage,
    /// Bumped on every new acquisition or reset. Async completions capture
    /// the generation before awaiting and discard themselves on mismatch.
    generation: u64,
    diagnostics: SessionDiagnostics,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            phase: SessionPhase::Empty,
            selector: AcquisitionSelector::new(),
            inference: InferenceStage::new(),
            recommendation: RecommendationStage::new(),
            generation: 0,
            diagnostics: SessionDiagnostics::default(),
        }
    }

    /// Discard everything downstream of the acquisition selector and start
    /// a new generation.
    fn invalidate_downstream(&mut self) {
        self.generation += 1;
        self.inference.clear();
        self.recommendation.clear();
    }
}

/// Top-level coordinator for the screening lifecycle.
///
/// Owns the acquisition selector, both stages, and the optional camera
/// session; defines the legal phase transitions
/// (select → infer → recommend → reset) and enforces that a new acquisition
/// invalidates all downstream results.
///
/// All mutation happens under short-lived locks that are never held across
/// an await; stale async continuations are invalidated by comparing their
/// captured generation before committing.
pub struct ScreeningController<P: FrameProvider> {
    state: Mutex<ControllerState>,
    camera: Mutex<Option<CaptureSession<P>>>,
    inference_client: Arc<dyn InferenceClient>,
    recommendation_client: Arc<dyn RecommendationClient>,
    delegate: Option<Arc<dyn ScreeningDelegate>>,
}

impl<P: FrameProvider> ScreeningController<P> {
    pub fn new(
        inference_client: Arc<dyn InferenceClient>,
        recommendation_client: Arc<dyn RecommendationClient>,
    ) -> Self {
        Self {
            state: Mutex::new(ControllerState::new()),
            camera: Mutex::new(None),
            inference_client,
            recommendation_client,
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ScreeningDelegate>) {
        self.delegate = Some(delegate);
    }

    // --- Read-only snapshots ---

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase
    }

    pub fn current_artifact(&self) -> Option<Arc<ImageArtifact>> {
        self.state.lock().selector.artifact().cloned()
    }

    pub fn acquisition_source(&self) -> AcquisitionSource {
        self.state.lock().selector.source()
    }

    pub fn preview(&self) -> Option<PreviewHandle> {
        self.state.lock().selector.preview().cloned()
    }

    pub fn inference_state(&self) -> Stage<InferenceResult, InferenceError> {
        self.state.lock().inference.state().clone()
    }

    pub fn recommendation_state(&self) -> Stage<RecommendationResult, RecommendationError> {
        self.state.lock().recommendation.state().clone()
    }

    pub fn camera_state(&self) -> CaptureSessionState {
        self.camera
            .lock()
            .as_ref()
            .map(|session| session.state())
            .unwrap_or(CaptureSessionState::Idle)
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.state.lock().diagnostics
    }

    // --- Acquisition ---

    /// Install a user-picked file as the canonical artifact. Deactivates an
    /// active camera session and invalidates all downstream results.
    pub fn select_file(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Arc<ImageArtifact> {
        self.deactivate_camera();
        let artifact = ImageArtifact::new(bytes, mime_type, file_name);
        self.begin_acquisition(artifact, AcquisitionSource::Upload)
    }

    /// Open a camera session on the given provider, deactivating any prior
    /// session first so no two sessions ever hold the device.
    pub fn open_camera(&self, provider: P) -> Result<(), DeviceError> {
        self.deactivate_camera();

        let mut session = CaptureSession::new(provider);
        if let Some(ref delegate) = self.delegate {
            session.set_delegate(Arc::clone(delegate));
        }

        match session.activate() {
            Ok(()) => {
                *self.camera.lock() = Some(session);
                self.state.lock().selector.show_live_preview();
                Ok(())
            }
            Err(err) => {
                log::warn!("camera activation failed: {err}");
                self.notify_error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Cancel the camera without capturing. Stops the device and releases
    /// the live preview.
    pub fn cancel_camera(&self) {
        self.deactivate_camera();
        self.state.lock().selector.clear_live_preview();
    }

    /// Freeze one frame from the active camera session.
    ///
    /// On success the session is torn down and the frame becomes the
    /// canonical artifact. On failure the error is re-raised so the caller
    /// can clear its capturing indicator; the errored session keeps the
    /// device until the next open, cancel, or reset.
    pub fn capture_frame(&self) -> Result<Arc<ImageArtifact>, CaptureError> {
        let artifact = {
            let mut camera = self.camera.lock();
            let session = camera.as_mut().ok_or(CaptureError::NotReady)?;
            session.capture()?
        };

        self.deactivate_camera();
        self.state.lock().diagnostics.captures_taken += 1;
        Ok(self.begin_acquisition(artifact, AcquisitionSource::Camera))
    }

    /// Return to `Empty` from any phase: no artifact, no camera device, no
    /// preview handle, no stage state. Idempotent.
    pub fn reset(&self) {
        self.deactivate_camera();
        {
            let mut state = self.state.lock();
            state.invalidate_downstream();
            state.selector.reset();
            state.phase = SessionPhase::Empty;
        }
        self.notify_phase(SessionPhase::Empty);
    }

    // --- Stages ---

    /// Submit the canonical artifact to the inference collaborator.
    ///
    /// On success the recommendation stage is chained automatically; its
    /// failure never rolls back the inference result. A completion whose
    /// acquisition was superseded while the call was in flight is discarded
    /// and reported as `InferenceError::Superseded`.
    pub async fn run_inference(&self) -> Result<InferenceResult, InferenceError> {
        let (artifact, generation) = {
            let mut state = self.state.lock();
            let artifact = state
                .selector
                .artifact()
                .cloned()
                .ok_or(InferenceError::NoArtifact)?;
            state.inference.begin()?;
            state.diagnostics.inferences_run += 1;
            state.phase = SessionPhase::Inferring;
            (artifact, state.generation)
        };
        self.notify_phase(SessionPhase::Inferring);

        let outcome = self.inference_client.predict(&artifact).await;

        let result = match outcome {
            Ok(result) => {
                let mut state = self.state.lock();
                if state.generation != generation {
                    return self.discard_stale(state, "inference result");
                }
                state.inference.complete(result.clone());
                state.phase = SessionPhase::Inferred;
                result
            }
            Err(err) => {
                {
                    let mut state = self.state.lock();
                    if state.generation != generation {
                        return self.discard_stale(state, "inference failure");
                    }
                    state.inference.fail(err.clone());
                    state.phase = SessionPhase::InferenceFailed;
                }
                self.notify_phase(SessionPhase::InferenceFailed);
                self.notify_error(&err.to_string());
                return Err(err);
            }
        };

        self.notify_phase(SessionPhase::Inferred);
        if let Some(ref delegate) = self.delegate {
            delegate.on_inference_completed(&result);
        }

        self.run_recommendation(&result, generation).await;
        Ok(result)
    }

    /// Chained recommendation stage. Failures are stored locally; the phase
    /// falls back to `Inferred` so the inference result stays displayed.
    async fn run_recommendation(&self, result: &InferenceResult, generation: u64) {
        {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            state.recommendation.begin();
            state.diagnostics.recommendations_run += 1;
            state.phase = SessionPhase::RecommendationPending;
        }
        self.notify_phase(SessionPhase::RecommendationPending);

        let outcome = self
            .recommendation_client
            .recommend(&result.label, result.confidence)
            .await;

        {
            let mut state = self.state.lock();
            if state.generation != generation {
                state.diagnostics.stale_results_discarded += 1;
                log::debug!("discarding recommendation for superseded acquisition");
                return;
            }
            match outcome {
                Ok(recommendation) => {
                    state.recommendation.complete(recommendation.clone());
                    state.phase = SessionPhase::Recommended;
                    drop(state);
                    self.notify_phase(SessionPhase::Recommended);
                    if let Some(ref delegate) = self.delegate {
                        delegate.on_recommendation_ready(&recommendation);
                    }
                }
                Err(err) => {
                    state.recommendation.fail(err.clone());
                    state.phase = SessionPhase::Inferred;
                    drop(state);
                    self.notify_phase(SessionPhase::Inferred);
                    self.notify_error(&err.to_string());
                }
            }
        }
    }

    // --- Internal helpers ---

    /// Install a new canonical artifact, discarding all downstream state.
    fn begin_acquisition(
        &self,
        artifact: ImageArtifact,
        source: AcquisitionSource,
    ) -> Arc<ImageArtifact> {
        let artifact = {
            let mut state = self.state.lock();
            state.invalidate_downstream();
            let artifact = match source {
                AcquisitionSource::Camera => state.selector.receive_capture(artifact),
                _ => state.selector.select_file(artifact),
            };
            state.phase = SessionPhase::Acquired;
            artifact
        };
        self.notify_phase(SessionPhase::Acquired);
        artifact
    }

    fn deactivate_camera(&self) {
        if let Some(mut session) = self.camera.lock().take() {
            session.deactivate();
        }
    }

    fn discard_stale(
        &self,
        mut state: parking_lot::MutexGuard<'_, ControllerState>,
        what: &str,
    ) -> Result<InferenceResult, InferenceError> {
        state.diagnostics.stale_results_discarded += 1;
        log::debug!("discarding {what} for superseded acquisition");
        Err(InferenceError::Superseded)
    }

    fn notify_phase(&self, phase: SessionPhase) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_phase_changed(&phase);
        }
    }

    fn notify_error(&self, message: &str) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_stage_error(message);
        }
    }
}
