use super::Stage;
use crate::models::error::InferenceError;
use crate::models::inference::InferenceResult;

/// State holder for the inference stage.
///
/// The controller drives the async call; this type guards the begin/commit
/// discipline: at most one call in flight, re-invocation while pending is a
/// caller error rather than being coalesced.
#[derive(Debug)]
pub struct InferenceStage {
    slot: Stage<InferenceResult, InferenceError>,
}

impl InferenceStage {
    pub fn new() -> Self {
        Self { slot: Stage::Idle }
    }

    pub fn state(&self) -> &Stage<InferenceResult, InferenceError> {
        &self.slot
    }

    pub fn result(&self) -> Option<&InferenceResult> {
        self.slot.result()
    }

    /// Mark the stage pending. Fails when a call is already in flight.
    pub fn begin(&mut self) -> Result<(), InferenceError> {
        if self.slot.is_pending() {
            return Err(InferenceError::AlreadyRunning);
        }
        self.slot = Stage::Pending;
        Ok(())
    }

    pub fn complete(&mut self, result: InferenceResult) {
        self.slot = Stage::Complete(result);
    }

    pub fn fail(&mut self, error: InferenceError) {
        self.slot = Stage::Failed(error);
    }

    /// Discard any result, error, or in-flight marker.
    pub fn clear(&mut self) {
        self.slot = Stage::Idle;
    }
}

impl Default for InferenceStage {
    fn default() -> Self {
        Self::new()
    }
}
