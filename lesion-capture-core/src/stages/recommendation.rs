use super::Stage;
use crate::models::error::RecommendationError;
use crate::models::inference::RecommendationResult;

/// State holder for the recommendation stage.
///
/// Only ever started by a successful inference; its failure is local and
/// never touches the inference result.
#[derive(Debug)]
pub struct RecommendationStage {
    slot: Stage<RecommendationResult, RecommendationError>,
}

impl RecommendationStage {
    pub fn new() -> Self {
        Self { slot: Stage::Idle }
    }

    pub fn state(&self) -> &Stage<RecommendationResult, RecommendationError> {
        &self.slot
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        self.slot.result()
    }

    pub fn begin(&mut self) {
        self.slot = Stage::Pending;
    }

    pub fn complete(&mut self, result: RecommendationResult) {
        self.slot = Stage::Complete(result);
    }

    pub fn fail(&mut self, error: RecommendationError) {
        self.slot = Stage::Failed(error);
    }

    pub fn clear(&mut self) {
        self.slot = Stage::Idle;
    }
}

impl Default for RecommendationStage {
    fn default() -> Self {
        Self::new()
    }
}
