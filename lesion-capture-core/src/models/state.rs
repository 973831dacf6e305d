use super::artifact::DeviceHandle;

/// Camera session state machine.
///
/// State transitions:
/// ```text
/// idle → initializing → ready → (deactivate) → idle
///              ↓           ↓
///            error ←── capture failure
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSessionState {
    Idle,
    Initializing,
    Ready(DeviceHandle),
    Error(String),
}

impl CaptureSessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Descriptor of the attached device, if the session is ready.
    pub fn device(&self) -> Option<&DeviceHandle> {
        match self {
            Self::Ready(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Screening session phase machine, owned by the controller.
///
/// ```text
/// empty → acquired → inferring → inferred → recommendation_pending → recommended
///                        ↓
///                 inference_failed
/// ```
///
/// Any phase returns to `Empty` on reset, or to `Acquired` on a new
/// acquisition. There is no terminal phase; the machine supports unbounded
/// re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Acquired,
    Inferring,
    Inferred,
    RecommendationPending,
    Recommended,
    InferenceFailed,
}

impl SessionPhase {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn has_artifact(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Whether an asynchronous stage is currently in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Inferring | Self::RecommendationPending)
    }

    /// Whether an inference result is currently displayable.
    pub fn has_inference_result(&self) -> bool {
        matches!(
            self,
            Self::Inferred | Self::RecommendationPending | Self::Recommended
        )
    }
}
