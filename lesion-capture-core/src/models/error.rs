use thiserror::Error;

/// Camera device negotiation failures.
///
/// Surfaced inline in the capture UI; recoverable by retrying activation or
/// falling back to file upload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device available")]
    DeviceNotAvailable,

    #[error("camera initialisation failed: {0}")]
    InitFailed(String),
}

/// Frame sampling or encoding failures raised by `capture()`.
///
/// The caller must clear any capturing indicator regardless of the variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("capture session is not ready")]
    NotReady,

    #[error("frame sampling failed: {0}")]
    FrameUnavailable(String),

    #[error("frame encoding failed: {0}")]
    EncodingFailed(String),
}

/// Inference stage failures. All are recoverable by re-running inference on
/// the same or a new artifact; no automatic retry is attempted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InferenceError {
    #[error("no image selected")]
    NoArtifact,

    #[error("inference already in progress")]
    AlreadyRunning,

    #[error("superseded by a newer acquisition")]
    Superseded,

    #[error("image payload is empty")]
    EmptyPayload,

    #[error("unsupported image type: {0}")]
    UnsupportedMediaType(String),

    #[error("image exceeds the {0} MB upload limit")]
    PayloadTooLarge(u32),

    #[error("inference service unreachable: {0}")]
    Transport(String),

    #[error("inference service error ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}

/// Recommendation stage failures, surfaced only to the recommendation panel.
/// A failure here never invalidates the inference result already shown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendationError {
    /// The service's upstream text-generation credential is not configured.
    /// A hard misconfiguration, not a transient failure.
    #[error("recommendation service credentials missing")]
    CredentialsMissing,

    #[error("invalid request")]
    InvalidRequest,

    #[error("upstream service rejected the request: {detail}")]
    UpstreamRejected { detail: String },

    #[error("service unavailable")]
    Unavailable,
}
