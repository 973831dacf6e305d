use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Immutable binary image payload: a user-picked file or a frozen camera
/// frame. Owned by the session controller once produced and superseded
/// whenever a new artifact is acquired.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArtifact {
    pub id: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl ImageArtifact {
    pub fn new(bytes: Vec<u8>, mime_type: &str, file_name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            bytes,
            mime_type: mime_type.to_string(),
            file_name: file_name.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// What a `PreviewHandle` renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    /// A still preview of the artifact with the given id.
    Artifact { artifact_id: String },
    /// The live camera feed of the active capture session.
    LiveFeed,
}

/// Short-lived, revocable reference used to render the current artifact or
/// the live feed. Exactly one handle is active at a time; a handle for a
/// stale artifact is released before its replacement is created.
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    id: String,
    source: PreviewSource,
    active: Arc<AtomicBool>,
}

impl PreviewHandle {
    pub fn for_artifact(artifact: &ImageArtifact) -> Self {
        Self::with_source(PreviewSource::Artifact {
            artifact_id: artifact.id.clone(),
        })
    }

    pub fn live_feed() -> Self {
        Self::with_source(PreviewSource::LiveFeed)
    }

    fn with_source(source: PreviewSource) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &PreviewSource {
        &self.source
    }

    pub fn is_live(&self) -> bool {
        matches!(self.source, PreviewSource::LiveFeed)
    }

    /// Whether the handle may still be used for rendering.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Revoke the handle. Idempotent; releasing twice is a no-op.
    pub fn release(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Camera facing requested when negotiating device access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    User,
    Environment,
}

/// Requested device parameters. Defaults to a front-facing device at
/// 1280x720 ideal resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
    pub facing: CameraFacing,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            facing: CameraFacing::User,
        }
    }
}

/// Descriptor of the device attached to a ready capture session.
///
/// Identification only: the underlying resource stays owned by the
/// `FrameProvider` that opened it and is never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub id: String,
    pub label: String,
}

/// One uncompressed RGB8 frame handed over by a `FrameProvider`.
///
/// `width`/`height` of zero means the provider could not report true
/// dimensions; the capture session then falls back to the constraint raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}
