use std::sync::Arc;

use crate::models::artifact::{ImageArtifact, PreviewHandle};

/// Which producer supplied the current artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionSource {
    None,
    Upload,
    Camera,
}

/// Unifies the two mutually exclusive image sources into one canonical
/// artifact plus the single renderable preview handle.
///
/// Invariant: at most one of uploaded-file preview and live-camera preview
/// is renderable at any instant, and a handle for a stale artifact is
/// released before its replacement exists.
#[derive(Debug, Default)]
pub struct AcquisitionSelector {
    artifact: Option<Arc<ImageArtifact>>,
    preview: Option<PreviewHandle>,
    source: AcquisitionSource,
}

impl Default for AcquisitionSource {
    fn default() -> Self {
        Self::None
    }
}

impl AcquisitionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact(&self) -> Option<&Arc<ImageArtifact>> {
        self.artifact.as_ref()
    }

    pub fn has_artifact(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn source(&self) -> AcquisitionSource {
        self.source
    }

    /// Install a picked file as the canonical artifact.
    pub fn select_file(&mut self, artifact: ImageArtifact) -> Arc<ImageArtifact> {
        self.install(artifact, AcquisitionSource::Upload)
    }

    /// Install a frozen camera frame as the canonical artifact.
    pub fn receive_capture(&mut self, artifact: ImageArtifact) -> Arc<ImageArtifact> {
        self.install(artifact, AcquisitionSource::Camera)
    }

    /// Swap the preview to the live camera feed, releasing any artifact
    /// preview. The canonical artifact itself is untouched.
    pub fn show_live_preview(&mut self) {
        self.release_preview();
        self.preview = Some(PreviewHandle::live_feed());
    }

    /// Release the live-feed preview if it is the one showing.
    pub fn clear_live_preview(&mut self) {
        if self.preview.as_ref().is_some_and(|p| p.is_live()) {
            self.release_preview();
        }
    }

    /// Clear the canonical artifact and release the preview.
    pub fn reset(&mut self) {
        self.release_preview();
        self.artifact = None;
        self.source = AcquisitionSource::None;
    }

    fn install(
        &mut self,
        artifact: ImageArtifact,
        source: AcquisitionSource,
    ) -> Arc<ImageArtifact> {
        self.release_preview();
        let artifact = Arc::new(artifact);
        self.preview = Some(PreviewHandle::for_artifact(&artifact));
        self.artifact = Some(Arc::clone(&artifact));
        self.source = source;
        artifact
    }

    fn release_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            preview.release();
        }
    }
}
