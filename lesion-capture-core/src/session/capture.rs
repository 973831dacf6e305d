use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::models::artifact::{CaptureConstraints, ImageArtifact, RawFrame};
use crate::models::error::{CaptureError, DeviceError};
use crate::models::state::CaptureSessionState;
use crate::traits::delegate::ScreeningDelegate;
use crate::traits::frame_provider::FrameProvider;

/// JPEG quality used when freezing a frame.
const JPEG_QUALITY: u8 = 92;

/// Raster fallback when the provider cannot report true frame dimensions.
const FALLBACK_WIDTH: u32 = 1280;
const FALLBACK_HEIGHT: u32 = 720;

/// One continuous activation of a camera device, from request to teardown.
///
/// Owns the `FrameProvider` and is the sole owner of the device for its
/// lifetime. The device is released exactly once no matter how the session
/// ends: explicit `deactivate`, a successful capture torn down by the
/// controller, or being dropped.
///
/// Callers are responsible for suppressing concurrent `capture()` calls;
/// the session exposes `is_ready()` rather than queuing.
pub struct CaptureSession<P: FrameProvider> {
    provider: P,
    constraints: CaptureConstraints,
    state: CaptureSessionState,
    holds_device: bool,
    delegate: Option<Arc<dyn ScreeningDelegate>>,
}

impl<P: FrameProvider> CaptureSession<P> {
    pub fn new(provider: P) -> Self {
        Self::with_constraints(provider, CaptureConstraints::default())
    }

    pub fn with_constraints(provider: P, constraints: CaptureConstraints) -> Self {
        Self {
            provider,
            constraints,
            state: CaptureSessionState::Idle,
            holds_device: false,
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ScreeningDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> CaptureSessionState {
        self.state.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Negotiate device access. Transitions: idle → initializing → ready,
    /// or → error with a user-facing reason.
    pub fn activate(&mut self) -> Result<(), DeviceError> {
        if !self.state.is_idle() {
            return Err(DeviceError::InitFailed("session already active".into()));
        }

        self.set_state(CaptureSessionState::Initializing);

        match self.provider.open(&self.constraints) {
            Ok(handle) => {
                self.holds_device = true;
                self.set_state(CaptureSessionState::Ready(handle));
                Ok(())
            }
            Err(err) => {
                self.set_state(CaptureSessionState::Error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Freeze the current frame into an encoded artifact. Valid only from
    /// `Ready`.
    ///
    /// On sampling or encoding failure the session transitions to `Error`
    /// and the failure is re-raised, so the caller can clear its capturing
    /// indicator.
    pub fn capture(&mut self) -> Result<ImageArtifact, CaptureError> {
        if !self.state.is_ready() {
            return Err(CaptureError::NotReady);
        }

        let frame = match self.provider.sample_frame() {
            Ok(frame) => frame,
            Err(err) => {
                self.set_state(CaptureSessionState::Error(err.to_string()));
                return Err(err);
            }
        };

        let artifact = match encode_frame(&frame) {
            Ok(artifact) => artifact,
            Err(err) => {
                self.set_state(CaptureSessionState::Error(err.to_string()));
                return Err(err);
            }
        };

        if let Some(ref delegate) = self.delegate {
            delegate.on_frame_captured(&artifact);
        }
        Ok(artifact)
    }

    /// Stop every device track and return to `Idle`.
    ///
    /// Safe to call from any state and any number of times; the device is
    /// released exactly once.
    pub fn deactivate(&mut self) {
        if self.holds_device {
            self.provider.stop();
            self.holds_device = false;
        }
        if !self.state.is_idle() {
            self.set_state(CaptureSessionState::Idle);
        }
    }

    fn set_state(&mut self, state: CaptureSessionState) {
        self.state = state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_camera_state_changed(&self.state);
        }
    }
}

impl<P: FrameProvider> Drop for CaptureSession<P> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Encode an RGB8 frame as JPEG, falling back to the 1280x720 raster when
/// the provider reported no dimensions.
fn encode_frame(frame: &RawFrame) -> Result<ImageArtifact, CaptureError> {
    let (width, height) = if frame.width == 0 || frame.height == 0 {
        (FALLBACK_WIDTH, FALLBACK_HEIGHT)
    } else {
        (frame.width, frame.height)
    };

    let expected = width as usize * height as usize * 3;
    if frame.pixels.len() != expected {
        return Err(CaptureError::EncodingFailed(format!(
            "frame buffer holds {} bytes, expected {} for {}x{} RGB",
            frame.pixels.len(),
            expected,
            width,
            height
        )));
    }

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode(&frame.pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|err| CaptureError::EncodingFailed(err.to_string()))?;

    let file_name = format!("capture_{}.jpg", uuid::Uuid::new_v4());
    Ok(ImageArtifact::new(encoded, "image/jpeg", &file_name))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::models::artifact::DeviceHandle;

    struct FakeCamera {
        stops: Arc<AtomicUsize>,
        frame: Result<RawFrame, CaptureError>,
        open_result: Result<(), DeviceError>,
    }

    impl FakeCamera {
        fn new(frame: Result<RawFrame, CaptureError>) -> (Self, Arc<AtomicUsize>) {
            let stops = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    stops: Arc::clone(&stops),
                    frame,
                    open_result: Ok(()),
                },
                stops,
            )
        }

        fn denied() -> Self {
            Self {
                stops: Arc::new(AtomicUsize::new(0)),
                frame: Err(CaptureError::FrameUnavailable("unused".into())),
                open_result: Err(DeviceError::PermissionDenied),
            }
        }
    }

    impl FrameProvider for FakeCamera {
        fn is_available(&self) -> bool {
            true
        }

        fn open(&mut self, _constraints: &CaptureConstraints) -> Result<DeviceHandle, DeviceError> {
            self.open_result.clone()?;
            Ok(DeviceHandle {
                id: "cam0".into(),
                label: "Front camera".into(),
            })
        }

        fn sample_frame(&mut self) -> Result<RawFrame, CaptureError> {
            self.frame.clone()
        }

        fn stop(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn rgb_frame(width: u32, height: u32) -> RawFrame {
        RawFrame {
            width,
            height,
            pixels: vec![127; (width * height * 3) as usize],
        }
    }

    #[test]
    fn activate_reaches_ready() {
        let (camera, _) = FakeCamera::new(Ok(rgb_frame(4, 4)));
        let mut session = CaptureSession::new(camera);
        session.activate().unwrap();
        assert!(session.is_ready());
    }

    #[test]
    fn activation_failure_carries_reason() {
        let mut session = CaptureSession::new(FakeCamera::denied());
        let err = session.activate().unwrap_err();
        assert_eq!(err, DeviceError::PermissionDenied);
        assert_eq!(
            session.state(),
            CaptureSessionState::Error("camera permission denied".into())
        );
        // No device was acquired, so deactivating must not stop anything.
        session.deactivate();
        assert!(session.state().is_idle());
    }

    #[test]
    fn capture_requires_ready() {
        let (camera, _) = FakeCamera::new(Ok(rgb_frame(4, 4)));
        let mut session = CaptureSession::new(camera);
        assert_eq!(session.capture(), Err(CaptureError::NotReady));
    }

    #[test]
    fn capture_yields_jpeg_artifact() {
        let (camera, _) = FakeCamera::new(Ok(rgb_frame(8, 6)));
        let mut session = CaptureSession::new(camera);
        session.activate().unwrap();

        let artifact = session.capture().unwrap();
        assert_eq!(artifact.mime_type, "image/jpeg");
        assert!(artifact.file_name.starts_with("capture_"));
        // JPEG magic bytes.
        assert_eq!(&artifact.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn capture_falls_back_to_720p_raster() {
        let frame = RawFrame {
            width: 0,
            height: 0,
            pixels: vec![0; 1280 * 720 * 3],
        };
        let (camera, _) = FakeCamera::new(Ok(frame));
        let mut session = CaptureSession::new(camera);
        session.activate().unwrap();
        assert!(session.capture().is_ok());
    }

    #[test]
    fn capture_rejects_mismatched_buffer() {
        let frame = RawFrame {
            width: 4,
            height: 4,
            pixels: vec![0; 5],
        };
        let (camera, _) = FakeCamera::new(Ok(frame));
        let mut session = CaptureSession::new(camera);
        session.activate().unwrap();

        let err = session.capture().unwrap_err();
        assert!(matches!(err, CaptureError::EncodingFailed(_)));
        assert!(session.state().is_error());
    }

    #[test]
    fn sampling_failure_errors_session_and_reraises() {
        let (camera, stops) =
            FakeCamera::new(Err(CaptureError::FrameUnavailable("no drawable surface".into())));
        let mut session = CaptureSession::new(camera);
        session.activate().unwrap();

        let err = session.capture().unwrap_err();
        assert!(matches!(err, CaptureError::FrameUnavailable(_)));
        assert!(session.state().is_error());

        // The errored session still holds the device until torn down.
        session.deactivate();
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn double_deactivate_stops_tracks_once() {
        let (camera, stops) = FakeCamera::new(Ok(rgb_frame(4, 4)));
        let mut session = CaptureSession::new(camera);
        session.activate().unwrap();

        session.deactivate();
        session.deactivate();
        assert_eq!(stops.load(Ordering::SeqCst), 1);
        assert!(session.state().is_idle());
    }

    #[test]
    fn drop_after_deactivate_does_not_double_stop() {
        let (camera, stops) = FakeCamera::new(Ok(rgb_frame(4, 4)));
        {
            let mut session = CaptureSession::new(camera);
            session.activate().unwrap();
            session.deactivate();
        } // drop runs here
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_alone_releases_device() {
        let (camera, stops) = FakeCamera::new(Ok(rgb_frame(4, 4)));
        {
            let mut session = CaptureSession::new(camera);
            session.activate().unwrap();
        }
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }
}
