//! # lesion-capture-core
//!
//! Platform-agnostic core for the lesion screening front end.
//!
//! Owns the camera capture session, the acquisition selector, the inference
//! and recommendation stages, and the session controller that keeps all of
//! them consistent under rapid user-driven cancellation. Camera hardware is
//! abstracted behind the `FrameProvider` trait; the remote inference and
//! recommendation services behind the `InferenceClient` / `RecommendationClient`
//! async traits, implemented by the `lesion-capture-http` crate.
//!
//! ## Architecture
//!
//! ```text
//! lesion-capture-core (this crate)
//! ├── traits/       ← FrameProvider, InferenceClient, RecommendationClient, ScreeningDelegate
//! ├── models/       ← ImageArtifact, PreviewHandle, session states, results, errors
//! ├── stages/       ← Stage slot, InferenceStage, RecommendationStage
//! └── session/      ← CaptureSession, AcquisitionSelector, ScreeningController
//! ```

pub mod models;
pub mod session;
pub mod stages;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::artifact::{CameraFacing, CaptureConstraints, DeviceHandle, ImageArtifact, PreviewHandle, PreviewSource, RawFrame};
pub use models::error::{CaptureError, DeviceError, InferenceError, RecommendationError};
pub use models::inference::{ConfidenceBand, InferenceResult, RecommendationResult, Severity};
pub use models::state::{CaptureSessionState, SessionPhase};
pub use session::capture::CaptureSession;
pub use session::controller::{ScreeningController, SessionDiagnostics};
pub use session::selector::{AcquisitionSelector, AcquisitionSource};
pub use stages::Stage;
pub use traits::clients::{InferenceClient, RecommendationClient};
pub use traits::delegate::ScreeningDelegate;
pub use traits::frame_provider::FrameProvider;
