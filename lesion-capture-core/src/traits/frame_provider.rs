use crate::models::artifact::{CaptureConstraints, DeviceHandle, RawFrame};
use crate::models::error::{CaptureError, DeviceError};

/// Interface for platform camera backends.
///
/// The provider owns the underlying device resource for the lifetime of one
/// open/stop cycle; the capture session only ever sees the `DeviceHandle`
/// descriptor. Implemented by platform crates and by test doubles.
pub trait FrameProvider: Send {
    /// Whether a suitable device is currently present.
    fn is_available(&self) -> bool;

    /// Negotiate device access for the given constraints and start the live
    /// feed. Returns a descriptor of the attached device.
    fn open(&mut self, constraints: &CaptureConstraints) -> Result<DeviceHandle, DeviceError>;

    /// Synchronously sample the current frame of the live feed.
    ///
    /// Only meaningful between `open` and `stop`. A provider that cannot
    /// report true frame dimensions may return zero width/height along with
    /// a raster sized to the open constraints.
    fn sample_frame(&mut self) -> Result<RawFrame, CaptureError>;

    /// Stop every device track and release the device.
    ///
    /// The owning session calls this exactly once per successful `open`.
    fn stop(&mut self);
}
