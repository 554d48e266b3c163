use image::DynamicImage;
use std::fmt;
use thiserror::Error;

/// A single captured image, from a live camera or a submitted file.
#[derive(Clone)]
pub struct Frame(pub DynamicImage);

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({}x{})", self.0.width(), self.0.height())
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.0.width() == other.0.width()
            && self.0.height() == other.0.height()
            && self.0.as_bytes() == other.0.as_bytes()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceCameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no usable camera available")]
    Unavailable,
    #[error("{0}")]
    Other(String),
}

pub trait DeviceCamera {
    fn setup(&self) -> Result<(), DeviceCameraError>;
    fn capture(&self) -> Result<Frame, DeviceCameraError>;
    fn stop(&self) -> Result<(), DeviceCameraError>;
}
