use crate::device_camera::interface::{DeviceCamera, DeviceCameraError, Frame};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    captured: AtomicUsize,
    setup_failure: Option<DeviceCameraError>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            captured: AtomicUsize::new(0),
            setup_failure: None,
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }

    /// A camera whose setup always fails with the given error.
    #[cfg(test)]
    pub fn failing(
        logger: Arc<dyn Logger + Send + Sync>,
        failure: DeviceCameraError,
    ) -> Self {
        Self {
            captured: AtomicUsize::new(0),
            setup_failure: Some(failure),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn setup(&self) -> Result<(), DeviceCameraError> {
        let _ = self.logger.info("Starting camera...");
        if let Some(failure) = &self.setup_failure {
            return Err(failure.clone());
        }
        let _ = self.logger.info("Camera started");
        Ok(())
    }

    fn capture(&self) -> Result<Frame, DeviceCameraError> {
        let count = self.captured.fetch_add(1, Ordering::SeqCst);
        // Cycle the red channel so consecutive frames are distinguishable.
        let shade = (count % 256) as u8;
        let image = ImageBuffer::from_pixel(64, 64, Rgb([shade, 128, 64]));
        let _ = self.logger.info(&format!("Captured frame {}", count));
        Ok(Frame(DynamicImage::ImageRgb8(image)))
    }

    fn stop(&self) -> Result<(), DeviceCameraError> {
        let _ = self.logger.info("Camera stopped");
        Ok(())
    }
}
