use crate::device_camera::interface::{DeviceCamera, DeviceCameraError, Frame};
use crate::library::logger::interface::Logger;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const IMAGE_EXTENSIONS: [&str; 6] = ["bmp", "gif", "jpeg", "jpg", "png", "webp"];

/// Serves the image files of a directory in round-robin order as live
/// frames. Stands in for camera hardware during development.
pub struct DeviceCameraFolder {
    dir: PathBuf,
    files: Mutex<Vec<PathBuf>>,
    cursor: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFolder {
    pub fn new(dir: PathBuf, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            dir,
            files: Mutex::new(vec![]),
            cursor: AtomicUsize::new(0),
            logger: logger.with_namespace("camera").with_namespace("folder"),
        }
    }
}

impl DeviceCamera for DeviceCameraFolder {
    fn setup(&self) -> Result<(), DeviceCameraError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|error| match error.kind() {
            io::ErrorKind::PermissionDenied => DeviceCameraError::PermissionDenied,
            io::ErrorKind::NotFound => DeviceCameraError::Unavailable,
            _ => DeviceCameraError::Other(error.to_string()),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|extension| extension.to_str())
                    .map(|extension| {
                        IMAGE_EXTENSIONS.contains(&extension.to_lowercase().as_str())
                    })
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(DeviceCameraError::Unavailable);
        }

        let _ = self
            .logger
            .info(&format!("Serving {} frames from {}", files.len(), self.dir.display()));
        *self.files.lock().unwrap() = files;
        Ok(())
    }

    fn capture(&self) -> Result<Frame, DeviceCameraError> {
        let files = self.files.lock().unwrap();
        if files.is_empty() {
            return Err(DeviceCameraError::Other("camera is not started".to_string()));
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst) % files.len();
        let path = &files[index];
        let image = image::open(path)
            .map_err(|error| DeviceCameraError::Other(error.to_string()))?;
        Ok(Frame(image))
    }

    fn stop(&self) -> Result<(), DeviceCameraError> {
        self.files.lock().unwrap().clear();
        let _ = self.logger.info("Camera stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(Config::default().logger_timezone))
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vision-chat-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_image(dir: &PathBuf, name: &str, shade: u8) {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([shade, 0, 0])));
        image.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let camera = DeviceCameraFolder::new(
            std::env::temp_dir().join("vision-chat-no-such-dir"),
            logger(),
        );
        assert_eq!(camera.setup(), Err(DeviceCameraError::Unavailable));
    }

    #[test]
    fn test_empty_directory_is_unavailable() {
        let dir = temp_dir("empty-camera");
        let camera = DeviceCameraFolder::new(dir.clone(), logger());
        assert_eq!(camera.setup(), Err(DeviceCameraError::Unavailable));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_capture_cycles_through_files() {
        let dir = temp_dir("camera");
        write_image(&dir, "a.png", 10);
        write_image(&dir, "b.png", 200);

        let camera = DeviceCameraFolder::new(dir.clone(), logger());
        camera.setup().unwrap();

        let first = camera.capture().unwrap();
        let second = camera.capture().unwrap();
        let third = camera.capture().unwrap();

        assert_eq!(first.0.width(), 4);
        assert_ne!(first, second);
        assert_eq!(first, third);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_capture_before_setup_fails() {
        let camera = DeviceCameraFolder::new(std::env::temp_dir(), logger());
        assert!(matches!(camera.capture(), Err(DeviceCameraError::Other(_))));
    }
}
