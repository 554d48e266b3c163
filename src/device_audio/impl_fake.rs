use crate::device_audio::interface::DeviceAudio;
use crate::library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub struct DeviceAudioFake {
    played: Mutex<Vec<PathBuf>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceAudioFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            played: Mutex::new(vec![]),
            logger: logger.with_namespace("audio").with_namespace("fake"),
        }
    }

    /// Every cue played so far, oldest first.
    pub fn played(&self) -> Vec<PathBuf> {
        self.played.lock().unwrap().clone()
    }
}

impl DeviceAudio for DeviceAudioFake {
    fn play(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Playing {}", path.display()))?;
        self.played.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
