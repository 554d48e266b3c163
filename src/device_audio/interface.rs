use std::path::Path;

pub trait DeviceAudio {
    fn play(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
