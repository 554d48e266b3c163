use crate::device_audio::interface::DeviceAudio;
use crate::library::logger::interface::Logger;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Plays a cue file on the default output device. The stream is opened
/// per call so the device stays shareable across worker threads.
pub struct DeviceAudioRodio {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceAudioRodio {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("audio").with_namespace("rodio"),
        }
    }
}

impl DeviceAudio for DeviceAudioRodio {
    fn play(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Playing {}", path.display()))?;

        let bytes = std::fs::read(path)?;
        let stream = rodio::OutputStreamBuilder::open_default_stream()?;
        let sink = rodio::Sink::connect_new(stream.mixer());
        sink.append(rodio::Decoder::new(Cursor::new(bytes))?);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::library::logger::impl_console::LoggerConsole;

    #[test]
    fn test_missing_file_is_an_error() {
        let logger = Arc::new(LoggerConsole::new(Config::default().logger_timezone));
        let audio = DeviceAudioRodio::new(logger);
        assert!(audio
            .play(Path::new("/no/such/vision-chat-cue.wav"))
            .is_err());
    }
}
