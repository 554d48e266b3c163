use crate::assistant::main::Assistant;
use crate::config::Config;
use crate::device_audio::impl_fake::DeviceAudioFake;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::device_speech::impl_fake::DeviceSpeechFake;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// An assistant wired to fakes, with every device kept concrete so
/// tests can inspect what was spoken, played, and displayed.
#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<DeviceCameraFake>,
    pub device_speech: Arc<DeviceSpeechFake>,
    pub device_audio: Arc<DeviceAudioFake>,
    pub device_display: Arc<Mutex<DeviceDisplayFake>>,
    pub image_classifier: Arc<ImageClassifierFake>,
    pub assistant: Assistant,
}

impl Fixture {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_devices(Config::default(), None, None)
    }

    #[allow(dead_code)]
    pub fn with_config(config: Config) -> Self {
        Self::with_devices(config, None, None)
    }

    #[allow(dead_code)]
    pub fn with_devices(
        config: Config,
        device_camera: Option<DeviceCameraFake>,
        image_classifier: Option<ImageClassifierFake>,
    ) -> Self {
        let logger = test_logger(&config);
        let device_camera =
            Arc::new(device_camera.unwrap_or_else(|| DeviceCameraFake::new(logger.clone())));
        let device_speech = Arc::new(DeviceSpeechFake::new(logger.clone()));
        let device_audio = Arc::new(DeviceAudioFake::new(logger.clone()));
        let device_display = Arc::new(Mutex::new(DeviceDisplayFake::new(logger.clone())));
        let image_classifier =
            Arc::new(image_classifier.unwrap_or_else(|| ImageClassifierFake::new(logger.clone())));
        let assistant = Assistant::new(
            config.clone(),
            logger.clone(),
            device_camera.clone(),
            device_speech.clone(),
            device_audio.clone(),
            device_display.clone(),
            image_classifier.clone(),
        );

        Self {
            config,
            logger,
            device_camera,
            device_speech,
            device_audio,
            device_display,
            image_classifier,
            assistant,
        }
    }

    /// Runs the assistant event loop on a background thread for the
    /// remainder of the test process.
    #[allow(dead_code)]
    pub fn start(&self) {
        let assistant = self.assistant.clone();
        std::thread::spawn(move || {
            let _ = assistant.run();
        });
    }
}

#[allow(dead_code)]
pub fn test_logger(config: &Config) -> Arc<dyn Logger + Send + Sync> {
    Arc::new(LoggerConsole::new(config.logger_timezone))
}

/// Polls until the predicate holds or the timeout passes. Returns the
/// final predicate result so asserts read naturally.
#[allow(dead_code)]
pub fn wait_until(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    predicate()
}
