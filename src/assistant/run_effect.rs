use crate::assistant::core::{Effect, Event, UploadImage};
use crate::assistant::main::Assistant;
use crate::assistant::policy::Source;
use crate::assistant::reply::{self, Reply};
use crate::device_camera::interface::Frame;
use crate::library::cancel::CancellationToken;
use std::path::Path;
use std::time::Instant;

impl Assistant {
    pub(crate) fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::LoadModel => {
                let result = self.image_classifier.load();
                self.send_event(Event::ModelLoadDone(result));
            }
            Effect::StartCamera => {
                let result = self.device_camera.setup();
                self.send_event(Event::CameraStartDone(result));
            }
            Effect::StartSampling => self.start_sampling(),
            Effect::CaptureFrame => {
                let result = self.device_camera.capture();
                self.send_event(Event::FrameCaptureDone {
                    at: Instant::now(),
                    result,
                });
            }
            Effect::Classify { frame, source } => {
                if source == Source::Stream && self.sampling_cancelled() {
                    return;
                }
                let result = self.image_classifier.classify(&frame);
                self.send_event(Event::ClassifyDone {
                    source,
                    at: Instant::now(),
                    result,
                });
            }
            Effect::ReadUpload { path } => {
                let result = read_upload(&path);
                self.send_event(Event::UploadReadDone(result));
            }
            Effect::Announce { reply } => self.announce(&reply),
        }
    }

    /// Installs a fresh cancellation token and hands it to a tick
    /// thread. The token is in its slot before this returns, so a stop
    /// arriving at any later point finds it. Starting again cancels
    /// the previous run, so at most one loop feeds the scheduler.
    pub(crate) fn start_sampling(&self) {
        let token = CancellationToken::new();
        {
            let mut slot = self.sampling.lock().unwrap();
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
        }
        let assistant = self.clone();
        std::thread::spawn(move || assistant.run_sampling(token));
    }

    /// Emits ticks until the token is cancelled or the camera leaves
    /// the on state.
    fn run_sampling(&self, token: CancellationToken) {
        loop {
            if token.is_cancelled() || !self.camera_on() {
                return;
            }
            self.send_event(Event::Tick(Instant::now()));
            std::thread::sleep(self.config.tick_rate);
        }
    }

    fn sampling_cancelled(&self) -> bool {
        match self.sampling.lock().unwrap().as_ref() {
            Some(token) => token.is_cancelled(),
            None => true,
        }
    }

    fn announce(&self, reply: &Reply) {
        if let Reply::Confident { label, .. } = reply {
            if let Some(cue) = self.config.audio_by_label.get(label) {
                if let Err(error) = self.device_audio.play(cue) {
                    let _ = self.logger.error(&format!("audio cue failed: {}", error));
                }
                return;
            }
        }
        let line = reply::speech_line(reply);
        if let Err(error) = self.device_speech.speak(&line, &self.config.speech_locale) {
            let _ = self.logger.error(&format!("speech failed: {}", error));
        }
    }
}

/// Builds the `name:size:modified_ms` signature before decoding, so a
/// replaced file with the same name reads as a different upload.
pub(crate) fn read_upload(
    path: &Path,
) -> Result<UploadImage, Box<dyn std::error::Error + Send + Sync>> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let metadata = std::fs::metadata(path)?;
    let modified_ms = metadata
        .modified()?
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let signature = format!("{}:{}:{}", name, metadata.len(), modified_ms);
    let image = image::open(path)?;
    Ok(UploadImage {
        frame: Frame(image),
        signature,
    })
}
