use crate::assistant::core::{init, CameraModel, Event, Model, Readiness};
use crate::config::Config;
use crate::device_audio::interface::DeviceAudio;
use crate::device_camera::interface::{DeviceCamera, DeviceCameraError};
use crate::device_display::interface::{DeviceDisplay, Role};
use crate::device_speech::interface::DeviceSpeech;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::library::cancel::CancellationToken;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Assistant {
    pub(crate) config: Config,
    pub(crate) logger: Arc<dyn Logger + Send + Sync>,
    pub(crate) device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub(crate) device_speech: Arc<dyn DeviceSpeech + Send + Sync>,
    pub(crate) device_audio: Arc<dyn DeviceAudio + Send + Sync>,
    pub(crate) device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub(crate) image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub(crate) event_sender: Sender<Event>,
    pub(crate) event_receiver: Arc<Mutex<Receiver<Event>>>,
    pub(crate) sampling: Arc<Mutex<Option<CancellationToken>>>,
    pub(crate) model: Arc<Mutex<Model>>,
}

impl Assistant {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_speech: Arc<dyn DeviceSpeech + Send + Sync>,
        device_audio: Arc<dyn DeviceAudio + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let (model, _) = init(&config);
        Self {
            config,
            logger: logger.with_namespace("assistant"),
            device_camera,
            device_speech,
            device_audio,
            device_display,
            image_classifier,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            sampling: Arc::new(Mutex::new(None)),
            model: Arc::new(Mutex::new(model)),
        }
    }

    pub(crate) fn send_event(&self, event: Event) {
        if self.event_sender.send(event).is_err() {
            let _ = self.logger.error("event channel closed");
        }
    }

    pub fn start_camera(&self) {
        self.send_event(Event::CameraStartRequested);
    }

    /// Cancels the sampling loop before releasing the camera so no
    /// further capture can be dispatched once this returns.
    pub fn stop_camera(&self) -> Result<(), DeviceCameraError> {
        if let Some(token) = self.sampling.lock().unwrap().take() {
            token.cancel();
        }
        let stopped = self.device_camera.stop();
        self.send_event(Event::CameraStopped);
        stopped
    }

    pub fn submit_image(&self, path: PathBuf) {
        self.send_event(Event::UploadRequested { path });
    }

    pub fn set_threshold(&self, threshold: f32) {
        self.send_event(Event::ThresholdChanged(threshold));
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        self.send_event(Event::SoundToggled(enabled));
    }

    pub fn ready(&self) -> bool {
        matches!(
            self.model.lock().unwrap().readiness,
            Readiness::Ready { .. }
        )
    }

    pub fn load_error(&self) -> Option<String> {
        match &self.model.lock().unwrap().readiness {
            Readiness::Failed { reason } => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn labels(&self) -> Vec<String> {
        match &self.model.lock().unwrap().readiness {
            Readiness::Ready { labels } => labels.clone(),
            _ => vec![],
        }
    }

    pub fn threshold(&self) -> f32 {
        self.model.lock().unwrap().threshold
    }

    pub fn sound_enabled(&self) -> bool {
        self.model.lock().unwrap().sound_enabled
    }

    pub fn camera_on(&self) -> bool {
        matches!(self.model.lock().unwrap().camera, CameraModel::On(_))
    }

    pub fn predictions(&self) -> Vec<Prediction> {
        self.model.lock().unwrap().predictions.clone()
    }

    pub fn top_prediction(&self) -> Option<Prediction> {
        self.model.lock().unwrap().top_one.clone()
    }

    pub fn transcript(&self) -> Vec<(Role, String)> {
        self.model
            .lock()
            .unwrap()
            .transcript
            .iter()
            .map(|message| (message.role, message.display_text(&self.config)))
            .collect()
    }
}
