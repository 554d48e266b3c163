use crate::assistant::policy::{self, SchedulerState, Source};
use crate::assistant::reply::{self, Reply};
use crate::config::{Config, MAX_THRESHOLD};
use crate::device_camera::interface::{DeviceCameraError, Frame};
use crate::device_display::interface::Role;
use crate::image_classifier::interface::{ClassifierError, Prediction};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Readiness {
    #[default]
    Loading,
    Ready {
        labels: Vec<String>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CameraModel {
    #[default]
    Off,
    Starting,
    On(SamplerModel),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SamplePhase {
    #[default]
    Idle,
    Capturing,
    Classifying,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SamplerModel {
    pub phase: SamplePhase,
    pub last_sample: Option<Instant>,
    pub last_frame: Option<Frame>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatBody {
    Text(String),
    Reply(Reply),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub body: ChatBody,
}

impl ChatMessage {
    pub fn assistant_text(text: &str) -> Self {
        Self {
            role: Role::Assistant,
            body: ChatBody::Text(text.to_string()),
        }
    }

    pub fn assistant_reply(reply: Reply) -> Self {
        Self {
            role: Role::Assistant,
            body: ChatBody::Reply(reply),
        }
    }

    pub fn user_text(text: &str) -> Self {
        Self {
            role: Role::User,
            body: ChatBody::Text(text.to_string()),
        }
    }

    pub fn display_text(&self, config: &Config) -> String {
        match &self.body {
            ChatBody::Text(text) => text.clone(),
            ChatBody::Reply(reply) => reply::chat_line(config, reply),
        }
    }
}

/// A decoded upload plus its identity fingerprint
/// (`name:size:modified_ms`) used by the upload dedup policy.
#[derive(Debug, Clone)]
pub struct UploadImage {
    pub frame: Frame,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub readiness: Readiness,
    pub threshold: f32,
    pub sound_enabled: bool,
    pub transcript: Vec<ChatMessage>,
    pub predictions: Vec<Prediction>,
    pub top_one: Option<Prediction>,
    pub camera: CameraModel,
    pub webcam_responded_at: Option<Instant>,
    pub scheduler: SchedulerState,
}

#[derive(Debug)]
pub enum Event {
    ModelLoadDone(Result<Vec<String>, ClassifierError>),
    ThresholdChanged(f32),
    SoundToggled(bool),
    CameraStartRequested,
    CameraStartDone(Result<(), DeviceCameraError>),
    CameraStopped,
    Tick(Instant),
    FrameCaptureDone {
        at: Instant,
        result: Result<Frame, DeviceCameraError>,
    },
    UploadRequested {
        path: PathBuf,
    },
    UploadReadDone(Result<UploadImage, Box<dyn std::error::Error + Send + Sync>>),
    ClassifyDone {
        source: Source,
        at: Instant,
        result: Result<Vec<Prediction>, ClassifierError>,
    },
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::ModelLoadDone(Ok(labels)) => {
                format!("ModelLoadDone(Ok({} labels))", labels.len())
            }
            Event::ClassifyDone {
                source,
                at,
                result: Ok(predictions),
            } => format!(
                "ClassifyDone {{ source: {:?}, at: {:?}, predictions: {} }}",
                source,
                at,
                predictions.len()
            ),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    StartCamera,
    StartSampling,
    CaptureFrame,
    Classify { frame: Frame, source: Source },
    ReadUpload { path: PathBuf },
    Announce { reply: Reply },
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (
        Model {
            readiness: Readiness::Loading,
            threshold: config.default_threshold.clamp(0.0, MAX_THRESHOLD),
            sound_enabled: config.sound_enabled,
            transcript: vec![ChatMessage::assistant_text(reply::GREETING)],
            predictions: vec![],
            top_one: None,
            camera: CameraModel::Off,
            webcam_responded_at: None,
            scheduler: SchedulerState::default(),
        },
        vec![Effect::LoadModel],
    )
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    let mut model = model;
    match event {
        Event::ModelLoadDone(Ok(labels)) => {
            model.readiness = Readiness::Ready { labels };
            model
                .transcript
                .push(ChatMessage::assistant_text(reply::MODEL_READY));
            (model, vec![])
        }
        Event::ModelLoadDone(Err(error)) => {
            model
                .transcript
                .push(ChatMessage::assistant_text(&reply::load_failure_line(
                    &error,
                )));
            model.readiness = Readiness::Failed {
                reason: error.to_string(),
            };
            (model, vec![])
        }
        Event::ThresholdChanged(value) => {
            model.threshold = value.clamp(0.0, MAX_THRESHOLD);
            (model, vec![])
        }
        Event::SoundToggled(enabled) => {
            model.sound_enabled = enabled;
            (model, vec![])
        }
        Event::CameraStartRequested => {
            let ready = matches!(model.readiness, Readiness::Ready { .. });
            if ready && matches!(model.camera, CameraModel::Off) {
                model.camera = CameraModel::Starting;
                (model, vec![Effect::StartCamera])
            } else {
                (model, vec![])
            }
        }
        Event::CameraStartDone(result) => {
            if !matches!(model.camera, CameraModel::Starting) {
                return (model, vec![]);
            }
            match result {
                Ok(()) => {
                    model.camera = CameraModel::On(SamplerModel::default());
                    model
                        .transcript
                        .push(ChatMessage::assistant_text(reply::WEBCAM_ACTIVE));
                    (model, vec![Effect::StartSampling])
                }
                Err(error) => {
                    model.camera = CameraModel::Off;
                    model
                        .transcript
                        .push(ChatMessage::assistant_text(&reply::camera_failure_line(
                            &error,
                        )));
                    (model, vec![])
                }
            }
        }
        Event::CameraStopped => {
            if matches!(model.camera, CameraModel::Off) {
                return (model, vec![]);
            }
            model.camera = CameraModel::Off;
            model
                .transcript
                .push(ChatMessage::assistant_text(reply::WEBCAM_STOPPED));
            (model, vec![])
        }
        Event::Tick(now) => on_tick(config, model, now),
        Event::FrameCaptureDone { at, result } => on_frame(config, model, at, result),
        Event::UploadRequested { path } => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            model
                .transcript
                .push(ChatMessage::user_text(&format!("Sending image: {}", name)));
            if matches!(model.readiness, Readiness::Ready { .. }) {
                (model, vec![Effect::ReadUpload { path }])
            } else {
                (model, vec![])
            }
        }
        Event::UploadReadDone(Err(_)) => {
            model
                .transcript
                .push(ChatMessage::assistant_text(reply::IMAGE_LOAD_FAILED));
            (model, vec![])
        }
        Event::UploadReadDone(Ok(upload)) => (
            model,
            vec![Effect::Classify {
                frame: upload.frame,
                source: Source::Upload {
                    signature: upload.signature,
                },
            }],
        ),
        Event::ClassifyDone { source, at, result } => {
            on_classified(config, model, source, at, result)
        }
    }
}

/// Samples at most once per `sample_period`, and only while the
/// previous cycle has fully completed.
fn on_tick(config: &Config, mut model: Model, now: Instant) -> (Model, Vec<Effect>) {
    let due_sampler = match &model.camera {
        CameraModel::On(sampler) if sampler.phase == SamplePhase::Idle => {
            let due = match sampler.last_sample {
                None => true,
                Some(at) => now.duration_since(at) >= config.sample_period(),
            };
            if due {
                Some(sampler.clone())
            } else {
                None
            }
        }
        _ => None,
    };

    match due_sampler {
        Some(mut sampler) => {
            sampler.phase = SamplePhase::Capturing;
            sampler.last_sample = Some(now);
            model.camera = CameraModel::On(sampler);
            (model, vec![Effect::CaptureFrame])
        }
        None => (model, vec![]),
    }
}

/// Every captured frame refreshes the live feed; classification is
/// dispatched only when the webcam response throttle is open.
fn on_frame(
    config: &Config,
    mut model: Model,
    at: Instant,
    result: Result<Frame, DeviceCameraError>,
) -> (Model, Vec<Effect>) {
    let mut sampler = match &model.camera {
        CameraModel::On(sampler) => sampler.clone(),
        _ => return (model, vec![]),
    };

    let frame = match result {
        Ok(frame) => frame,
        Err(_) => {
            sampler.phase = SamplePhase::Idle;
            model.camera = CameraModel::On(sampler);
            return (model, vec![]);
        }
    };

    sampler.last_frame = Some(frame.clone());
    let throttle_open = match model.webcam_responded_at {
        None => true,
        Some(last) => at.duration_since(last) >= config.webcam_cooldown,
    };

    if throttle_open {
        model.webcam_responded_at = Some(at);
        sampler.phase = SamplePhase::Classifying;
        model.camera = CameraModel::On(sampler);
        (
            model,
            vec![Effect::Classify {
                frame,
                source: Source::Stream,
            }],
        )
    } else {
        sampler.phase = SamplePhase::Idle;
        model.camera = CameraModel::On(sampler);
        (model, vec![])
    }
}

/// The notification scheduler: top-1, threshold gate, per-source dedup,
/// then the global speech cooldown. Chat is appended for every
/// confident or unknown outcome; at most one announce effect comes out.
fn on_classified(
    config: &Config,
    mut model: Model,
    source: Source,
    at: Instant,
    result: Result<Vec<Prediction>, ClassifierError>,
) -> (Model, Vec<Effect>) {
    if source == Source::Stream {
        if let CameraModel::On(sampler) = &model.camera {
            let mut sampler = sampler.clone();
            sampler.phase = SamplePhase::Idle;
            model.camera = CameraModel::On(sampler);
        }
    }

    let predictions = match result {
        Ok(predictions) => predictions,
        Err(_) => {
            model
                .transcript
                .push(ChatMessage::assistant_text(reply::PROCESSING_FAILED));
            return (model, vec![]);
        }
    };

    let top = match policy::top_one(&predictions) {
        Some(top) => top.clone(),
        None => return (model, vec![]),
    };

    model.top_one = Some(top.clone());
    model.predictions = predictions;

    if top.probability >= model.threshold {
        let answer = Reply::confident(&top.label, top.probability);
        model
            .transcript
            .push(ChatMessage::assistant_reply(answer.clone()));

        let wants_speech = match &source {
            Source::Stream => model.scheduler.stream.should_speak(
                &top.label,
                top.probability,
                config.score_delta_to_speak,
            ),
            Source::Upload { signature } => model.scheduler.upload.should_speak(
                &top.label,
                signature,
                at,
                config.upload_mute_ttl,
            ),
        };

        if wants_speech
            && model.sound_enabled
            && model.scheduler.cooldown.is_open(at, config.speak_cooldown)
        {
            model.scheduler.cooldown.stamp(at);
            if source == Source::Stream {
                model.scheduler.stream.remember(&top.label, top.probability);
            }
            return (model, vec![Effect::Announce { reply: answer }]);
        }
        (model, vec![])
    } else {
        model
            .transcript
            .push(ChatMessage::assistant_reply(Reply::Unknown));
        if model.sound_enabled && model.scheduler.cooldown.is_open(at, config.speak_cooldown) {
            model.scheduler.cooldown.stamp(at);
            return (
                model,
                vec![Effect::Announce {
                    reply: Reply::Unknown,
                }],
            );
        }
        (model, vec![])
    }
}
