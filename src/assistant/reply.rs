use crate::config::Config;
use crate::device_camera::interface::DeviceCameraError;
use crate::image_classifier::interface::ClassifierError;

pub const GREETING: &str =
    "Hi! Turn on the webcam or upload an image and I will guess what it is using your trained model.";
pub const MODEL_READY: &str = "Model ready. Point an object at the camera or upload a file.";
pub const WEBCAM_ACTIVE: &str = "Webcam active. Show me something!";
pub const WEBCAM_STOPPED: &str = "Webcam stopped.";
pub const PROCESSING_FAILED: &str = "Sorry, something went wrong while processing that image.";
pub const IMAGE_LOAD_FAILED: &str = "Could not read that image file.";
pub const UNKNOWN_REPLY: &str =
    "Sorry, I do not recognize this yet. Try training with more example images.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTier {
    VeryConfident,
    FairlyConfident,
    Uncertain,
    LowConfidence,
}

pub fn reaction_tier(probability: f32) -> ReactionTier {
    if probability >= 0.90 {
        ReactionTier::VeryConfident
    } else if probability >= 0.70 {
        ReactionTier::FairlyConfident
    } else if probability >= 0.50 {
        ReactionTier::Uncertain
    } else {
        ReactionTier::LowConfidence
    }
}

/// What the assistant has to say about one classification event.
/// Presentation happens at the edges; see `chat_line` and `speech_line`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Confident {
        label: String,
        probability: f32,
        reaction: ReactionTier,
    },
    Unknown,
}

impl Reply {
    pub fn confident(label: &str, probability: f32) -> Self {
        Reply::Confident {
            label: label.to_string(),
            probability,
            reaction: reaction_tier(probability),
        }
    }
}

pub fn reaction_line(tier: ReactionTier) -> &'static str {
    match tier {
        ReactionTier::VeryConfident => "I am very sure.",
        ReactionTier::FairlyConfident => "Fairly sure.",
        ReactionTier::Uncertain => "Still unsure. Try a clearer angle or better lighting.",
        ReactionTier::LowConfidence => {
            "My confidence is low. This label may need more training data."
        }
    }
}

pub fn chat_line(config: &Config, reply: &Reply) -> String {
    match reply {
        Reply::Confident {
            label,
            probability,
            reaction,
        } => {
            // A custom response replaces the sentence, not the
            // trailing reaction.
            let sentence = match config.response_by_label.get(label) {
                Some(custom) => custom.clone(),
                None => format!(
                    "I think this is {} (confidence {:.2}%).",
                    label,
                    probability * 100.0
                ),
            };
            format!("{} {}", sentence, reaction_line(*reaction))
        }
        Reply::Unknown => UNKNOWN_REPLY.to_string(),
    }
}

pub fn speech_line(reply: &Reply) -> String {
    match reply {
        Reply::Confident {
            label, probability, ..
        } => format!(
            "Detected {}. Confidence {:.0} percent.",
            label,
            probability * 100.0
        ),
        Reply::Unknown => UNKNOWN_REPLY.to_string(),
    }
}

pub fn camera_failure_line(error: &DeviceCameraError) -> String {
    match error {
        DeviceCameraError::PermissionDenied => {
            "Camera permission was denied. Allow camera access and try again.".to_string()
        }
        DeviceCameraError::Unavailable => {
            "No usable camera was found on this device.".to_string()
        }
        DeviceCameraError::Other(detail) => format!("Camera failed to start: {}", detail),
    }
}

pub fn load_failure_line(error: &ClassifierError) -> String {
    match error {
        ClassifierError::MissingAssets { paths } => {
            format!("Model files not found: {}.", paths.join(", "))
        }
        ClassifierError::Load(detail) | ClassifierError::Inference(detail) => {
            format!("Model failed to load: {}", detail)
        }
    }
}
