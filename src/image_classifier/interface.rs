use crate::device_camera::interface::Frame;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("model files not found: {}", paths.join(", "))]
    MissingAssets { paths: Vec<String> },
    #[error("model load failed: {0}")]
    Load(String),
    #[error("classification failed: {0}")]
    Inference(String),
}

pub trait ImageClassifier {
    /// Prepare the model and return its label vocabulary.
    fn load(&self) -> Result<Vec<String>, ClassifierError>;

    /// Score one frame against the vocabulary. Order of the returned
    /// list is not guaranteed.
    fn classify(&self, frame: &Frame) -> Result<Vec<Prediction>, ClassifierError>;
}
