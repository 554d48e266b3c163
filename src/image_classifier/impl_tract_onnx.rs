use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::{ClassifierError, ImageClassifier, Prediction};
use crate::image_classifier::tensor::fit_image_to_tensor;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub input_size: u32,
}

/// Runs an exported ONNX classification model. The labels file carries
/// one label per line, aligned with the model's output vector.
pub struct ImageClassifierTractOnnx {
    config: ModelConfig,
    plan: Mutex<Option<Plan>>,
    labels: Mutex<Vec<String>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            plan: Mutex::new(None),
            labels: Mutex::new(vec![]),
            logger: logger.with_namespace("classifier").with_namespace("tract"),
        }
    }

    fn missing_assets(&self) -> Vec<String> {
        [&self.config.model_path, &self.config.labels_path]
            .iter()
            .filter(|path| !path.exists())
            .map(|path| path.display().to_string())
            .collect()
    }

    fn read_labels(&self) -> Result<Vec<String>, ClassifierError> {
        let text = std::fs::read_to_string(&self.config.labels_path)
            .map_err(|error| ClassifierError::Load(error.to_string()))?;
        let labels: Vec<String> = text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        if labels.is_empty() {
            return Err(ClassifierError::Load(format!(
                "no labels in {}",
                self.config.labels_path.display()
            )));
        }
        Ok(labels)
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn load(&self) -> Result<Vec<String>, ClassifierError> {
        let missing = self.missing_assets();
        if !missing.is_empty() {
            return Err(ClassifierError::MissingAssets { paths: missing });
        }

        let labels = self.read_labels()?;

        let plan = tract_onnx::onnx()
            .model_for_path(&self.config.model_path)
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|error| ClassifierError::Load(error.to_string()))?;

        let _ = self.logger.info(&format!(
            "Loaded {} with {} labels",
            self.config.model_path.display(),
            labels.len()
        ));

        *self.plan.lock().unwrap() = Some(plan);
        *self.labels.lock().unwrap() = labels.clone();
        Ok(labels)
    }

    fn classify(&self, frame: &Frame) -> Result<Vec<Prediction>, ClassifierError> {
        let tensor = fit_image_to_tensor(&frame.0, self.config.input_size, self.config.input_size)
            .map_err(|error| ClassifierError::Inference(error.to_string()))?;

        let plan = self.plan.lock().unwrap();
        let plan = plan
            .as_ref()
            .ok_or_else(|| ClassifierError::Load("model is not loaded".to_string()))?;

        let outputs = plan
            .run(tvec!(tensor.into_tvalue()))
            .map_err(|error| ClassifierError::Inference(error.to_string()))?;
        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|error| ClassifierError::Inference(error.to_string()))?;

        let labels = self.labels.lock().unwrap();
        Ok(labels
            .iter()
            .zip(scores.iter())
            .map(|(label, score)| Prediction {
                label: label.clone(),
                probability: *score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::library::logger::impl_console::LoggerConsole;

    #[test]
    fn test_load_reports_missing_assets() {
        let logger = Arc::new(LoggerConsole::new(Config::default().logger_timezone));
        let classifier = ImageClassifierTractOnnx::new(
            ModelConfig {
                model_path: PathBuf::from("/no/such/model.onnx"),
                labels_path: PathBuf::from("/no/such/labels.txt"),
                input_size: 224,
            },
            logger,
        );

        let error = classifier.load().unwrap_err();
        match error {
            ClassifierError::MissingAssets { paths } => {
                assert_eq!(
                    paths,
                    vec![
                        "/no/such/model.onnx".to_string(),
                        "/no/such/labels.txt".to_string()
                    ]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_classify_before_load_fails() {
        use crate::device_camera::interface::Frame;
        use image::{DynamicImage, ImageBuffer, Rgb};

        let logger = Arc::new(LoggerConsole::new(Config::default().logger_timezone));
        let classifier = ImageClassifierTractOnnx::new(
            ModelConfig {
                model_path: PathBuf::from("/no/such/model.onnx"),
                labels_path: PathBuf::from("/no/such/labels.txt"),
                input_size: 224,
            },
            logger,
        );

        let frame = Frame(DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
            8,
            8,
            Rgb([0, 0, 0]),
        )));
        assert!(matches!(
            classifier.classify(&frame),
            Err(ClassifierError::Load(_))
        ));
    }
}
