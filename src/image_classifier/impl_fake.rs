use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::{ClassifierError, ImageClassifier, Prediction};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::{Arc, Mutex};

pub struct ImageClassifierFake {
    labels: Vec<String>,
    script: Mutex<Vec<Vec<Prediction>>>,
    load_failure: Option<ClassifierError>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let labels = [
            "dog", "cat", "person", "car", "chair", "bird", "bicycle", "book", "cup", "plant",
        ];
        Self {
            labels: labels.iter().map(|label| label.to_string()).collect(),
            script: Mutex::new(vec![]),
            load_failure: None,
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }

    /// A classifier that replays the given results in order, then falls
    /// back to random output. Results are consumed front to back.
    #[cfg(test)]
    pub fn with_script(
        logger: Arc<dyn Logger + Send + Sync>,
        labels: Vec<String>,
        script: Vec<Vec<Prediction>>,
    ) -> Self {
        Self {
            labels,
            script: Mutex::new(script),
            load_failure: None,
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }

    /// A classifier whose load always fails with the given error.
    #[cfg(test)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, failure: ClassifierError) -> Self {
        Self {
            labels: vec![],
            script: Mutex::new(vec![]),
            load_failure: Some(failure),
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }

    fn random_distribution(&self) -> Result<Vec<Prediction>, ClassifierError> {
        let mut rng = rand::rng();
        let weight_dist = Uniform::new(0.0f32, 1.0)
            .map_err(|error| ClassifierError::Inference(error.to_string()))?;

        let weights: Vec<f32> = self
            .labels
            .iter()
            .map(|_| weight_dist.sample(&mut rng))
            .collect();
        let total: f32 = weights.iter().sum::<f32>().max(f32::EPSILON);

        Ok(self
            .labels
            .iter()
            .zip(weights)
            .map(|(label, weight)| Prediction {
                label: label.clone(),
                probability: weight / total,
            })
            .collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn load(&self) -> Result<Vec<String>, ClassifierError> {
        if let Some(failure) = &self.load_failure {
            return Err(failure.clone());
        }
        let _ = self
            .logger
            .info(&format!("Loaded {} labels", self.labels.len()));
        Ok(self.labels.clone())
    }

    fn classify(&self, _frame: &Frame) -> Result<Vec<Prediction>, ClassifierError> {
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                None
            } else {
                Some(script.remove(0))
            }
        };
        match next {
            Some(predictions) => Ok(predictions),
            None => self.random_distribution(),
        }
    }
}
