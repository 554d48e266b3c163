use crate::device_speech::interface::DeviceSpeech;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

pub struct DeviceSpeechFake {
    spoken: Mutex<Vec<String>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceSpeechFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            spoken: Mutex::new(vec![]),
            logger: logger.with_namespace("speech").with_namespace("fake"),
        }
    }

    /// Every line spoken so far, oldest first.
    #[cfg(test)]
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl DeviceSpeech for DeviceSpeechFake {
    fn speak(
        &self,
        text: &str,
        locale: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("({}) {}", locale, text))?;
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
