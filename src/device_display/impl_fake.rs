use crate::device_display::interface::{DeviceDisplay, Role};
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex};

pub struct DeviceDisplayFake {
    chat: Arc<Mutex<Vec<(Role, String)>>>,
    top: Arc<Mutex<Option<(String, f32)>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            chat: Arc::new(Mutex::new(vec![])),
            top: Arc::new(Mutex::new(None)),
            logger: logger.with_namespace("display").with_namespace("fake"),
        }
    }

    pub fn chat(&self) -> Vec<(Role, String)> {
        self.chat.lock().unwrap().clone()
    }

    pub fn top(&self) -> Option<(String, f32)> {
        self.top.lock().unwrap().clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn append_chat(&mut self, role: Role, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("append_chat({:?}, {})", role, text))?;
        self.chat.lock().unwrap().push((role, text.to_string()));
        Ok(())
    }

    fn show_top_prediction(
        &mut self,
        label: &str,
        probability: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("show_top_prediction({}, {})", label, probability))?;
        *self.top.lock().unwrap() = Some((label.to_string(), probability));
        Ok(())
    }
}
