use crate::assistant::core::Model;
use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::Prediction;
use std::sync::{Arc, Mutex};

/// Pushes model changes to the display incrementally. Already flushed
/// chat lines are never re-sent, so the display owns the scrollback.
pub struct Render {
    config: Config,
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    flushed: usize,
    last_top: Option<Prediction>,
}

impl Render {
    pub fn new(config: Config, device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self {
            config,
            device_display,
            flushed: 0,
            last_top: None,
        }
    }

    pub fn render(&mut self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut display = self.device_display.lock().unwrap();

        for message in model.transcript.iter().skip(self.flushed) {
            display.append_chat(message.role, &message.display_text(&self.config))?;
        }
        self.flushed = model.transcript.len();

        if model.top_one != self.last_top {
            if let Some(top) = &model.top_one {
                display.show_top_prediction(&top.label, top.probability)?;
            }
            self.last_top = model.top_one.clone();
        }
        Ok(())
    }
}
