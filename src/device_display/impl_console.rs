use crate::device_display::interface::{DeviceDisplay, Role};
use std::error::Error;

pub struct DeviceDisplayConsole;

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn append_chat(&mut self, role: Role, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let speaker = match role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("{}: {}", speaker, text);
        Ok(())
    }

    fn show_top_prediction(
        &mut self,
        label: &str,
        probability: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("[top: {} {:.2}%]", label, probability * 100.0);
        Ok(())
    }
}
