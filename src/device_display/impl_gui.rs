use crate::device_display::interface::{DeviceDisplay, Role};
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Clone)]
struct ChatWindow {
    transcript: Arc<Mutex<Vec<(Role, String)>>>,
    top: Arc<Mutex<Option<(String, f32)>>>,
}

impl eframe::App for ChatWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let transcript = self.transcript.lock().unwrap().clone();
        let top = self.top.lock().unwrap().clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            match top {
                Some((label, probability)) => {
                    ui.heading(format!("{} {:.2}%", label, probability * 100.0));
                }
                None => {
                    ui.heading("No prediction yet");
                }
            }
            ui.separator();

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for (role, text) in &transcript {
                        let speaker = match role {
                            Role::User => "you",
                            Role::Assistant => "assistant",
                        };
                        ui.label(
                            egui::RichText::new(format!("{}: {}", speaker, text)).monospace(),
                        );
                    }
                });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct DeviceDisplayGui {
    transcript: Arc<Mutex<Vec<(Role, String)>>>,
    top: Arc<Mutex<Option<(String, f32)>>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            transcript: Arc::new(Mutex::new(vec![])),
            top: Arc::new(Mutex::new(None)),
        }
    }

    /// Open the chat window. The window runs on its own thread so the
    /// event loop keeps going when it is closed.
    pub fn open(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let transcript = self.transcript.clone();
        let top = self.top.clone();

        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([480.0, 640.0]),
                ..Default::default()
            };

            let window = ChatWindow { transcript, top };

            let _ = eframe::run_native("Vision Chat", options, Box::new(|_cc| Box::new(window)));
        });

        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn append_chat(&mut self, role: Role, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.transcript.lock().unwrap().push((role, text.to_string()));
        Ok(())
    }

    fn show_top_prediction(
        &mut self,
        label: &str,
        probability: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.top.lock().unwrap() = Some((label.to_string(), probability));
        Ok(())
    }
}
