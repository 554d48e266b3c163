mod assistant;
mod config;
mod device_audio;
mod device_camera;
mod device_display;
mod device_speech;
mod image_classifier;
mod library;

use crate::assistant::main::Assistant;
use crate::config::Config;
use crate::device_audio::impl_rodio::DeviceAudioRodio;
use crate::device_audio::interface::DeviceAudio;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_camera::impl_folder::DeviceCameraFolder;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::impl_console::DeviceDisplayConsole;
use crate::device_display::impl_gui::DeviceDisplayGui;
use crate::device_display::interface::DeviceDisplay;
use crate::device_speech::impl_command::DeviceSpeechCommand;
use crate::device_speech::impl_fake::DeviceSpeechFake;
use crate::device_speech::interface::DeviceSpeech;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::impl_tract_onnx::{ImageClassifierTractOnnx, ModelConfig};
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();
    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> =
        match std::env::var("VISION_CHAT_CAMERA_DIR") {
            Ok(dir) => Arc::new(DeviceCameraFolder::new(PathBuf::from(dir), logger.clone())),
            Err(_) => Arc::new(DeviceCameraFake::new(logger.clone())),
        };

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match (
        std::env::var("VISION_CHAT_MODEL"),
        std::env::var("VISION_CHAT_LABELS"),
    ) {
        (Ok(model), Ok(labels)) => Arc::new(ImageClassifierTractOnnx::new(
            ModelConfig {
                model_path: PathBuf::from(model),
                labels_path: PathBuf::from(labels),
                input_size: 224,
            },
            logger.clone(),
        )),
        _ => Arc::new(ImageClassifierFake::new(logger.clone())),
    };

    let device_speech: Arc<dyn DeviceSpeech + Send + Sync> =
        match std::env::var("VISION_CHAT_SPEECH_COMMAND") {
            Ok(command) => Arc::new(DeviceSpeechCommand::new(command, logger.clone())),
            Err(_) => Arc::new(DeviceSpeechFake::new(logger.clone())),
        };

    let device_audio: Arc<dyn DeviceAudio + Send + Sync> =
        Arc::new(DeviceAudioRodio::new(logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
        if matches!(std::env::var("VISION_CHAT_DISPLAY").as_deref(), Ok("gui")) {
            let display = DeviceDisplayGui::new();
            if let Err(error) = display.open() {
                let _ = logger.error(&format!("gui display failed to open: {}", error));
            }
            Arc::new(Mutex::new(display))
        } else {
            Arc::new(Mutex::new(DeviceDisplayConsole::new()))
        };

    let assistant = Assistant::new(
        config,
        logger.clone(),
        device_camera,
        device_speech,
        device_audio,
        device_display,
        image_classifier,
    );

    let _ = logger.info(
        "commands: start | stop | send <path> | threshold [value] | sound [on|off] | labels | top | scores | status | chat | quit",
    );

    {
        let assistant = assistant.clone();
        std::thread::spawn(move || run_commands(assistant));
    }

    assistant.run()
}

fn run_commands(assistant: Assistant) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };
        match command {
            "" => {}
            "start" => assistant.start_camera(),
            "stop" => {
                if let Err(error) = assistant.stop_camera() {
                    println!("stop failed: {}", error);
                }
            }
            "send" if !rest.is_empty() => assistant.submit_image(PathBuf::from(rest)),
            "send" => println!("usage: send <path>"),
            "threshold" if rest.is_empty() => {
                println!("threshold {:.2}", assistant.threshold())
            }
            "threshold" => match rest.parse::<f32>() {
                Ok(value) => assistant.set_threshold(value),
                Err(_) => println!("usage: threshold [number]"),
            },
            "sound" if rest.is_empty() => {
                println!(
                    "sound {}",
                    if assistant.sound_enabled() { "on" } else { "off" }
                )
            }
            "sound" => match rest {
                "on" => assistant.set_sound_enabled(true),
                "off" => assistant.set_sound_enabled(false),
                _ => println!("usage: sound [on|off]"),
            },
            "labels" => println!("{}", assistant.labels().join(", ")),
            "top" => match assistant.top_prediction() {
                Some(top) => println!("{} {:.2}%", top.label, top.probability * 100.0),
                None => println!("no prediction yet"),
            },
            "scores" => {
                for prediction in assistant.predictions() {
                    println!("{} {:.2}%", prediction.label, prediction.probability * 100.0);
                }
            }
            "status" => {
                if let Some(error) = assistant.load_error() {
                    println!("model error: {}", error);
                } else if assistant.ready() {
                    println!(
                        "model ready, camera {}",
                        if assistant.camera_on() { "on" } else { "off" }
                    );
                } else {
                    println!("model loading");
                }
            }
            "chat" => {
                for (role, text) in assistant.transcript() {
                    println!("{:?}: {}", role, text);
                }
            }
            "quit" => std::process::exit(0),
            other => println!("unknown command: {}", other),
        }
    }
}
