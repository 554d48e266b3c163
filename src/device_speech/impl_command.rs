use crate::device_speech::interface::DeviceSpeech;
use crate::library::logger::interface::Logger;
use std::process::Command;
use std::sync::Arc;

/// Pipes utterances to an external text-to-speech program, for example
/// `espeak` or `say`. The utterance is appended as the final argument
/// and the locale is exposed to the child as `SPEECH_LOCALE`. Blocks
/// the calling effect thread until the program exits.
pub struct DeviceSpeechCommand {
    command: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceSpeechCommand {
    pub fn new(command: String, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            command,
            logger: logger.with_namespace("speech").with_namespace("command"),
        }
    }
}

impl DeviceSpeech for DeviceSpeechCommand {
    fn speak(
        &self,
        text: &str,
        locale: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or("speech command is empty")?;

        let mut command = Command::new(program);
        command.args(parts).arg(text).env("SPEECH_LOCALE", locale);
        self.logger.info(&format!("spawning: {:?}", command))?;
        // Reap the child; a nonzero exit is the program's problem, not
        // ours.
        command.spawn()?.wait()?;
        Ok(())
    }
}
