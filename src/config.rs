use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Ceiling for the user-adjustable threshold so a 1.0-probability hit
/// always counts as confident.
pub const MAX_THRESHOLD: f32 = 0.99;

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub fps_limit: u32,
    pub default_threshold: f32,
    pub speak_cooldown: Duration,
    pub webcam_cooldown: Duration,
    pub upload_mute_ttl: Duration,
    pub score_delta_to_speak: f32,
    pub sound_enabled: bool,
    pub speech_locale: String,
    pub response_by_label: HashMap<String, String>,
    pub audio_by_label: HashMap<String, PathBuf>,
    pub logger_timezone: chrono::FixedOffset,
}

impl Config {
    /// Minimum spacing between camera samples.
    pub fn sample_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps_limit.max(1) as f64)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(50),
            fps_limit: 6,
            default_threshold: 0.70,
            speak_cooldown: Duration::from_millis(2500),
            webcam_cooldown: Duration::from_millis(10_000),
            upload_mute_ttl: Duration::from_millis(15_000),
            score_delta_to_speak: 0.10,
            sound_enabled: true,
            speech_locale: "en-US".to_string(),
            response_by_label: HashMap::new(),
            audio_by_label: HashMap::new(),
            logger_timezone: utc(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap()
}
