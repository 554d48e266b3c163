use crate::image_classifier::interface::Prediction;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Where a classification event came from. Uploads carry a content
/// fingerprint of the submitted file for dedup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stream,
    Upload { signature: String },
}

/// Highest-probability entry; the first occurrence wins ties. `None`
/// for an empty list, which callers treat as "no prediction".
pub fn top_one(predictions: &[Prediction]) -> Option<&Prediction> {
    let mut best: Option<&Prediction> = None;
    for prediction in predictions {
        match best {
            Some(current) if prediction.probability <= current.probability => {}
            _ => best = Some(prediction),
        }
    }
    best
}

/// Process-wide limit on how often any utterance may be emitted,
/// independent of label and source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpeechCooldown {
    pub last_spoken_at: Option<Instant>,
}

impl SpeechCooldown {
    pub fn is_open(&self, now: Instant, cooldown: Duration) -> bool {
        match self.last_spoken_at {
            None => true,
            Some(at) => now.duration_since(at) >= cooldown,
        }
    }

    pub fn stamp(&mut self, now: Instant) {
        self.last_spoken_at = Some(now);
    }
}

/// Stream dedup: re-announce only on a label change or a meaningful
/// confidence jump. State tracks the last utterance actually emitted,
/// so `remember` is called only alongside an emission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamDedup {
    pub last_label: Option<String>,
    pub last_score: f32,
}

impl StreamDedup {
    pub fn should_speak(&self, label: &str, probability: f32, min_delta: f32) -> bool {
        match &self.last_label {
            None => true,
            Some(last) if last != label => true,
            Some(_) => (probability - self.last_score).abs() >= min_delta,
        }
    }

    pub fn remember(&mut self, label: &str, probability: f32) {
        self.last_label = Some(label.to_string());
        self.last_score = probability;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadEntry {
    pub signature: String,
    pub mute_until: Instant,
}

/// Upload dedup: per label, a repeated file signature is muted for a
/// TTL window. A changed signature always speaks and restarts the
/// window; a suppressed repeat does not extend it. The table grows one
/// entry per label ever seen and is never pruned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadDedup {
    pub entries: HashMap<String, UploadEntry>,
}

impl UploadDedup {
    /// Decides and updates the table in one step; the table mutation
    /// happens regardless of what the cooldown gate later rules.
    pub fn should_speak(&mut self, label: &str, signature: &str, now: Instant, ttl: Duration) -> bool {
        match self.entries.get_mut(label) {
            None => {
                self.entries.insert(
                    label.to_string(),
                    UploadEntry {
                        signature: signature.to_string(),
                        mute_until: now + ttl,
                    },
                );
                true
            }
            Some(entry) if entry.signature != signature => {
                entry.signature = signature.to_string();
                entry.mute_until = now + ttl;
                true
            }
            Some(entry) => {
                if now < entry.mute_until {
                    false
                } else {
                    entry.mute_until = now + ttl;
                    true
                }
            }
        }
    }
}

/// All mutable notification state, owned by the model and threaded
/// through `transition`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchedulerState {
    pub cooldown: SpeechCooldown,
    pub stream: StreamDedup,
    pub upload: UploadDedup,
}
