#[cfg(test)]
mod policy_test {

    use std::time::{Duration, Instant};

    use crate::assistant::policy::{top_one, SpeechCooldown, StreamDedup, UploadDedup};
    use crate::image_classifier::interface::Prediction;

    fn predict(label: &str, probability: f32) -> Prediction {
        Prediction {
            label: label.to_string(),
            probability,
        }
    }

    #[test]
    fn test_top_one_empty() {
        assert_eq!(top_one(&[]), None);
    }

    #[test]
    fn test_top_one_picks_maximum() {
        let predictions = vec![predict("a", 0.1), predict("b", 0.7), predict("c", 0.2)];
        assert_eq!(
            top_one(&predictions).map(|top| top.label.as_str()),
            Some("b")
        );
    }

    #[test]
    fn test_top_one_prefers_first_of_equal_scores() {
        let predictions = vec![
            predict("banana", 0.4),
            predict("apple", 0.4),
            predict("cherry", 0.2),
        ];
        assert_eq!(top_one(&predictions), Some(&predictions[0]));
    }

    #[test]
    fn test_cooldown_opens_at_exact_boundary() {
        let period = Duration::from_millis(2500);
        let mut cooldown = SpeechCooldown::default();
        let t0 = Instant::now();

        assert!(cooldown.is_open(t0, period));
        cooldown.stamp(t0);

        assert!(!cooldown.is_open(t0 + Duration::from_millis(2499), period));
        assert!(cooldown.is_open(t0 + Duration::from_millis(2500), period));
    }

    #[test]
    fn test_stream_dedup_first_sighting_speaks() {
        let dedup = StreamDedup::default();
        assert!(dedup.should_speak("cat", 0.9, 0.1));
    }

    #[test]
    fn test_stream_dedup_same_label_needs_score_jump() {
        let mut dedup = StreamDedup::default();
        dedup.remember("cat", 0.5);

        assert!(!dedup.should_speak("cat", 0.55, 0.1));
        assert!(dedup.should_speak("cat", 0.625, 0.1));
        // Score drops count the same as rises.
        assert!(dedup.should_speak("cat", 0.375, 0.1));
    }

    #[test]
    fn test_stream_dedup_label_change_speaks() {
        let mut dedup = StreamDedup::default();
        dedup.remember("cat", 0.9);
        assert!(dedup.should_speak("dog", 0.9, 0.1));
    }

    #[test]
    fn test_upload_dedup_mute_window() {
        let ttl = Duration::from_millis(15_000);
        let mut dedup = UploadDedup::default();
        let t0 = Instant::now();

        // A new label speaks and arms the window.
        assert!(dedup.should_speak("cat", "a.png:1:1", t0, ttl));

        // The same file inside the window is muted and the window
        // stays where it was.
        assert!(!dedup.should_speak("cat", "a.png:1:1", t0 + Duration::from_secs(5), ttl));
        assert_eq!(dedup.entries.get("cat").unwrap().mute_until, t0 + ttl);

        // A different file for the same label re-arms mid-window.
        let t1 = t0 + Duration::from_secs(6);
        assert!(dedup.should_speak("cat", "b.png:2:2", t1, ttl));
        assert_eq!(dedup.entries.get("cat").unwrap().signature, "b.png:2:2");
        assert_eq!(dedup.entries.get("cat").unwrap().mute_until, t1 + ttl);

        // The same file speaks again once the window has expired.
        let t2 = t1 + ttl;
        assert!(dedup.should_speak("cat", "b.png:2:2", t2, ttl));
        assert_eq!(dedup.entries.get("cat").unwrap().mute_until, t2 + ttl);
    }

    #[test]
    fn test_upload_dedup_labels_are_independent() {
        let ttl = Duration::from_millis(15_000);
        let mut dedup = UploadDedup::default();
        let t0 = Instant::now();

        assert!(dedup.should_speak("cat", "a.png:1:1", t0, ttl));
        assert!(dedup.should_speak("dog", "a.png:1:1", t0 + Duration::from_secs(1), ttl));
    }
}
