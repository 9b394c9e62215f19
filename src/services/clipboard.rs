use std::time::{Duration, Instant};

use crate::model::HashedPassword;

/// How long the "Copied" acknowledgment stays up.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Writes through egui's platform integration.
pub struct EguiClipboard<'a>(pub &'a egui::Context);

impl ClipboardSink for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.0.copy_text(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.copied_at = None;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.remaining(now).is_some()
    }

    /// Time left before the acknowledgment reverts.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let at = self.copied_at?;
        COPY_FEEDBACK
            .checked_sub(now.saturating_duration_since(at))
            .filter(|d| !d.is_zero())
    }

    /// Drops an expired acknowledgment.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_active(now) {
            self.copied_at = None;
        }
    }
}

/// Puts `hash` on the clipboard and starts the acknowledgment.
/// Write failures are logged and leave the acknowledgment off.
pub fn copy_hash(
    sink: &mut dyn ClipboardSink,
    hash: Option<&HashedPassword>,
    feedback: &mut CopyFeedback,
    now: Instant,
) -> bool {
    let Some(hash) = hash else {
        return false;
    };
    match sink.write_text(hash.as_str()) {
        Ok(()) => {
            feedback.mark(now);
            true
        }
        Err(e) => {
            tracing::warn!("clipboard write failed: {e:#}");
            feedback.clear();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl ClipboardSink for Recorder {
        fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
            self.0.push(text.to_owned());
            Ok(())
        }
    }

    struct Broken;

    impl ClipboardSink for Broken {
        fn write_text(&mut self, _text: &str) -> anyhow::Result<()> {
            anyhow::bail!("no clipboard available")
        }
    }

    fn token() -> HashedPassword {
        HashedPassword::new("$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy".into())
    }

    #[test]
    fn copies_exact_hash_and_acknowledges() {
        let mut sink = Recorder::default();
        let mut fb = CopyFeedback::default();
        let now = Instant::now();
        let t = token();

        assert!(copy_hash(&mut sink, Some(&t), &mut fb, now));
        assert_eq!(sink.0, vec![t.as_str().to_owned()]);
        assert!(fb.is_active(now));
        assert!(fb.is_active(now + Duration::from_millis(1999)));
        assert!(!fb.is_active(now + COPY_FEEDBACK));
    }

    #[test]
    fn acknowledgment_reverts_after_two_seconds() {
        let mut fb = CopyFeedback::default();
        let now = Instant::now();
        fb.mark(now);
        assert_eq!(fb.remaining(now), Some(COPY_FEEDBACK));

        fb.tick(now + Duration::from_secs(1));
        assert!(fb.is_active(now + Duration::from_secs(1)));

        fb.tick(now + Duration::from_secs(2));
        assert_eq!(fb.remaining(now), None);
    }

    #[test]
    fn copying_again_restarts_the_timer() {
        let mut sink = Recorder::default();
        let mut fb = CopyFeedback::default();
        let now = Instant::now();
        let t = token();
        copy_hash(&mut sink, Some(&t), &mut fb, now);
        let later = now + Duration::from_millis(1500);
        copy_hash(&mut sink, Some(&t), &mut fb, later);
        assert!(fb.is_active(now + Duration::from_millis(3000)));
        assert_eq!(sink.0.len(), 2);
    }

    #[test]
    fn nothing_to_copy_is_a_noop() {
        let mut sink = Recorder::default();
        let mut fb = CopyFeedback::default();
        assert!(!copy_hash(&mut sink, None, &mut fb, Instant::now()));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn failed_write_shows_no_acknowledgment() {
        let mut fb = CopyFeedback::default();
        let now = Instant::now();
        fb.mark(now);
        assert!(!copy_hash(&mut Broken, Some(&token()), &mut fb, now));
        assert!(!fb.is_active(now));
    }
}
