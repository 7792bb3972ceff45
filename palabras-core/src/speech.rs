use palabras_types::Utterance;
use std::time::{Duration, Instant};

use crate::config::VoiceSettings;

/// What the speech engine should do next
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCommand {
    /// Cancel whatever is playing, then speak this
    CancelAndSpeak(Utterance),
}

#[derive(Debug, Clone)]
struct Pending {
    utterance: Utterance,
    requested_at: Instant,
}

/// Serialises speech requests for a front end that drives its own speech
/// engine. Only the latest request survives. It becomes due once no newer
/// request arrived within the debounce window, and every command cancels the
/// previous output before speaking.
#[derive(Debug, Clone)]
pub struct SpeechQueue {
    voice: VoiceSettings,
    debounce: Duration,
    pending: Option<Pending>,
    superseded: u64,
}

impl SpeechQueue {
    pub fn new(voice: VoiceSettings, debounce: Duration) -> Self {
        Self {
            voice,
            debounce,
            pending: None,
            superseded: 0,
        }
    }

    /// Queue `text`, replacing any request that has not been spoken yet
    pub fn request(&mut self, text: &str, now: Instant) {
        let utterance = self.voice.utterance(text);
        if utterance.text.is_empty() {
            return;
        }

        if self.pending.is_some() {
            self.superseded += 1;
            tracing::debug!("Speech request superseded before playback");
        }

        self.pending = Some(Pending {
            utterance,
            requested_at: now,
        });
    }

    /// Take the pending utterance if its debounce window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<SpeechCommand> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.requested_at) >= self.debounce);

        if ready {
            self.pending
                .take()
                .map(|p| SpeechCommand::CancelAndSpeak(p.utterance))
        } else {
            None
        }
    }

    /// When the pending request becomes due, for hosts that sleep until then
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.requested_at + self.debounce)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> SpeechQueue {
        let voice = VoiceSettings {
            add_exclamations: false,
            ..VoiceSettings::default()
        };
        SpeechQueue::new(voice, Duration::from_millis(100))
    }

    fn spoken_text(command: Option<SpeechCommand>) -> Option<String> {
        command.map(|SpeechCommand::CancelAndSpeak(u)| u.text)
    }

    #[test]
    fn test_request_waits_for_debounce() {
        let mut queue = queue();
        let start = Instant::now();
        queue.request("sol", start);

        assert!(queue.poll(start).is_none());
        assert!(queue.poll(start + Duration::from_millis(99)).is_none());
        assert_eq!(
            spoken_text(queue.poll(start + Duration::from_millis(100))),
            Some("sol".to_string())
        );
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_last_request_wins() {
        let mut queue = queue();
        let start = Instant::now();
        queue.request("sol", start);
        queue.request("luna", start + Duration::from_millis(50));
        queue.request("estrella", start + Duration::from_millis(80));

        // The first request's window has passed, but it was replaced
        assert!(queue.poll(start + Duration::from_millis(120)).is_none());
        assert_eq!(
            spoken_text(queue.poll(start + Duration::from_millis(180))),
            Some("estrella".to_string())
        );
        assert_eq!(queue.superseded_count(), 2);
        assert!(queue.poll(start + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_next_due_and_cancel() {
        let mut queue = queue();
        let start = Instant::now();
        assert_eq!(queue.next_due(), None);

        queue.request("sol", start);
        assert_eq!(queue.next_due(), Some(start + Duration::from_millis(100)));

        queue.cancel();
        assert!(queue.poll(start + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let mut queue = queue();
        let start = Instant::now();
        queue.request("sol", start);
        queue.request("   ", start + Duration::from_millis(10));
        assert_eq!(
            spoken_text(queue.poll(start + Duration::from_millis(100))),
            Some("sol".to_string())
        );
    }

    #[test]
    fn test_utterance_carries_voice_settings() {
        let mut queue = SpeechQueue::new(VoiceSettings::default(), Duration::ZERO);
        let now = Instant::now();
        queue.request("hola", now);
        match queue.poll(now) {
            Some(SpeechCommand::CancelAndSpeak(utterance)) => {
                assert_eq!(utterance.text, "¡hola!");
                assert_eq!(utterance.lang, "es-ES");
            }
            other => panic!("Expected an utterance, got {:?}", other),
        }
    }
}
