use palabras_types::Utterance;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for one game: who is playing, how streaks are celebrated, how the
/// voice sounds. Every field has a default, so a partial JSON file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub player_name: String,
    pub streaks: StreakConfig,
    pub timers: TimerConfig,
    pub voice: VoiceSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "Olivia".to_string(),
            streaks: StreakConfig::default(),
            timers: TimerConfig::default(),
            voice: VoiceSettings::default(),
        }
    }
}

impl GameConfig {
    pub fn with_player_name(mut self, name: &str) -> Self {
        self.player_name = name.to_string();
        self
    }

    pub fn correct_feedback(&self) -> String {
        format!("¡Muy bien, {}! 🎉", self.player_name)
    }

    pub fn incorrect_feedback(&self) -> String {
        "Inténtalo otra vez 💜".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreakConfig {
    /// Ascending streak counts that trigger a celebration; the last one is the unicorn tier
    pub milestones: Vec<u32>,
    pub reset_after_unicorn: bool,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            milestones: vec![5, 10, 15, 20],
            reset_after_unicorn: true,
        }
    }
}

/// Presentation timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimerConfig {
    pub feedback_ms: u64,
    pub transition_ms: u64,
    pub milestone_delay_ms: u64,
    pub celebration_ms: u64,
    pub unicorn_reset_ms: u64,
    pub confetti_ms: u64,
    pub speech_debounce_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            feedback_ms: 2000,
            transition_ms: 500,
            milestone_delay_ms: 1500,
            celebration_ms: 4000,
            unicorn_reset_ms: 3000,
            confetti_ms: 6000,
            speech_debounce_ms: 100,
        }
    }
}

impl TimerConfig {
    pub fn speech_debounce(&self) -> Duration {
        Duration::from_millis(self.speech_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceSettings {
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub add_exclamations: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: "es-ES".to_string(),
            rate: 0.4,
            pitch: 2.0,
            volume: 1.0,
            add_exclamations: true,
        }
    }
}

impl VoiceSettings {
    /// Build the utterance for `text`, clamping the voice parameters to what
    /// browsers accept
    pub fn utterance(&self, text: &str) -> Utterance {
        let text = text.trim();
        let text = if self.add_exclamations {
            exclaim(text)
        } else {
            text.to_string()
        };

        Utterance {
            text,
            lang: self.language.clone(),
            rate: self.rate.clamp(0.1, 2.0),
            pitch: self.pitch.clamp(0.1, 2.0),
            volume: self.volume.clamp(0.0, 1.0),
        }
    }
}

/// Wrap text in Spanish exclamation marks unless it already carries them
fn exclaim(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let opening = if text.starts_with('¡') { "" } else { "¡" };
    let closing = if text.ends_with('!') { "" } else { "!" };
    format!("{}{}{}", opening, text, closing)
}
