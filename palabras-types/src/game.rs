use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::ParseModeError;

pub type SessionId = Uuid;

/// Difficulty bucket a word belongs to in the word file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Difficulty {
    #[serde(rename = "facil")]
    Easy,
    #[serde(rename = "dificil")]
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "facil",
            Difficulty::Hard => "dificil",
        }
    }
}

/// Game mode picked on the start screen. `Free` plays every word regardless of difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameMode {
    #[serde(rename = "facil", alias = "easy")]
    Easy,
    #[serde(rename = "dificil", alias = "hard")]
    Hard,
    #[serde(rename = "libre", alias = "free")]
    Free,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Easy, GameMode::Hard, GameMode::Free];

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            GameMode::Easy => Some(Difficulty::Easy),
            GameMode::Hard => Some(Difficulty::Hard),
            GameMode::Free => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Easy => "facil",
            GameMode::Hard => "dificil",
            GameMode::Free => "libre",
        }
    }

    /// Whether the question shows the word itself as a hint
    pub fn shows_hint(&self) -> bool {
        matches!(self, GameMode::Easy)
    }
}

impl From<Difficulty> for GameMode {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => GameMode::Easy,
            Difficulty::Hard => GameMode::Hard,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facil" | "fácil" | "easy" => Ok(GameMode::Easy),
            "dificil" | "difícil" | "hard" => Ok(GameMode::Hard),
            "libre" | "free" => Ok(GameMode::Free),
            other => Err(ParseModeError {
                mode: other.to_string(),
            }),
        }
    }
}

/// One vocabulary entry as stored in the word file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordEntry {
    #[serde(rename = "palabra")]
    pub word: String,
    #[serde(rename = "imagen", default)]
    pub image: String,
    #[serde(rename = "dificultad")]
    pub difficulty: Difficulty,
}

impl WordEntry {
    pub fn new(word: &str, image: &str, difficulty: Difficulty) -> Self {
        Self {
            word: word.to_string(),
            image: image.to_string(),
            difficulty,
        }
    }

    pub fn image_ref(&self) -> ImageRef {
        ImageRef::parse(&self.image)
    }
}

/// Word file document: `{ "words": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordList {
    pub words: Vec<WordEntry>,
}

/// What to show next to the question: a picture, or the word drawn over a colour swatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum ImageRef {
    Url(String),
    Color(String),
}

impl ImageRef {
    pub const COLOR_PREFIX: &'static str = "color:";

    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(Self::COLOR_PREFIX) {
            Some(color) => ImageRef::Color(color.trim().to_string()),
            None => ImageRef::Url(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionState {
    NotStarted,
    InProgress,
    AwaitingNext,
    Finished,  // Every word answered
    Completed, // Nothing left to play in this mode
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

/// Everything the front end needs to render the current question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionView {
    pub position: usize, // 1-based
    pub total: usize,
    pub image: ImageRef,
    pub hint: Option<String>,
    pub max_length: usize,
    pub listens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MilestoneTier {
    Super,     // 5 in a row
    Amazing,   // 10 in a row
    Legendary, // 15 in a row
    Unicorn,   // 20 in a row, streak resets afterwards
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StreakMilestone {
    pub tier: MilestoneTier,
    pub streak: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CelebrationEffect {
    ShowMessage { text: String },
    Speak { text: String },
    Confetti {
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    Unicorn,
    ResetStreak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CelebrationStep {
    pub delay_ms: u64, // From the moment the answer was accepted
    pub effect: CelebrationEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SummaryRating {
    Excellent,
    Good,
    KeepPracticing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionSummary {
    pub score: u32,
    pub total: usize,
    pub stars_earned: u32,
    pub rating: SummaryRating,
    pub closing_line: String,
}

/// A text-to-speech request, rendered by the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}
