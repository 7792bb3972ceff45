use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Persisted star and streak counters. Missing fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PointsRecord {
    #[serde(default)]
    pub total_stars: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub max_streak: u32,
}

impl PointsRecord {
    pub fn new(total_stars: u32, current_streak: u32, max_streak: u32) -> Self {
        Self {
            total_stars,
            current_streak,
            max_streak,
        }
    }

    /// Raise `max_streak` so that it never sits below the current streak
    pub fn repaired(mut self) -> Self {
        self.max_streak = self.max_streak.max(self.current_streak);
        self
    }
}
