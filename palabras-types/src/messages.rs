use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    AnswerResult, CelebrationStep, GameMode, PointsRecord, QuestionView, SessionId,
    SessionState, SessionSummary, StreakMilestone,
};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StartSessionRequest {
    pub mode: GameMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnswerRequest {
    pub session_id: SessionId,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResetModeRequest {
    pub mode: GameMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpeakRequest {
    pub text: String,
}

/// Public view of the running session
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub mode: GameMode,
    pub state: SessionState,
    pub score: u32,
    pub index: usize,
    pub total: usize,
    pub question: Option<QuestionView>,
    pub summary: Option<SessionSummary>,
    pub started_at: String, // ISO 8601 string
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnswerResponse {
    pub result: AnswerResult,
    pub feedback: String,
    pub milestone: Option<StreakMilestone>,
    pub celebration: Vec<CelebrationStep>,
    pub points: PointsRecord,
    pub session: SessionSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
