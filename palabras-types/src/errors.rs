use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    UnknownMode { mode: String },
    NoActiveSession,
    StaleSession { session_id: String },
    InvalidSessionState { operation: String, current_state: String },
    WordsUnavailable,
    PointsUnavailable,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownMode { mode } => write!(f, "Unknown game mode: {}", mode),
            GameError::NoActiveSession => write!(f, "No active session"),
            GameError::StaleSession { session_id } => {
                write!(f, "Session {} is no longer active", session_id)
            }
            GameError::InvalidSessionState {
                operation,
                current_state,
            } => write!(f, "Cannot {} while session is {}", operation, current_state),
            GameError::WordsUnavailable => write!(f, "No se pudieron cargar las palabras"),
            GameError::PointsUnavailable => write!(f, "No se pudieron guardar los puntos"),
        }
    }
}

/// Raised when a mode name from a URL or request body is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    pub mode: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown game mode: {}", self.mode)
    }
}

impl std::error::Error for ParseModeError {}

impl From<ParseModeError> for GameError {
    fn from(err: ParseModeError) -> Self {
        GameError::UnknownMode { mode: err.mode }
    }
}
