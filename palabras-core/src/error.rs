use palabras_types::{GameError, SessionId, SessionState};
use thiserror::Error;

/// Failure to obtain the word catalog. Fatal at start-up.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("word source unreachable: {0}")]
    Unreachable(String),
    #[error("word source is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure reading or writing the points record
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("points store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("points record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("points store unavailable: {0}")]
    Unavailable(String),
}

/// Session operation invoked outside the state that allows it
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {operation} while session is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

impl From<SessionError> for GameError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidState { operation, state } => GameError::InvalidSessionState {
                operation: operation.to_string(),
                current_state: format!("{:?}", state),
            },
        }
    }
}

/// Failure of a game-level operation addressed to a session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayError {
    #[error("no active session")]
    NoActiveSession,
    #[error("session {0} is no longer active")]
    StaleSession(SessionId),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<PlayError> for GameError {
    fn from(err: PlayError) -> Self {
        match err {
            PlayError::NoActiveSession => GameError::NoActiveSession,
            PlayError::StaleSession(id) => GameError::StaleSession {
                session_id: id.to_string(),
            },
            PlayError::Session(err) => err.into(),
        }
    }
}
