use palabras_types::{AnswerResult, GameMode, SessionId, SessionSummary, StreakMilestone};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted {
        session_id: SessionId,
        mode: GameMode,
        total: usize,
    },
    ModeExhausted {
        mode: GameMode,
    },
    AnswerChecked {
        session_id: SessionId,
        result: AnswerResult,
        streak: u32,
    },
    MilestoneReached {
        session_id: SessionId,
        milestone: StreakMilestone,
    },
    StreakReset {
        after_streak: u32,
    },
    SessionFinished {
        session_id: SessionId,
        summary: SessionSummary,
    },
    ModeReset {
        mode: GameMode,
    },
    PointsReset,
}

impl GameEvent {
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            GameEvent::SessionStarted { session_id, .. } => Some(*session_id),
            GameEvent::AnswerChecked { session_id, .. } => Some(*session_id),
            GameEvent::MilestoneReached { session_id, .. } => Some(*session_id),
            GameEvent::SessionFinished { session_id, .. } => Some(*session_id),
            GameEvent::ModeExhausted { .. }
            | GameEvent::StreakReset { .. }
            | GameEvent::ModeReset { .. }
            | GameEvent::PointsReset => None,
        }
    }
}

/// Event handler trait for reacting to game events
pub trait GameEventHandler: Send + Sync {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
