use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use palabras_core::{GameEvent, GameEventHandler, PalabrasGame};
use palabras_types::{
    AnswerResponse, GameError, GameMode, PointsRecord, SessionId, SessionSnapshot, Utterance,
};

/// Writes every game event to the log
struct EventLogger;

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: GameEvent) {
        match &event {
            GameEvent::SessionStarted {
                session_id,
                mode,
                total,
            } => info!("Session {} started in {} with {} words", session_id, mode, total),
            GameEvent::ModeExhausted { mode } => info!("All words of mode {} played", mode),
            GameEvent::SessionFinished {
                session_id,
                summary,
            } => info!(
                "Session {} finished: {}/{} correct",
                session_id, summary.score, summary.total
            ),
            _ => debug!("Game event: {:?}", event),
        }
    }
}

/// Hosts the one game of this server. Handlers lock it per request.
pub struct GameManager {
    game: Arc<RwLock<PalabrasGame>>,
}

impl GameManager {
    pub fn new(mut game: PalabrasGame) -> Self {
        game.add_event_handler(Box::new(EventLogger));
        Self {
            game: Arc::new(RwLock::new(game)),
        }
    }

    pub async fn points(&self) -> PointsRecord {
        self.game.read().await.points()
    }

    pub async fn restore_points(&self, record: PointsRecord) -> Result<PointsRecord, GameError> {
        with_ledger_write(&self.game, move |game| game.restore_points(record)).await
    }

    pub async fn reset_points(&self) -> Result<PointsRecord, GameError> {
        with_ledger_write(&self.game, |game| {
            game.reset_points();
            game.points()
        })
        .await
    }

    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        self.game.read().await.snapshot()
    }

    /// Start a session in `mode`. A mode whose words are all played comes
    /// back in the `Completed` state.
    pub async fn start_session(&self, mode: GameMode) -> Result<SessionSnapshot, GameError> {
        let mut game = self.game.write().await;
        game.start(mode);
        game.snapshot().ok_or(GameError::NoActiveSession)
    }

    pub async fn reset_mode(&self, mode: GameMode) -> Result<SessionSnapshot, GameError> {
        let mut game = self.game.write().await;
        game.reset_mode(mode);
        game.snapshot().ok_or(GameError::NoActiveSession)
    }

    pub async fn submit_answer(
        &self,
        session_id: SessionId,
        answer: &str,
    ) -> Result<AnswerResponse, GameError> {
        let answer = answer.to_string();
        let (report, session) = with_ledger_write(&self.game, move |game| {
            let report = game.submit_answer(session_id, &answer)?;
            let session = game.snapshot().ok_or(GameError::NoActiveSession)?;
            Ok::<_, GameError>((report, session))
        })
        .await??;

        if let Some(delay) = report.celebration.streak_reset_delay() {
            self.schedule_streak_reset(delay);
        }

        Ok(AnswerResponse {
            result: report.outcome.result,
            feedback: report.feedback,
            milestone: report.outcome.milestone,
            celebration: report.celebration.steps,
            points: report.points,
            session,
        })
    }

    pub async fn advance(&self, session_id: SessionId) -> Result<SessionSnapshot, GameError> {
        let mut game = self.game.write().await;
        game.advance(session_id)?;
        game.snapshot().ok_or(GameError::NoActiveSession)
    }

    pub async fn listen(&self, session_id: SessionId) -> Result<Utterance, GameError> {
        Ok(self.game.write().await.listen(session_id)?)
    }

    pub async fn speak(&self, text: &str) -> Utterance {
        self.game.read().await.speak(text)
    }

    /// The unicorn streak goes back to zero once the celebration is over
    fn schedule_streak_reset(&self, delay: Duration) {
        let game = self.game.clone();
        debug!("Streak reset scheduled in {:?}", delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = with_ledger_write(&game, PalabrasGame::apply_unicorn_reset).await {
                tracing::error!("Unicorn streak reset did not run: {}", e);
            }
        });
    }
}

/// Run an operation that writes the points file. Store writes are blocking
/// file I/O, so they go to the blocking pool instead of a runtime worker.
async fn with_ledger_write<T, F>(game: &Arc<RwLock<PalabrasGame>>, operation: F) -> Result<T, GameError>
where
    T: Send + 'static,
    F: FnOnce(&mut PalabrasGame) -> T + Send + 'static,
{
    let game = game.clone();
    match tokio::task::spawn_blocking(move || operation(&mut game.blocking_write())).await {
        Ok(value) => Ok(value),
        Err(e) => match e.try_into_panic() {
            Ok(panic) => std::panic::resume_unwind(panic),
            Err(e) => {
                tracing::error!("Points update was cancelled: {}", e);
                Err(GameError::PointsUnavailable)
            }
        },
    }
}
