use palabras_types::{
    AnswerResult, GameMode, PointsRecord, SessionId, SessionSnapshot, SessionState, Utterance,
};

use crate::catalog::WordCatalog;
use crate::config::GameConfig;
use crate::ledger::ScoreLedger;
use crate::milestones::CelebrationPlan;
use crate::session::{AnswerOutcome, Progress, QuizSession};
use crate::speech::SpeechQueue;
use crate::used_words::UsedWordSets;
use crate::{GameEvent, GameEventBus, GameEventHandler, PlayError};

/// Everything the presentation layer needs after an answer
#[derive(Debug, Clone)]
pub struct AnswerReport {
    pub outcome: AnswerOutcome,
    pub feedback: String,
    pub celebration: CelebrationPlan,
    pub points: PointsRecord,
}

/// The single game instance: catalog, ledger, used words and the running
/// session. Constructed by the entry point and handed to whoever drives it.
pub struct PalabrasGame {
    catalog: WordCatalog,
    ledger: ScoreLedger,
    used_words: UsedWordSets,
    session: Option<QuizSession>,
    config: GameConfig,
    event_bus: GameEventBus,
}

impl PalabrasGame {
    pub fn new(catalog: WordCatalog, ledger: ScoreLedger, config: GameConfig) -> Self {
        Self {
            catalog,
            ledger,
            used_words: UsedWordSets::new(),
            session: None,
            config,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn used_words(&self) -> &UsedWordSets {
        &self.used_words
    }

    pub fn points(&self) -> PointsRecord {
        self.ledger.record()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session
            .as_ref()
            .map(|session| session.snapshot(&self.config))
    }

    /// Start a new session in `mode`, abandoning any running one. Returns
    /// `Completed` when every word of the mode has already been played.
    pub fn start(&mut self, mode: GameMode) -> SessionState {
        let mut session = QuizSession::new(mode);
        let exclude = self.used_words.excluded_for(mode);

        let state = match session.start(&self.catalog, &exclude) {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Fresh session {} refused to start: {}", session.id(), e);
                SessionState::Completed
            }
        };

        let event = if state == SessionState::Completed {
            GameEvent::ModeExhausted { mode }
        } else {
            GameEvent::SessionStarted {
                session_id: session.id(),
                mode,
                total: session.total(),
            }
        };

        self.session = Some(session);
        self.event_bus.publish(event);
        state
    }

    /// Forget the words played in `mode` and start over
    pub fn reset_mode(&mut self, mode: GameMode) -> SessionState {
        self.used_words.clear(mode);
        tracing::info!("Cleared used words for mode {}", mode);
        self.event_bus.publish(GameEvent::ModeReset { mode });
        self.start(mode)
    }

    pub fn submit_answer(
        &mut self,
        session_id: SessionId,
        raw_input: &str,
    ) -> Result<AnswerReport, PlayError> {
        let session = Self::active(&mut self.session, session_id)?;
        let outcome = session.submit_answer(raw_input, &mut self.ledger, &self.config)?;

        self.event_bus.publish(GameEvent::AnswerChecked {
            session_id,
            result: outcome.result,
            streak: self.ledger.current_streak(),
        });

        let (feedback, celebration) = match outcome.result {
            AnswerResult::Correct => {
                let celebration = match &outcome.milestone {
                    Some(milestone) => {
                        tracing::info!(
                            "Streak milestone {:?} reached at {}",
                            milestone.tier,
                            milestone.streak
                        );
                        self.event_bus.publish(GameEvent::MilestoneReached {
                            session_id,
                            milestone: milestone.clone(),
                        });
                        CelebrationPlan::for_milestone(milestone, &self.config)
                    }
                    None => CelebrationPlan { steps: Vec::new() },
                };
                (self.config.correct_feedback(), celebration)
            }
            AnswerResult::Incorrect => (
                self.config.incorrect_feedback(),
                CelebrationPlan { steps: Vec::new() },
            ),
        };

        Ok(AnswerReport {
            outcome,
            feedback,
            celebration,
            points: self.ledger.record(),
        })
    }

    pub fn advance(&mut self, session_id: SessionId) -> Result<Progress, PlayError> {
        let session = Self::active(&mut self.session, session_id)?;
        let progress = session.advance(&mut self.used_words)?;

        if let Progress::Finished { .. } = progress {
            if let Some(summary) = session.summary(&self.config) {
                self.event_bus.publish(GameEvent::SessionFinished {
                    session_id,
                    summary,
                });
            }
        }

        Ok(progress)
    }

    /// Speak the current word again
    pub fn listen(&mut self, session_id: SessionId) -> Result<Utterance, PlayError> {
        let session = Self::active(&mut self.session, session_id)?;
        let word = session.listen()?;
        Ok(self.config.voice.utterance(word))
    }

    /// Utterance for free-play text typed by the player
    pub fn speak(&self, text: &str) -> Utterance {
        self.config.voice.utterance(text)
    }

    /// A speech queue configured with this game's voice and debounce window
    pub fn speech_queue(&self) -> SpeechQueue {
        SpeechQueue::new(
            self.config.voice.clone(),
            self.config.timers.speech_debounce(),
        )
    }

    /// Delayed half of the unicorn milestone: the streak drops back to zero
    /// while stars and the best streak stay
    pub fn apply_unicorn_reset(&mut self) {
        let after_streak = self.ledger.current_streak();
        self.ledger.reset_streak();
        tracing::info!("Unicorn streak reset after {} in a row", after_streak);
        self.event_bus
            .publish(GameEvent::StreakReset { after_streak });
    }

    pub fn reset_points(&mut self) {
        self.ledger.reset();
        tracing::info!("Points reset");
        self.event_bus.publish(GameEvent::PointsReset);
    }

    pub fn restore_points(&mut self, record: PointsRecord) -> PointsRecord {
        self.ledger.restore(record);
        self.ledger.record()
    }

    fn active(
        session: &mut Option<QuizSession>,
        session_id: SessionId,
    ) -> Result<&mut QuizSession, PlayError> {
        let session = session.as_mut().ok_or(PlayError::NoActiveSession)?;
        if session.id() != session_id {
            return Err(PlayError::StaleSession(session_id));
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionError;
    use palabras_types::{Difficulty, MilestoneTier, WordEntry};

    fn game_with(words: &[(&str, Difficulty)]) -> PalabrasGame {
        let entries = words
            .iter()
            .map(|(w, d)| WordEntry::new(w, "", *d))
            .collect();
        PalabrasGame::new(
            WordCatalog::new(entries),
            ScoreLedger::in_memory(),
            GameConfig::default(),
        )
    }

    fn current_word(game: &PalabrasGame) -> String {
        game.session().unwrap().current_word().unwrap().word.clone()
    }

    #[test]
    fn test_stale_session_is_rejected() {
        let mut game = game_with(&[("sol", Difficulty::Easy)]);
        game.start(GameMode::Easy);
        let old_id = game.session().unwrap().id();
        game.start(GameMode::Easy);

        let err = game.submit_answer(old_id, "sol").unwrap_err();
        assert_eq!(err, PlayError::StaleSession(old_id));
    }

    #[test]
    fn test_no_session_yet() {
        let mut game = game_with(&[("sol", Difficulty::Easy)]);
        let err = game.advance(uuid::Uuid::new_v4()).unwrap_err();
        assert_eq!(err, PlayError::NoActiveSession);
        assert!(game.snapshot().is_none());
    }

    #[test]
    fn test_invalid_state_surfaces_as_session_error() {
        let mut game = game_with(&[("sol", Difficulty::Easy)]);
        game.start(GameMode::Easy);
        let id = game.session().unwrap().id();

        let err = game.advance(id).unwrap_err();
        assert!(matches!(
            err,
            PlayError::Session(SessionError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_feedback_and_points_in_report() {
        let mut game = game_with(&[("sol", Difficulty::Easy)]);
        game.start(GameMode::Easy);
        let id = game.session().unwrap().id();

        let wrong = game.submit_answer(id, "sal").unwrap();
        assert_eq!(wrong.feedback, "Inténtalo otra vez 💜");
        assert!(wrong.celebration.is_empty());

        let right = game.submit_answer(id, "SOL").unwrap();
        assert_eq!(right.feedback, "¡Muy bien, Olivia! 🎉");
        assert_eq!(right.points, PointsRecord::new(1, 1, 1));
    }

    #[test]
    fn test_unicorn_reset_keeps_stars_and_max() {
        let words: Vec<(String, Difficulty)> = (0..20)
            .map(|i| (format!("palabra{}", i), Difficulty::Hard))
            .collect();
        let refs: Vec<(&str, Difficulty)> = words.iter().map(|(w, d)| (w.as_str(), *d)).collect();
        let mut game = game_with(&refs);
        game.start(GameMode::Hard);
        let id = game.session().unwrap().id();

        let mut last = None;
        for _ in 0..20 {
            let word = current_word(&game);
            last = Some(game.submit_answer(id, &word).unwrap());
            game.advance(id).unwrap();
        }

        let report = last.unwrap();
        assert_eq!(
            report.outcome.milestone.as_ref().unwrap().tier,
            MilestoneTier::Unicorn
        );
        assert!(report.celebration.streak_reset_delay().is_some());
        assert_eq!(game.points(), PointsRecord::new(20, 20, 20));

        game.apply_unicorn_reset();
        assert_eq!(game.points(), PointsRecord::new(20, 0, 20));
    }

    #[test]
    fn test_listen_and_speak_use_voice() {
        let mut game = game_with(&[("sol", Difficulty::Easy)]);
        game.start(GameMode::Easy);
        let id = game.session().unwrap().id();

        assert_eq!(game.listen(id).unwrap().text, "¡sol!");
        assert_eq!(game.speak("hola mamá").text, "¡hola mamá!");
        assert_eq!(game.snapshot().unwrap().question.unwrap().listens, 1);
    }

    #[test]
    fn test_restore_and_reset_points() {
        let mut game = game_with(&[("sol", Difficulty::Easy)]);
        assert_eq!(
            game.restore_points(PointsRecord::new(8, 3, 1)),
            PointsRecord::new(8, 3, 3)
        );
        game.reset_points();
        assert_eq!(game.points(), PointsRecord::default());
    }

    #[test]
    fn test_speech_queue_uses_game_voice() {
        let game = game_with(&[("sol", Difficulty::Easy)]);
        let mut queue = game.speech_queue();
        let now = std::time::Instant::now();

        queue.request("luna", now);
        queue.request("sol", now);
        let due = queue.next_due().unwrap();
        assert_eq!(due, now + game.config().timers.speech_debounce());

        let Some(crate::SpeechCommand::CancelAndSpeak(utterance)) = queue.poll(due) else {
            panic!("expected a due utterance");
        };
        assert_eq!(utterance.text, "¡sol!");
        assert_eq!(queue.superseded_count(), 1);
    }
}
