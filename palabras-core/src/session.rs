use palabras_types::{
    AnswerResult, GameMode, QuestionView, SessionId, SessionSnapshot, SessionState,
    SessionSummary, StreakMilestone, SummaryRating, WordEntry,
};
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

use crate::catalog::{WordCatalog, shuffle_with};
use crate::config::GameConfig;
use crate::ledger::ScoreLedger;
use crate::milestones::check_milestone;
use crate::normalize::answers_match;
use crate::used_words::UsedWordSets;
use crate::SessionError;

/// Result of one answer submission
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub result: AnswerResult,
    pub milestone: Option<StreakMilestone>,
}

/// Where the session went after `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    NextQuestion { index: usize },
    Finished { score: u32, total: usize },
}

/// One play-through of a shuffled word list
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: SessionId,
    mode: GameMode,
    state: SessionState,
    words: Vec<WordEntry>,
    index: usize,
    score: u32,
    listens: u32,
    started_at: String,
}

impl QuizSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            state: SessionState::NotStarted,
            words: Vec::new(),
            index: 0,
            score: 0,
            listens: 0,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build the word list for this session. An empty list leaves the session
    /// `Completed`, meaning the mode has nothing left to play.
    pub fn start(
        &mut self,
        catalog: &WordCatalog,
        exclude: &HashSet<String>,
    ) -> Result<SessionState, SessionError> {
        self.start_with(catalog, exclude, &mut rand::rng())
    }

    pub fn start_with<R: Rng + ?Sized>(
        &mut self,
        catalog: &WordCatalog,
        exclude: &HashSet<String>,
        rng: &mut R,
    ) -> Result<SessionState, SessionError> {
        self.expect_state("start", &[SessionState::NotStarted])?;

        let available = catalog.filter_by_difficulty(self.mode, exclude);
        if available.is_empty() {
            tracing::info!("No words left for mode {}", self.mode);
            self.state = SessionState::Completed;
            return Ok(self.state);
        }

        self.words = shuffle_with(&available, rng);
        self.index = 0;
        self.score = 0;
        self.listens = 0;
        self.state = SessionState::InProgress;
        tracing::info!(
            "Started session {} in mode {} with {} words",
            self.id,
            self.mode,
            self.words.len()
        );
        Ok(self.state)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Finished | SessionState::Completed)
    }

    pub fn current_word(&self) -> Result<&WordEntry, SessionError> {
        self.expect_state(
            "read the current word",
            &[SessionState::InProgress, SessionState::AwaitingNext],
        )?;
        self.words
            .get(self.index)
            .ok_or(SessionError::InvalidState {
                operation: "read the current word",
                state: self.state,
            })
    }

    /// Check an answer against the current word, ignoring case and accents.
    /// A wrong answer is a normal outcome; only the wrong state is an error.
    pub fn submit_answer(
        &mut self,
        raw_input: &str,
        ledger: &mut ScoreLedger,
        config: &GameConfig,
    ) -> Result<AnswerOutcome, SessionError> {
        self.expect_state("submit an answer", &[SessionState::InProgress])?;
        let expected = self.current_word()?.word.clone();

        if answers_match(raw_input, &expected) {
            self.score += 1;
            ledger.record_correct();
            let milestone = check_milestone(ledger.current_streak(), config);
            self.state = SessionState::AwaitingNext;

            tracing::debug!(
                "Correct answer '{}' in session {}, streak {}",
                expected,
                self.id,
                ledger.current_streak()
            );
            Ok(AnswerOutcome {
                result: AnswerResult::Correct,
                milestone,
            })
        } else {
            ledger.record_incorrect();
            tracing::debug!(
                "Incorrect answer '{}' for '{}' in session {}",
                raw_input,
                expected,
                self.id
            );
            Ok(AnswerOutcome {
                result: AnswerResult::Incorrect,
                milestone: None,
            })
        }
    }

    /// Move past an answered question. Finishing records the session's words
    /// as used for easy and hard modes.
    pub fn advance(&mut self, used: &mut UsedWordSets) -> Result<Progress, SessionError> {
        self.expect_state("advance", &[SessionState::AwaitingNext])?;

        self.index += 1;
        self.listens = 0;

        if self.index == self.words.len() {
            self.state = SessionState::Finished;
            used.record(self.mode, self.words.iter().map(|w| w.word.as_str()));
            tracing::info!(
                "Session {} finished with {}/{}",
                self.id,
                self.score,
                self.words.len()
            );
            Ok(Progress::Finished {
                score: self.score,
                total: self.words.len(),
            })
        } else {
            self.state = SessionState::InProgress;
            Ok(Progress::NextQuestion { index: self.index })
        }
    }

    /// Ask to hear the current word again. Unlimited.
    pub fn listen(&mut self) -> Result<&str, SessionError> {
        self.expect_state(
            "listen",
            &[SessionState::InProgress, SessionState::AwaitingNext],
        )?;
        self.listens += 1;
        Ok(&self.words[self.index].word)
    }

    pub fn question(&self) -> Option<QuestionView> {
        let entry = self.current_word().ok()?;
        Some(QuestionView {
            position: self.index + 1,
            total: self.words.len(),
            image: entry.image_ref(),
            hint: self.mode.shows_hint().then(|| entry.word.to_uppercase()),
            max_length: entry.word.chars().count(),
            listens: self.listens,
        })
    }

    /// Final tally; only available once every word was answered
    pub fn summary(&self, config: &GameConfig) -> Option<SessionSummary> {
        if self.state != SessionState::Finished {
            return None;
        }

        let total = self.words.len();
        let rating = rate(self.score, total);
        let name = &config.player_name;
        let closing_line = match rating {
            SummaryRating::Excellent => format!("¡Excelente trabajo, {}!", name),
            SummaryRating::Good => format!("¡Muy bien, {}!", name),
            SummaryRating::KeepPracticing => format!("¡Sigue practicando, {}!", name),
        };

        Some(SessionSummary {
            score: self.score,
            total,
            stars_earned: self.score,
            rating,
            closing_line,
        })
    }

    pub fn snapshot(&self, config: &GameConfig) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            mode: self.mode,
            state: self.state,
            score: self.score,
            index: self.index,
            total: self.words.len(),
            question: self.question(),
            summary: self.summary(config),
            started_at: self.started_at.clone(),
        }
    }

    fn expect_state(
        &self,
        operation: &'static str,
        allowed: &[SessionState],
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

/// 80% and up is excellent, 60% and up is good
fn rate(score: u32, total: usize) -> SummaryRating {
    let score = score as usize;
    if score * 10 >= total * 8 {
        SummaryRating::Excellent
    } else if score * 10 >= total * 6 {
        SummaryRating::Good
    } else {
        SummaryRating::KeepPracticing
    }
}
