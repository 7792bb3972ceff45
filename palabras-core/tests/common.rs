#![allow(dead_code)]

use palabras_core::{
    GameConfig, GameEvent, GameEventHandler, PalabrasGame, ScoreLedger, WordCatalog,
};
use palabras_types::{Difficulty, GameMode, SessionId, SessionState, WordEntry};
use std::sync::{Arc, Mutex};

/// The two-word catalog used by the walkthrough scenarios
pub fn sol_luna_catalog() -> WordCatalog {
    WordCatalog::new(vec![
        WordEntry::new("sol", "/img/sol.png", Difficulty::Easy),
        WordEntry::new("luna", "/img/luna.png", Difficulty::Easy),
    ])
}

/// A mixed catalog with both difficulties and a colour placeholder
pub fn create_test_catalog() -> WordCatalog {
    WordCatalog::new(vec![
        WordEntry::new("sol", "/img/sol.png", Difficulty::Easy),
        WordEntry::new("luna", "/img/luna.png", Difficulty::Easy),
        WordEntry::new("rojo", "color:red", Difficulty::Easy),
        WordEntry::new("mariposa", "/img/mariposa.png", Difficulty::Hard),
        WordEntry::new("murciélago", "/img/murcielago.png", Difficulty::Hard),
    ])
}

pub fn create_test_game(catalog: WordCatalog) -> PalabrasGame {
    PalabrasGame::new(catalog, ScoreLedger::in_memory(), GameConfig::default())
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Creates a game wired to a fresh event collector
pub fn create_observed_game(catalog: WordCatalog) -> (PalabrasGame, EventCollector) {
    let mut game = create_test_game(catalog);
    let collector = EventCollector::new();
    game.add_event_handler(Box::new(collector.clone()));
    (game, collector)
}

pub fn session_id(game: &PalabrasGame) -> SessionId {
    game.session().expect("session should exist").id()
}

pub fn current_word(game: &PalabrasGame) -> String {
    game.session()
        .expect("session should exist")
        .current_word()
        .expect("session should have a current word")
        .word
        .clone()
}

/// Answer every remaining question correctly
pub fn play_to_the_end(game: &mut PalabrasGame) {
    let id = session_id(game);
    while game.session().map(|s| s.state()) == Some(SessionState::InProgress) {
        let word = current_word(game);
        game.submit_answer(id, &word).unwrap();
        game.advance(id).unwrap();
    }
}

/// Asserts that the running session is in a specific state
pub fn assert_session_state(game: &PalabrasGame, expected: SessionState) {
    let actual = game.session().map(|s| s.state());
    assert_eq!(
        actual,
        Some(expected),
        "Expected session state {:?}, got {:?}",
        expected,
        actual
    );
}

pub fn start_and_expect(game: &mut PalabrasGame, mode: GameMode, expected: SessionState) {
    let state = game.start(mode);
    assert_eq!(state, expected, "Starting {} returned {:?}", mode, state);
}
