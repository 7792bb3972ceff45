use palabras_types::{Difficulty, GameMode};
use std::collections::{HashMap, HashSet};

/// Words already completed per difficulty. Lives in memory only, so a restart
/// makes every word playable again.
#[derive(Debug, Clone, Default)]
pub struct UsedWordSets {
    sets: HashMap<Difficulty, HashSet<String>>,
}

impl UsedWordSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words to exclude when starting `mode`. Free mode never excludes anything.
    pub fn excluded_for(&self, mode: GameMode) -> HashSet<String> {
        mode.difficulty()
            .and_then(|difficulty| self.sets.get(&difficulty))
            .cloned()
            .unwrap_or_default()
    }

    /// Remember `words` as played in `mode`. No-op for free mode.
    pub fn record<'a>(&mut self, mode: GameMode, words: impl IntoIterator<Item = &'a str>) {
        if let Some(difficulty) = mode.difficulty() {
            let set = self.sets.entry(difficulty).or_default();
            set.extend(words.into_iter().map(str::to_string));
        }
    }

    /// Forget the words played in `mode`. Free mode has no set, so this is a no-op.
    pub fn clear(&mut self, mode: GameMode) {
        if let Some(difficulty) = mode.difficulty() {
            self.sets.remove(&difficulty);
        }
    }

    pub fn contains(&self, mode: GameMode, word: &str) -> bool {
        mode.difficulty()
            .and_then(|difficulty| self.sets.get(&difficulty))
            .is_some_and(|set| set.contains(word))
    }

    pub fn count(&self, mode: GameMode) -> usize {
        mode.difficulty()
            .and_then(|difficulty| self.sets.get(&difficulty))
            .map_or(0, HashSet::len)
    }
}
