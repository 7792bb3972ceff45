use async_trait::async_trait;
use palabras_types::{GameMode, WordEntry, WordList};
use rand::Rng;
use std::collections::HashSet;

use crate::LoadError;

/// Somewhere the word document can be fetched from
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch(&self) -> Result<WordList, LoadError>;
}

/// Fixed in-memory word list, for embedding and tests
pub struct StaticWordSource {
    words: WordList,
}

impl StaticWordSource {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            words: WordList { words },
        }
    }
}

#[async_trait]
impl WordSource for StaticWordSource {
    async fn fetch(&self) -> Result<WordList, LoadError> {
        Ok(self.words.clone())
    }
}

/// The vocabulary loaded at start-up. Immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    entries: Vec<WordEntry>,
}

impl WordCatalog {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.word = entry.word.trim().to_lowercase();
                entry
            })
            .filter(|entry| !entry.word.is_empty())
            .collect();

        Self { entries }
    }

    /// Fetch the catalog from `source`. Errors are handed to the caller untouched.
    pub async fn load(source: &dyn WordSource) -> Result<Self, LoadError> {
        let list = source.fetch().await?;
        let catalog = Self::new(list.words);
        tracing::info!("Loaded word catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Parse a `{ "words": [...] }` document
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let list: WordList = serde_json::from_str(json)?;
        Ok(Self::new(list.words))
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries playable in `mode` that are not in `exclude`. `Free` ignores difficulty.
    pub fn filter_by_difficulty(
        &self,
        mode: GameMode,
        exclude: &HashSet<String>,
    ) -> Vec<WordEntry> {
        self.entries
            .iter()
            .filter(|entry| match mode.difficulty() {
                Some(difficulty) => entry.difficulty == difficulty,
                None => true,
            })
            .filter(|entry| !exclude.contains(&entry.word))
            .cloned()
            .collect()
    }
}

/// Fisher–Yates shuffle seeded from the thread-local platform RNG
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Fisher–Yates shuffle driven by the given RNG
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use palabras_types::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_catalog() -> WordCatalog {
        WordCatalog::new(vec![
            WordEntry::new("sol", "/img/sol.png", Difficulty::Easy),
            WordEntry::new("luna", "/img/luna.png", Difficulty::Easy),
            WordEntry::new("mariposa", "/img/mariposa.png", Difficulty::Hard),
            WordEntry::new("rojo", "color:red", Difficulty::Easy),
            WordEntry::new("murciélago", "/img/murcielago.png", Difficulty::Hard),
        ])
    }

    fn words(entries: &[WordEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_filter_by_difficulty() {
        let catalog = sample_catalog();
        let none = HashSet::new();

        assert_eq!(
            words(&catalog.filter_by_difficulty(GameMode::Easy, &none)),
            vec!["sol", "luna", "rojo"]
        );
        assert_eq!(
            words(&catalog.filter_by_difficulty(GameMode::Hard, &none)),
            vec!["mariposa", "murciélago"]
        );
        assert_eq!(catalog.filter_by_difficulty(GameMode::Free, &none).len(), 5);
    }

    #[test]
    fn test_filter_excludes_used_words() {
        let catalog = sample_catalog();
        let used: HashSet<String> = ["sol", "rojo"].iter().map(|w| w.to_string()).collect();

        assert_eq!(
            words(&catalog.filter_by_difficulty(GameMode::Easy, &used)),
            vec!["luna"]
        );
        assert_eq!(catalog.filter_by_difficulty(GameMode::Free, &used).len(), 3);
    }

    #[test]
    fn test_filter_can_be_empty() {
        let catalog = sample_catalog();
        let used: HashSet<String> = ["mariposa", "murciélago"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert!(catalog.filter_by_difficulty(GameMode::Hard, &used).is_empty());
    }

    #[test]
    fn test_words_are_normalised_on_load() {
        let catalog = WordCatalog::new(vec![
            WordEntry::new("  Perro ", "", Difficulty::Easy),
            WordEntry::new("   ", "", Difficulty::Easy),
        ]);
        assert_eq!(words(catalog.entries()), vec!["perro"]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"words":[{"palabra":"gato","imagen":"/img/gato.png","dificultad":"facil"}]}"#;
        let catalog = WordCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].word, "gato");

        let result = WordCatalog::from_json(r#"{"palabras": []}"#);
        assert!(matches!(result, Err(LoadError::Malformed(_))));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..50).collect();
        for _ in 0..20 {
            let mut shuffled = shuffle(&items);
            assert_eq!(shuffled.len(), items.len());
            shuffled.sort();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn test_shuffle_with_seed_is_deterministic() {
        let items: Vec<u32> = (0..10).collect();
        let a = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        let b = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_edge_cases() {
        let empty: Vec<u32> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&[42]), vec![42]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Each element should land in the first slot at some point
        let items = vec!['a', 'b', 'c'];
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(shuffle_with(&items, &mut rng)[0]);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = StaticWordSource::new(vec![WordEntry::new("sol", "", Difficulty::Easy)]);
        let catalog = WordCatalog::load(&source).await.unwrap();
        assert_eq!(catalog.len(), 1);
    }

    struct BrokenSource;

    #[async_trait]
    impl WordSource for BrokenSource {
        async fn fetch(&self) -> Result<WordList, LoadError> {
            Err(LoadError::Unreachable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_load_propagates_errors() {
        let result = WordCatalog::load(&BrokenSource).await;
        assert!(matches!(result, Err(LoadError::Unreachable(_))));
    }
}
