use async_trait::async_trait;
use palabras_core::{LoadError, WordSource};
use palabras_types::{GameMode, WordList};
use std::path::PathBuf;

/// Word document read from a local JSON file
#[derive(Debug, Clone)]
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WordSource for FileWordSource {
    async fn fetch(&self) -> Result<WordList, LoadError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Unreachable(format!("{}: {}", self.path.display(), e)))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Word document served by an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    client: reqwest::Client,
    url: String,
}

impl HttpWordSource {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn fetch(&self) -> Result<WordList, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoadError::Unreachable(format!("{}: {}", self.url, e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Unreachable(format!("{}: {}", self.url, e)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Reads the word file on every call, so edits show up without a restart
pub struct WordRepository {
    source: Box<dyn WordSource>,
}

impl WordRepository {
    pub fn new(source: Box<dyn WordSource>) -> Self {
        Self { source }
    }

    pub async fn all(&self) -> Result<WordList, LoadError> {
        self.source.fetch().await
    }

    /// Entries of `mode` exactly as stored. Free mode returns everything.
    pub async fn by_mode(&self, mode: GameMode) -> Result<WordList, LoadError> {
        let mut list = self.source.fetch().await?;
        if let Some(difficulty) = mode.difficulty() {
            list.words.retain(|entry| entry.difficulty == difficulty);
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palabras_types::Difficulty;
    use std::fs;
    use tempfile::tempdir;

    const WORDS: &str = r#"{
        "words": [
            { "palabra": "sol", "imagen": "/img/sol.png", "dificultad": "facil" },
            { "palabra": "rojo", "imagen": "color:red", "dificultad": "facil" },
            { "palabra": "mariposa", "imagen": "/img/mariposa.png", "dificultad": "dificil" }
        ]
    }"#;

    #[tokio::test]
    async fn test_file_source_reads_words() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, WORDS).unwrap();

        let list = FileWordSource::new(&path).fetch().await.unwrap();
        assert_eq!(list.words.len(), 3);
        assert_eq!(list.words[2].difficulty, Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileWordSource::new(dir.path().join("nope.json")).fetch().await;
        assert!(matches!(result, Err(LoadError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_file_source_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"{"words": [{"palabra": 3}]}"#).unwrap();

        let result = FileWordSource::new(&path).fetch().await;
        assert!(matches!(result, Err(LoadError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_repository_filters_by_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, WORDS).unwrap();
        let repository = WordRepository::new(Box::new(FileWordSource::new(&path)));

        assert_eq!(repository.by_mode(GameMode::Easy).await.unwrap().words.len(), 2);
        assert_eq!(repository.by_mode(GameMode::Hard).await.unwrap().words.len(), 1);
        assert_eq!(repository.by_mode(GameMode::Free).await.unwrap().words.len(), 3);
    }

    #[tokio::test]
    async fn test_repository_sees_file_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, WORDS).unwrap();
        let repository = WordRepository::new(Box::new(FileWordSource::new(&path)));
        assert_eq!(repository.all().await.unwrap().words.len(), 3);

        fs::write(&path, r#"{"words": []}"#).unwrap();
        assert!(repository.all().await.unwrap().words.is_empty());
    }

    #[tokio::test]
    async fn test_repository_returns_entries_as_stored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(
            &path,
            r#"{"words": [
                { "palabra": " Árbol ", "imagen": "/img/arbol.png", "dificultad": "facil" },
                { "palabra": "", "imagen": "color:blue", "dificultad": "facil" }
            ]}"#,
        )
        .unwrap();
        let repository = WordRepository::new(Box::new(FileWordSource::new(&path)));

        let all = repository.all().await.unwrap();
        let easy = repository.by_mode(GameMode::Easy).await.unwrap();
        assert_eq!(easy, all);
        assert_eq!(easy.words[0].word, " Árbol ");
        assert_eq!(easy.words.len(), 2);
    }
}
