use palabras_core::{PointsStore, StoreError};
use palabras_types::PointsRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Points record kept as a small JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFilePointsStore {
    path: PathBuf,
}

impl JsonFilePointsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "points.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PointsStore for JsonFilePointsStore {
    fn load(&self) -> Result<PointsRecord, StoreError> {
        let contents = fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(record)
    }

    /// Write to a sibling temp file first so a crash never leaves half a record
    fn save(&self, record: &PointsRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(record)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!("Saved points to {}", self.path.display());
        Ok(())
    }
}
