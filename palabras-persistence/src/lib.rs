pub mod repositories;

use anyhow::{Context, Result};
use palabras_core::{MirroredPointsStore, PointsStore, WordSource};
use std::path::Path;

use crate::repositories::{FileWordSource, HttpWordSource, JsonFilePointsStore};

/// Build the points store for the given files. With a backup file the record
/// is mirrored into it and read from it when the primary file is unusable.
pub fn open_points_store(path: &Path, backup: Option<&Path>) -> Result<Box<dyn PointsStore>> {
    for file in std::iter::once(path).chain(backup) {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create points directory {}", parent.display())
            })?;
        }
    }

    let primary = JsonFilePointsStore::new(path);
    Ok(match backup {
        Some(backup) => Box::new(MirroredPointsStore::new(
            primary,
            JsonFilePointsStore::new(backup),
        )),
        None => Box::new(primary),
    })
}

/// Word source for the configured location: an HTTP URL wins over the file
pub fn open_word_source(file: &Path, url: Option<&str>) -> Box<dyn WordSource> {
    match url {
        Some(url) => Box::new(HttpWordSource::new(url)),
        None => Box::new(FileWordSource::new(file)),
    }
}
