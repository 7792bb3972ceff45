use palabras_types::PointsRecord;
use std::sync::Mutex;

use crate::StoreError;

/// Backing store for the points record
pub trait PointsStore: Send + Sync {
    fn load(&self) -> Result<PointsRecord, StoreError>;
    fn save(&self, record: &PointsRecord) -> Result<(), StoreError>;
}

/// Keeps the record in memory. Starts empty unless seeded.
#[derive(Debug, Default)]
pub struct MemoryPointsStore {
    record: Mutex<Option<PointsRecord>>,
}

impl MemoryPointsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PointsRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    pub fn saved(&self) -> Option<PointsRecord> {
        self.record.lock().ok().and_then(|guard| *guard)
    }
}

impl PointsStore for MemoryPointsStore {
    fn load(&self) -> Result<PointsRecord, StoreError> {
        let guard = self
            .record
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        guard.ok_or_else(|| StoreError::Unavailable("no record saved".to_string()))
    }

    fn save(&self, record: &PointsRecord) -> Result<(), StoreError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        *guard = Some(*record);
        Ok(())
    }
}

/// Primary store mirrored into a backup. Reads fall back to the backup when the
/// primary fails; writes go to both and succeed if either one does.
pub struct MirroredPointsStore<P, B> {
    primary: P,
    backup: B,
}

impl<P: PointsStore, B: PointsStore> MirroredPointsStore<P, B> {
    pub fn new(primary: P, backup: B) -> Self {
        Self { primary, backup }
    }
}

impl<P: PointsStore, B: PointsStore> PointsStore for MirroredPointsStore<P, B> {
    fn load(&self) -> Result<PointsRecord, StoreError> {
        match self.primary.load() {
            Ok(record) => {
                if let Err(e) = self.backup.save(&record) {
                    tracing::warn!("Failed to refresh points backup: {}", e);
                }
                Ok(record)
            }
            Err(e) => {
                tracing::warn!("Primary points store failed, using backup: {}", e);
                self.backup.load()
            }
        }
    }

    fn save(&self, record: &PointsRecord) -> Result<(), StoreError> {
        let primary = self.primary.save(record);
        let backup = self.backup.save(record);
        match (primary, backup) {
            (Err(e), Err(_)) => Err(e),
            (Err(e), Ok(())) => {
                tracing::warn!("Primary points store failed, saved to backup only: {}", e);
                Ok(())
            }
            (Ok(()), _) => Ok(()),
        }
    }
}

/// Cumulative stars and streaks. Every mutation is written through to the
/// store immediately; store failures are logged and never reach the caller.
pub struct ScoreLedger {
    record: PointsRecord,
    store: Box<dyn PointsStore>,
}

impl ScoreLedger {
    /// Read the persisted record, falling back to zeros on any error
    pub fn load(store: Box<dyn PointsStore>) -> Self {
        let record = match store.load() {
            Ok(record) => record.repaired(),
            Err(e) => {
                tracing::warn!("Could not load points, starting from zero: {}", e);
                PointsRecord::default()
            }
        };

        Self { record, store }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryPointsStore::new()))
    }

    pub fn record(&self) -> PointsRecord {
        self.record
    }

    pub fn total_stars(&self) -> u32 {
        self.record.total_stars
    }

    pub fn current_streak(&self) -> u32 {
        self.record.current_streak
    }

    pub fn max_streak(&self) -> u32 {
        self.record.max_streak
    }

    pub fn record_correct(&mut self) {
        self.record.total_stars = self.record.total_stars.saturating_add(1);
        self.record.current_streak = self.record.current_streak.saturating_add(1);
        self.record.max_streak = self.record.max_streak.max(self.record.current_streak);
        self.persist();
    }

    pub fn record_incorrect(&mut self) {
        self.record.current_streak = 0;
        self.persist();
    }

    /// Drop the current streak without touching stars or the best streak
    pub fn reset_streak(&mut self) {
        self.record.current_streak = 0;
        self.persist();
    }

    /// Zero everything. Confirmation is up to the caller.
    pub fn reset(&mut self) {
        self.record = PointsRecord::default();
        self.persist();
    }

    /// Replace the record with one supplied from outside, e.g. a client that
    /// kept playing while offline
    pub fn restore(&mut self, record: PointsRecord) {
        self.record = record.repaired();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.record) {
            tracing::error!("Failed to save points, continuing in memory: {}", e);
        }
    }
}
