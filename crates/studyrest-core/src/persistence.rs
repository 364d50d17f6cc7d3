//! Snapshot persistence over a single string slot.
//!
//! Only the raw minute values and the sequencer position are stored. Sections
//! are re-derived on restore, so a change to how rest time is computed always
//! applies to resumed sessions too.
//!
//! The JSON keys match the browser build's `timerAppState` value, so a slot
//! exported from there loads here unchanged.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::sequencer::Phase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    #[serde(rename = "studyTimes")]
    pub raw_study_minutes: Vec<f64>,
    #[serde(rename = "currentIndex")]
    pub current_index: usize,
    #[serde(rename = "remaining")]
    pub remaining_secs: u64,
    #[serde(rename = "currentPhase")]
    pub phase: Phase,
    #[serde(rename = "isPaused")]
    pub paused: bool,
    /// False when only editor entries were saved and no plan was running.
    /// Missing in older slots, which were only ever written mid-plan.
    #[serde(rename = "planActive", default = "default_true")]
    pub plan_active: bool,
}

fn default_true() -> bool {
    true
}

/// The durable slot. Last write wins; there is no versioning.
pub trait SnapshotStore {
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&mut self, value: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process slot. Clones share the same value, so a test can keep one
/// clone and hand the other to a controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(value.into()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.get())
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

/// Serializes snapshots into a [`SnapshotStore`].
#[derive(Debug)]
pub struct PersistenceManager<S> {
    store: S,
}

impl<S: SnapshotStore> PersistenceManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the slot with `snapshot`.
    ///
    /// # Errors
    /// Returns an error if serialization or the slot write fails.
    pub fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.store.write(&json)?;
        Ok(())
    }

    /// Read the slot. Absent, unreadable and malformed values all come back
    /// as `None`.
    pub fn load(&self) -> Option<PersistedSnapshot> {
        let raw = match self.store.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read saved session, starting idle");
                return None;
            }
        };
        match serde_json::from_str::<PersistedSnapshot>(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed saved session");
                None
            }
        }
    }

    /// Remove the slot.
    ///
    /// # Errors
    /// Returns an error if the slot cannot be cleared.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        Ok(())
    }
}
