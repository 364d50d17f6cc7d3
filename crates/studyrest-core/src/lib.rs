//! # Studyrest Core Library
//!
//! Core logic for the Studyrest study/rest interval timer. The user enters a
//! list of study durations in minutes; each becomes a section with a
//! proportional rest phase, and the sections run back to back, surviving
//! restarts through a single saved snapshot.
//!
//! ## Architecture
//!
//! - **Plan**: minute values → [`Section`]s (pure derivation) and the
//!   [`SectionList`] editor holding raw entries
//! - **Timer**: [`PhaseTimer`], a one-countdown slot driven by external ticks
//! - **Sequencer**: the pure [`transition`] function and the
//!   [`PlanController`] that applies it
//! - **Persistence**: [`PersistedSnapshot`] written to one [`SnapshotStore`]
//!   slot after every tick and transition
//! - **Storage**: SQLite kv table and TOML configuration

pub mod display;
pub mod error;
pub mod events;
pub mod notify;
pub mod persistence;
pub mod plan;
pub mod sequencer;
pub mod storage;
pub mod timer;

pub use display::{format_clock, phase_label};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{Notifier, SilentNotifier};
pub use persistence::{MemoryStore, PersistedSnapshot, PersistenceManager, SnapshotStore};
pub use plan::{Plan, Section, SectionList};
pub use sequencer::{transition, Input, Phase, PlanController, SequencerState, Status, Transition};
pub use storage::{Config, Database, KvSlot};
pub use timer::{PhaseTimer, TickOutcome, TimerHandle};
