//! Plan controller.
//!
//! Owns the editor, the plan, the sequencer state and the single
//! [`PhaseTimer`]. It applies [`transition`] results, plays cues and writes a
//! snapshot after every tick and every state change. Like the timer, it has
//! no clock: the caller drives [`PlanController::tick`] once per second.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = PlanController::new(store, notifier);
//! controller.resume_saved();
//! controller.start_plan(&[25.0, 25.0])?;
//! // In a loop, once per second:
//! for event in controller.tick()? { render(&event) }
//! ```

use chrono::Utc;

use super::state::{transition, Input, Phase, SequencerState, Status, Transition};
use crate::error::Result;
use crate::events::Event;
use crate::notify::Notifier;
use crate::persistence::{PersistedSnapshot, PersistenceManager, SnapshotStore};
use crate::plan::{Plan, SectionList};
use crate::timer::{PhaseTimer, TickOutcome};

pub struct PlanController<S, N> {
    editor: SectionList,
    plan: Option<Plan>,
    state: Option<SequencerState>,
    timer: PhaseTimer,
    persistence: PersistenceManager<S>,
    notifier: N,
}

impl<S: SnapshotStore, N: Notifier> PlanController<S, N> {
    /// Create an idle controller with a single blank editor entry.
    /// Nothing is read from `store` until [`resume_saved`](Self::resume_saved).
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            editor: SectionList::new(),
            plan: None,
            state: None,
            timer: PhaseTimer::new(),
            persistence: PersistenceManager::new(store),
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> Status {
        match (&self.plan, &self.state) {
            (Some(plan), Some(state)) => state.status(plan),
            _ => Status::Idle,
        }
    }

    pub fn state(&self) -> Option<&SequencerState> {
        self.state.as_ref()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn editor(&self) -> &SectionList {
        &self.editor
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The value that would be written to the slot right now.
    pub fn snapshot(&self) -> PersistedSnapshot {
        let raw_study_minutes = self.editor.entries().to_vec();
        match (&self.plan, &self.state) {
            (Some(_), Some(state)) => PersistedSnapshot {
                raw_study_minutes,
                current_index: state.current_index,
                remaining_secs: state.remaining_secs,
                phase: state.phase,
                paused: state.paused,
                plan_active: true,
            },
            _ => PersistedSnapshot {
                raw_study_minutes,
                current_index: 0,
                remaining_secs: 0,
                phase: Phase::Study,
                paused: false,
                plan_active: false,
            },
        }
    }

    /// Full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        let state = self.state.unwrap_or(SequencerState {
            current_index: 0,
            phase: Phase::Study,
            remaining_secs: 0,
            paused: false,
        });
        Event::StateSnapshot {
            status: self.status(),
            section_index: state.current_index,
            sections: self.plan.as_ref().map(Plan::len).unwrap_or(0),
            phase: state.phase,
            remaining_secs: state.remaining_secs,
            paused: state.paused,
            entries: self.editor.entries().to_vec(),
            at: Utc::now(),
        }
    }

    // ── Editor ───────────────────────────────────────────────────────

    /// Append an editor entry. Does not affect a running plan.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    pub fn add_entry(&mut self, minutes: f64) -> Result<usize> {
        let index = self.editor.add(minutes);
        self.save()?;
        Ok(index)
    }

    /// # Errors
    /// Returns an error for a bad index or a failed snapshot write.
    pub fn set_entry(&mut self, index: usize, minutes: f64) -> Result<()> {
        self.editor.set(index, minutes)?;
        self.save()
    }

    /// # Errors
    /// Returns an error for a bad index or a failed snapshot write.
    pub fn remove_entry(&mut self, index: usize) -> Result<f64> {
        let removed = self.editor.remove(index)?;
        self.save()?;
        Ok(removed)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the editor entries with `minutes` and start from the first
    /// section. Any running plan is replaced.
    ///
    /// # Errors
    /// Returns a validation error when no entry is a positive duration; the
    /// controller is left exactly as it was.
    pub fn start_plan(&mut self, minutes: &[f64]) -> Result<Vec<Event>> {
        let plan = Plan::from_minutes(minutes)?;
        let state = SequencerState::initial(&plan);
        let events = vec![
            Event::PlanStarted {
                sections: plan.len(),
                total_secs: plan.total_secs(),
                at: Utc::now(),
            },
            Event::PhaseStarted {
                section_index: 0,
                phase: Phase::Study,
                duration_secs: state.remaining_secs,
                at: Utc::now(),
            },
        ];
        tracing::info!(sections = plan.len(), "plan started");

        self.editor = SectionList::from_entries(minutes.to_vec());
        self.timer.start(state.remaining_secs);
        self.plan = Some(plan);
        self.state = Some(state);
        self.save()?;
        Ok(events)
    }

    /// Start from the current editor entries.
    ///
    /// # Errors
    /// See [`start_plan`](Self::start_plan).
    pub fn start_from_editor(&mut self) -> Result<Vec<Event>> {
        let minutes = self.editor.entries().to_vec();
        self.start_plan(&minutes)
    }

    /// Deliver one clock tick. Returns nothing while idle or completed.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        let Some(state) = self.state.as_mut() else {
            return Ok(Vec::new());
        };
        match self.timer.tick() {
            TickOutcome::Idle => Ok(Vec::new()),
            TickOutcome::Ticked { remaining_secs } => {
                state.remaining_secs = remaining_secs;
                let event = tick_event(state);
                self.save()?;
                Ok(vec![event])
            }
            TickOutcome::Completed { .. } => {
                state.remaining_secs = 0;
                let (index, phase) = (state.current_index, state.phase);
                let mut events = vec![
                    tick_event(state),
                    Event::PhaseCompleted {
                        section_index: index,
                        phase,
                        at: Utc::now(),
                    },
                ];
                self.save()?;
                self.notifier.play_cue(index, phase);
                tracing::debug!(section = index, phase = phase.label(), "phase elapsed");
                events.extend(self.apply(Input::PhaseElapsed)?);
                Ok(events)
            }
        }
    }

    /// Jump past the current phase without waiting for the countdown.
    /// No cue is played.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    pub fn skip(&mut self) -> Result<Vec<Event>> {
        let Some(state) = self.running_state() else {
            return Ok(Vec::new());
        };
        let mut events = vec![Event::PhaseSkipped {
            section_index: state.current_index,
            phase: state.phase,
            at: Utc::now(),
        }];
        tracing::debug!(section = state.current_index, phase = state.phase.label(), "phase skipped");
        events.extend(self.apply(Input::Skip)?);
        Ok(events)
    }

    /// Go back to the study phase of the previous section. No-op on the
    /// first section.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    pub fn previous(&mut self) -> Result<Vec<Event>> {
        let Some(from) = self.state.map(|s| s.current_index) else {
            return Ok(Vec::new());
        };
        let applied = self.apply(Input::Previous)?;
        if applied.is_empty() {
            return Ok(applied);
        }
        let to = self.state.map(|s| s.current_index).unwrap_or(0);
        let mut events = vec![Event::Rewound {
            from_section: from,
            to_section: to,
            at: Utc::now(),
        }];
        events.extend(applied);
        Ok(events)
    }

    /// Freeze the countdown. The clock keeps ticking.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    pub fn pause(&mut self) -> Result<Vec<Event>> {
        self.set_paused(true)
    }

    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    pub fn resume(&mut self) -> Result<Vec<Event>> {
        self.set_paused(false)
    }

    /// Drop the plan, clear the slot and reset the editor to one blank entry.
    ///
    /// # Errors
    /// Returns an error if the slot cannot be cleared.
    pub fn cancel(&mut self) -> Result<Vec<Event>> {
        self.timer.cancel();
        self.plan = None;
        self.state = None;
        self.editor.clear();
        self.persistence.clear()?;
        tracing::info!("plan cancelled");
        Ok(vec![Event::PlanCancelled { at: Utc::now() }])
    }

    // ── Restore ──────────────────────────────────────────────────────

    /// Load the slot and restore it. Returns nothing when the slot is empty
    /// or unusable.
    pub fn resume_saved(&mut self) -> Vec<Event> {
        match self.persistence.load() {
            Some(snapshot) => self.restore(&snapshot),
            None => Vec::new(),
        }
    }

    /// Rebuild editor, plan and state from `snapshot` and resume the
    /// countdown at exactly the saved remaining time.
    ///
    /// If no entry yields a section, only the editor is rebuilt and the
    /// controller stays idle. An index past the end restores as completed.
    pub fn restore(&mut self, snapshot: &PersistedSnapshot) -> Vec<Event> {
        self.timer.cancel();
        self.editor = SectionList::from_entries(snapshot.raw_study_minutes.clone());
        self.plan = None;
        self.state = None;
        if !snapshot.plan_active {
            return Vec::new();
        }
        let plan = match Plan::from_minutes(&snapshot.raw_study_minutes) {
            Ok(plan) => plan,
            Err(_) => {
                tracing::info!("saved session has no valid sections, staying idle");
                return Vec::new();
            }
        };

        let state = SequencerState {
            current_index: snapshot.current_index.min(plan.len()),
            phase: snapshot.phase,
            remaining_secs: snapshot.remaining_secs,
            paused: snapshot.paused,
        };
        if !state.is_completed(&plan) {
            self.timer.start(state.remaining_secs);
            if state.paused {
                self.timer.pause();
            }
        }
        tracing::info!(
            section = state.current_index,
            phase = state.phase.label(),
            remaining = state.remaining_secs,
            paused = state.paused,
            "session restored"
        );
        self.plan = Some(plan);
        self.state = Some(state);
        vec![Event::Restored {
            section_index: state.current_index,
            phase: state.phase,
            remaining_secs: state.remaining_secs,
            paused: state.paused,
            at: Utc::now(),
        }]
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn running_state(&self) -> Option<SequencerState> {
        match self.status() {
            Status::Running(_) => self.state,
            _ => None,
        }
    }

    fn set_paused(&mut self, paused: bool) -> Result<Vec<Event>> {
        let Some(state) = self.running_state() else {
            return Ok(Vec::new());
        };
        if state.paused == paused {
            return Ok(Vec::new());
        }
        if paused {
            self.timer.pause();
        } else {
            self.timer.resume();
        }
        if let Some(s) = self.state.as_mut() {
            s.paused = paused;
        }
        self.save()?;
        let remaining_secs = state.remaining_secs;
        let event = if paused {
            Event::Paused {
                remaining_secs,
                at: Utc::now(),
            }
        } else {
            Event::Resumed {
                remaining_secs,
                at: Utc::now(),
            }
        };
        Ok(vec![event])
    }

    fn apply(&mut self, input: Input) -> Result<Vec<Event>> {
        let (Some(plan), Some(state)) = (&self.plan, &self.state) else {
            return Ok(Vec::new());
        };
        match transition(plan, state, input) {
            Transition::NoOp => Ok(Vec::new()),
            Transition::Enter(next) => {
                self.timer.start(next.remaining_secs);
                self.state = Some(next);
                self.save()?;
                Ok(vec![Event::PhaseStarted {
                    section_index: next.current_index,
                    phase: next.phase,
                    duration_secs: next.remaining_secs,
                    at: Utc::now(),
                }])
            }
            Transition::Finished(done) => {
                let sections = plan.len();
                self.timer.cancel();
                self.state = Some(done);
                self.save()?;
                self.notifier.plan_finished();
                tracing::info!(sections, "plan completed");
                Ok(vec![Event::PlanCompleted {
                    sections,
                    at: Utc::now(),
                }])
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        self.persistence.save(&snapshot)
    }
}

fn tick_event(state: &SequencerState) -> Event {
    Event::Tick {
        section_index: state.current_index,
        phase: state.phase,
        remaining_secs: state.remaining_secs,
        paused: state.paused,
        at: Utc::now(),
    }
}
