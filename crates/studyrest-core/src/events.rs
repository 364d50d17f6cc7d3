use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sequencer::{Phase, Status};

/// Every state change in the controller produces an Event.
/// Renderers consume them; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PlanStarted {
        sections: usize,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseStarted {
        section_index: usize,
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One per clock tick while a phase is active, paused or not.
    Tick {
        section_index: usize,
        phase: Phase,
        remaining_secs: u64,
        paused: bool,
        at: DateTime<Utc>,
    },
    /// The countdown ran out (the audible cue has been played).
    PhaseCompleted {
        section_index: usize,
        phase: Phase,
        at: DateTime<Utc>,
    },
    PhaseSkipped {
        section_index: usize,
        phase: Phase,
        at: DateTime<Utc>,
    },
    Rewound {
        from_section: usize,
        to_section: usize,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PlanCompleted {
        sections: usize,
        at: DateTime<Utc>,
    },
    PlanCancelled {
        at: DateTime<Utc>,
    },
    /// A saved session was picked up mid-flight.
    Restored {
        section_index: usize,
        phase: Phase,
        remaining_secs: u64,
        paused: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: Status,
        section_index: usize,
        sections: usize,
        phase: Phase,
        remaining_secs: u64,
        paused: bool,
        entries: Vec<f64>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short kind name, handy for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::PlanStarted { .. } => "plan_started",
            Event::PhaseStarted { .. } => "phase_started",
            Event::Tick { .. } => "tick",
            Event::PhaseCompleted { .. } => "phase_completed",
            Event::PhaseSkipped { .. } => "phase_skipped",
            Event::Rewound { .. } => "rewound",
            Event::Paused { .. } => "paused",
            Event::Resumed { .. } => "resumed",
            Event::PlanCompleted { .. } => "plan_completed",
            Event::PlanCancelled { .. } => "plan_cancelled",
            Event::Restored { .. } => "restored",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::Tick {
            section_index: 0,
            phase: Phase::Rest,
            remaining_secs: 9,
            paused: false,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Tick");
        assert_eq!(json["phase"], "rest");
        assert_eq!(json["remaining_secs"], 9);
    }

    #[test]
    fn status_serializes_adjacently() {
        let json = serde_json::to_value(Status::Running(Phase::Study)).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["phase"], "study");
    }
}
