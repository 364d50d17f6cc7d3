//! Sequencer state and the pure transition function.
//!
//! ## State Transitions
//!
//! ```text
//! Study(i) --elapsed|skip--> Rest(i)
//! Rest(i)  --elapsed|skip--> Study(i+1) | Completed
//! Study(i) / Rest(i) / Completed --previous--> Study(i-1)   (i > 0)
//! ```
//!
//! `transition` never touches timers, storage or notifications; the
//! controller applies its result.

use serde::{Deserialize, Serialize};

use crate::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Study,
    Rest,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Study => "Study",
            Phase::Rest => "Rest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "phase", rename_all = "lowercase")]
pub enum Status {
    Idle,
    Running(Phase),
    Completed,
}

/// Position within a plan. `current_index == plan.len()` means the plan is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerState {
    pub current_index: usize,
    pub phase: Phase,
    pub remaining_secs: u64,
    pub paused: bool,
}

impl SequencerState {
    /// Study phase of the first section, full duration, unpaused.
    pub fn initial(plan: &Plan) -> Self {
        Self::study_at(plan, 0)
    }

    pub fn is_completed(&self, plan: &Plan) -> bool {
        self.current_index >= plan.len()
    }

    pub fn status(&self, plan: &Plan) -> Status {
        if self.is_completed(plan) {
            Status::Completed
        } else {
            Status::Running(self.phase)
        }
    }

    fn study_at(plan: &Plan, index: usize) -> Self {
        Self {
            current_index: index,
            phase: Phase::Study,
            remaining_secs: plan.get(index).map(|s| s.study_secs).unwrap_or(0),
            paused: false,
        }
    }

    fn rest_at(plan: &Plan, index: usize) -> Self {
        Self {
            current_index: index,
            phase: Phase::Rest,
            remaining_secs: plan.get(index).map(|s| s.rest_secs).unwrap_or(0),
            paused: false,
        }
    }

    fn finished(plan: &Plan) -> Self {
        Self {
            current_index: plan.len(),
            phase: Phase::Study,
            remaining_secs: 0,
            paused: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The countdown for the current phase reached zero.
    PhaseElapsed,
    /// The user jumped past the current phase.
    Skip,
    /// The user went back one section.
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Begin a phase with a fresh, full-length countdown.
    Enter(SequencerState),
    /// Stepped past the last section.
    Finished(SequencerState),
    NoOp,
}

/// Compute the next state for `input`. Elapsed and skip are the same move.
pub fn transition(plan: &Plan, state: &SequencerState, input: Input) -> Transition {
    match input {
        Input::PhaseElapsed | Input::Skip => {
            if state.is_completed(plan) {
                return Transition::NoOp;
            }
            match state.phase {
                Phase::Study => Transition::Enter(SequencerState::rest_at(plan, state.current_index)),
                Phase::Rest => {
                    let next = state.current_index + 1;
                    if next < plan.len() {
                        Transition::Enter(SequencerState::study_at(plan, next))
                    } else {
                        Transition::Finished(SequencerState::finished(plan))
                    }
                }
            }
        }
        Input::Previous => {
            if state.current_index == 0 {
                return Transition::NoOp;
            }
            let target = state.current_index.min(plan.len()) - 1;
            Transition::Enter(SequencerState::study_at(plan, target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan::from_minutes(&[1.0, 1.0]).unwrap()
    }

    #[test]
    fn initial_state_is_first_study() {
        let s = SequencerState::initial(&plan());
        assert_eq!(s.current_index, 0);
        assert_eq!(s.phase, Phase::Study);
        assert_eq!(s.remaining_secs, 60);
        assert!(!s.paused);
    }

    #[test]
    fn study_elapsed_enters_rest_of_same_section() {
        let p = plan();
        let s = SequencerState::initial(&p);
        let Transition::Enter(next) = transition(&p, &s, Input::PhaseElapsed) else {
            panic!("expected Enter");
        };
        assert_eq!(next.current_index, 0);
        assert_eq!(next.phase, Phase::Rest);
        assert_eq!(next.remaining_secs, 10);
    }

    #[test]
    fn rest_elapsed_enters_next_study() {
        let p = plan();
        let s = SequencerState {
            current_index: 0,
            phase: Phase::Rest,
            remaining_secs: 0,
            paused: false,
        };
        assert_eq!(
            transition(&p, &s, Input::PhaseElapsed),
            Transition::Enter(SequencerState {
                current_index: 1,
                phase: Phase::Study,
                remaining_secs: 60,
                paused: false,
            })
        );
    }

    #[test]
    fn last_rest_elapsed_finishes() {
        let p = plan();
        let s = SequencerState {
            current_index: 1,
            phase: Phase::Rest,
            remaining_secs: 3,
            paused: false,
        };
        let Transition::Finished(done) = transition(&p, &s, Input::Skip) else {
            panic!("expected Finished");
        };
        assert_eq!(done.current_index, 2);
        assert_eq!(done.status(&p), Status::Completed);
    }

    #[test]
    fn skip_matches_elapsed() {
        let p = plan();
        let s = SequencerState {
            current_index: 0,
            phase: Phase::Study,
            remaining_secs: 42,
            paused: true,
        };
        assert_eq!(
            transition(&p, &s, Input::Skip),
            transition(&p, &s, Input::PhaseElapsed)
        );
    }

    #[test]
    fn previous_at_first_section_is_noop() {
        let p = plan();
        let s = SequencerState::initial(&p);
        assert_eq!(transition(&p, &s, Input::Previous), Transition::NoOp);
    }

    #[test]
    fn previous_from_rest_restarts_prior_study() {
        let p = plan();
        let s = SequencerState {
            current_index: 1,
            phase: Phase::Rest,
            remaining_secs: 4,
            paused: true,
        };
        assert_eq!(
            transition(&p, &s, Input::Previous),
            Transition::Enter(SequencerState {
                current_index: 0,
                phase: Phase::Study,
                remaining_secs: 60,
                paused: false,
            })
        );
    }

    #[test]
    fn completed_ignores_elapsed_and_skip() {
        let p = plan();
        let done = SequencerState::finished(&p);
        assert_eq!(transition(&p, &done, Input::Skip), Transition::NoOp);
        assert_eq!(transition(&p, &done, Input::PhaseElapsed), Transition::NoOp);
    }

    #[test]
    fn previous_from_completed_reopens_last_section() {
        let p = plan();
        let done = SequencerState::finished(&p);
        let Transition::Enter(s) = transition(&p, &done, Input::Previous) else {
            panic!("expected Enter");
        };
        assert_eq!(s.current_index, 1);
        assert_eq!(s.phase, Phase::Study);
    }
}
