//! Phase countdown.
//!
//! The timer does not own a thread or a clock. The caller delivers one
//! `tick()` per second and the timer reports what happened.
//!
//! ## Tick semantics
//!
//! ```text
//! running: remaining -= 1 -> Ticked(remaining) | Completed (once, at 0)
//! paused:  remaining unchanged -> Ticked(remaining)
//! idle:    Idle
//! ```
//!
//! Pausing freezes the countdown, not the tick cadence.

use serde::{Deserialize, Serialize};

/// Identifies one countdown. A handle goes stale as soon as another
/// countdown starts or the timer is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is active.
    Idle,
    /// The countdown is still going (or paused) at this value.
    Ticked { remaining_secs: u64 },
    /// The countdown hit zero on this tick. Reported exactly once per handle.
    Completed { handle: TimerHandle },
}

#[derive(Debug, Clone)]
struct Countdown {
    handle: TimerHandle,
    remaining_secs: u64,
    paused: bool,
}

/// The single countdown slot. Starting a new countdown replaces the old one
/// without completing it.
#[derive(Debug, Clone, Default)]
pub struct PhaseTimer {
    next_id: u64,
    active: Option<Countdown>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn handle(&self) -> Option<TimerHandle> {
        self.active.as_ref().map(|c| c.handle)
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.handle() == Some(handle)
    }

    pub fn is_paused(&self) -> bool {
        self.active.as_ref().is_some_and(|c| c.paused)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down from `duration_secs`, cancelling any prior countdown.
    pub fn start(&mut self, duration_secs: u64) -> TimerHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle(self.next_id);
        self.active = Some(Countdown {
            handle,
            remaining_secs: duration_secs,
            paused: false,
        });
        handle
    }

    /// Returns false when there is nothing to pause.
    pub fn pause(&mut self) -> bool {
        self.set_paused(true)
    }

    /// Returns false when there is nothing to resume.
    pub fn resume(&mut self) -> bool {
        self.set_paused(false)
    }

    /// Stop ticking. The cancelled handle never completes.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.active.take().map(|c| c.handle)
    }

    /// Deliver one clock tick.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(countdown) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };
        if countdown.paused {
            return TickOutcome::Ticked {
                remaining_secs: countdown.remaining_secs,
            };
        }
        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        if countdown.remaining_secs == 0 {
            let handle = countdown.handle;
            self.active = None;
            return TickOutcome::Completed { handle };
        }
        TickOutcome::Ticked {
            remaining_secs: countdown.remaining_secs,
        }
    }

    fn set_paused(&mut self, paused: bool) -> bool {
        match self.active.as_mut() {
            Some(c) => {
                c.paused = paused;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_completes_once() {
        let mut timer = PhaseTimer::new();
        let handle = timer.start(3);
        assert_eq!(timer.tick(), TickOutcome::Ticked { remaining_secs: 2 });
        assert_eq!(timer.tick(), TickOutcome::Ticked { remaining_secs: 1 });
        assert_eq!(timer.tick(), TickOutcome::Completed { handle });
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert!(!timer.is_active(handle));
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut timer = PhaseTimer::new();
        let handle = timer.start(0);
        assert_eq!(timer.tick(), TickOutcome::Completed { handle });
    }

    #[test]
    fn pause_freezes_remaining_but_still_ticks() {
        let mut timer = PhaseTimer::new();
        timer.start(10);
        timer.tick();
        assert!(timer.pause());
        for _ in 0..5 {
            assert_eq!(timer.tick(), TickOutcome::Ticked { remaining_secs: 9 });
        }
        assert!(timer.resume());
        assert_eq!(timer.tick(), TickOutcome::Ticked { remaining_secs: 8 });
    }

    #[test]
    fn starting_again_replaces_prior_countdown() {
        let mut timer = PhaseTimer::new();
        let first = timer.start(1);
        let second = timer.start(5);
        assert_ne!(first, second);
        assert!(!timer.is_active(first));
        assert_eq!(timer.tick(), TickOutcome::Ticked { remaining_secs: 4 });
    }

    #[test]
    fn cancel_prevents_completion() {
        let mut timer = PhaseTimer::new();
        let handle = timer.start(1);
        assert_eq!(timer.cancel(), Some(handle));
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert!(!timer.pause());
    }

    #[test]
    fn new_countdown_is_unpaused() {
        let mut timer = PhaseTimer::new();
        timer.start(5);
        timer.pause();
        timer.start(5);
        assert!(!timer.is_paused());
    }
}
