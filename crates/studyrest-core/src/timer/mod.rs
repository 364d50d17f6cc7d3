mod engine;

pub use engine::{PhaseTimer, TickOutcome, TimerHandle};
