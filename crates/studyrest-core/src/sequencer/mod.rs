mod controller;
mod state;

pub use controller::PlanController;
pub use state::{transition, Input, Phase, SequencerState, Status, Transition};
