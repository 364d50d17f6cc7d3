pub mod config;
pub mod derive;
pub mod sections;
pub mod timer;

use studyrest_core::{Config, Database, KvSlot, PlanController};

use crate::notifier::TerminalNotifier;

pub type Controller = PlanController<KvSlot, TerminalNotifier>;

/// Open the saved session, restored and ready for one command.
pub fn open_controller(config: &Config) -> Result<Controller, Box<dyn std::error::Error>> {
    let slot = Database::open()?.slot(config.storage.slot_key.clone());
    let mut controller = PlanController::new(slot, TerminalNotifier::new(config.notifications.clone()));
    controller.resume_saved();
    Ok(controller)
}
