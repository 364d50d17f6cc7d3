use std::io::Write;

use studyrest_core::storage::NotificationsConfig;
use studyrest_core::{phase_label, Notifier, Phase};

/// Rings the terminal bell on phase completion and prints the completion
/// message when the plan ends. Write failures are ignored.
pub struct TerminalNotifier {
    config: NotificationsConfig,
}

impl TerminalNotifier {
    pub fn new(config: NotificationsConfig) -> Self {
        Self { config }
    }
}

impl Notifier for TerminalNotifier {
    fn play_cue(&mut self, section_index: usize, phase: Phase) {
        if !self.config.enabled {
            return;
        }
        tracing::debug!(label = %phase_label(section_index, phase), "cue");
        if self.config.terminal_bell {
            let mut err = std::io::stderr();
            let _ = err.write_all(b"\x07");
            let _ = err.flush();
        }
    }

    fn plan_finished(&mut self) {
        if self.config.enabled {
            eprintln!("{}", self.config.completion_message);
        }
    }
}
