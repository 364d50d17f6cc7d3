//! Terminal output for controller events.

use std::io::Write;

use studyrest_core::{format_clock, phase_label, Event, Phase, Status};

pub struct Renderer {
    json: bool,
    show_progress: bool,
    sections: usize,
    /// A `\r` tick line is on screen and needs a newline before other output.
    mid_line: bool,
}

impl Renderer {
    pub fn new(json: bool, show_progress: bool, sections: usize) -> Self {
        Self {
            json,
            show_progress,
            sections,
            mid_line: false,
        }
    }

    pub fn set_sections(&mut self, sections: usize) {
        self.sections = sections;
    }

    pub fn events(&mut self, events: &[Event]) {
        for event in events {
            self.event(event);
        }
    }

    pub fn event(&mut self, event: &Event) {
        if self.json {
            if let Ok(line) = serde_json::to_string(event) {
                println!("{line}");
            }
            return;
        }

        match event {
            Event::Tick {
                section_index,
                phase,
                remaining_secs,
                paused,
                ..
            } => {
                let mut out = std::io::stdout();
                let _ = write!(
                    out,
                    "\r{}  {}{}   ",
                    self.label(*section_index, *phase),
                    format_clock(*remaining_secs),
                    if *paused { "  (paused)" } else { "" }
                );
                let _ = out.flush();
                self.mid_line = true;
            }
            other => {
                if let Some(line) = self.describe(other) {
                    self.line(&line);
                }
            }
        }
    }

    /// Finish a pending tick line.
    pub fn finish(&mut self) {
        if self.mid_line {
            println!();
            self.mid_line = false;
        }
    }

    fn line(&mut self, text: &str) {
        self.finish();
        println!("{text}");
    }

    fn label(&self, section_index: usize, phase: Phase) -> String {
        let label = phase_label(section_index, phase);
        if self.show_progress && self.sections > 0 {
            format!("{label} [{}/{}]", section_index + 1, self.sections)
        } else {
            label
        }
    }

    fn describe(&self, event: &Event) -> Option<String> {
        let text = match event {
            Event::PlanStarted {
                sections,
                total_secs,
                ..
            } => format!(
                "Plan started: {sections} section(s), {} total",
                format_clock(*total_secs)
            ),
            Event::PhaseStarted {
                section_index,
                phase,
                duration_secs,
                ..
            } => format!(
                "{}  {}",
                self.label(*section_index, *phase),
                format_clock(*duration_secs)
            ),
            Event::PhaseCompleted {
                section_index,
                phase,
                ..
            } => format!("{} finished", phase_label(*section_index, *phase)),
            Event::PhaseSkipped {
                section_index,
                phase,
                ..
            } => format!("{} skipped", phase_label(*section_index, *phase)),
            Event::Rewound { to_section, .. } => {
                format!("Back to section {}", to_section + 1)
            }
            Event::Paused { remaining_secs, .. } => {
                format!("Paused at {}", format_clock(*remaining_secs))
            }
            Event::Resumed { remaining_secs, .. } => {
                format!("Resumed at {}", format_clock(*remaining_secs))
            }
            Event::PlanCompleted { sections, .. } => {
                format!("Plan completed ({sections} section(s))")
            }
            Event::PlanCancelled { .. } => "Plan cancelled".to_string(),
            Event::Restored {
                section_index,
                phase,
                remaining_secs,
                paused,
                ..
            } => format!(
                "Resuming {} at {}{}",
                self.label(*section_index, *phase),
                format_clock(*remaining_secs),
                if *paused { " (paused)" } else { "" }
            ),
            Event::StateSnapshot {
                status,
                section_index,
                phase,
                remaining_secs,
                paused,
                ..
            } => match status {
                Status::Idle => "idle".to_string(),
                Status::Completed => "completed".to_string(),
                Status::Running(_) => format!(
                    "{}  {}{}",
                    self.label(*section_index, *phase),
                    format_clock(*remaining_secs),
                    if *paused { "  (paused)" } else { "" }
                ),
            },
            Event::Tick { .. } => return None,
        };
        Some(text)
    }
}
