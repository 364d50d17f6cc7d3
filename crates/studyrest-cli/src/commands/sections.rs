use clap::Subcommand;
use studyrest_core::{format_clock, Config, Section, SectionList};

use super::open_controller;

#[derive(Subcommand)]
pub enum SectionsAction {
    /// List editor entries with their derived study/rest times
    List {
        #[arg(long)]
        json: bool,
    },
    /// Append an entry (blank when omitted)
    Add {
        #[arg(allow_negative_numbers = true)]
        minutes: Option<String>,
    },
    /// Remove entry N (1-based)
    Remove { number: usize },
    /// Set entry N (1-based) to MINUTES
    Set {
        number: usize,
        #[arg(allow_negative_numbers = true)]
        minutes: String,
    },
}

pub fn run(action: SectionsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_controller(config)?;

    match action {
        SectionsAction::List { json } => {
            let entries = controller.editor().entries();
            if json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else {
                for (label, minutes) in controller.editor().labels().iter().zip(entries) {
                    match Section::derive(*minutes) {
                        Ok(s) => println!(
                            "{label}: {minutes} min (study {}, rest {})",
                            format_clock(s.study_secs),
                            format_clock(s.rest_secs)
                        ),
                        Err(_) => println!("{label}: {minutes} min (ignored)"),
                    }
                }
            }
        }
        SectionsAction::Add { minutes } => {
            let minutes = minutes.as_deref().map(SectionList::parse_entry).unwrap_or(0.0);
            let index = controller.add_entry(minutes)?;
            println!("Section {} added", index + 1);
        }
        SectionsAction::Remove { number } => {
            let removed = controller.remove_entry(to_index(number)?)?;
            println!("Section {number} removed ({removed} min)");
        }
        SectionsAction::Set { number, minutes } => {
            let minutes = SectionList::parse_entry(&minutes);
            controller.set_entry(to_index(number)?, minutes)?;
            println!("Section {number} set to {minutes} min");
        }
    }
    Ok(())
}

fn to_index(number: usize) -> Result<usize, Box<dyn std::error::Error>> {
    number
        .checked_sub(1)
        .ok_or_else(|| "section numbers start at 1".into())
}
