use std::io::BufRead;
use std::time::Duration;

use clap::Subcommand;
use studyrest_core::{Config, SectionList, Status};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::{open_controller, Controller};
use crate::render::Renderer;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a plan from study minutes and run it in the foreground
    Start {
        /// Study minutes per section (fractions allowed, non-positive entries are ignored)
        #[arg(required = true, allow_negative_numbers = true)]
        minutes: Vec<String>,
        /// Save the plan and exit instead of running it
        #[arg(long)]
        detach: bool,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Run the saved plan in the foreground
    Run {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Freeze the countdown
    Pause,
    /// Continue a paused countdown
    Resume,
    /// Jump past the current phase
    Skip,
    /// Restart the previous section's study phase
    Previous,
    /// Drop the plan and clear the saved session
    Cancel,
    /// Print the current state
    Status {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: TimerAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_controller(config)?;

    match action {
        TimerAction::Start {
            minutes,
            detach,
            json,
        } => {
            let minutes: Vec<f64> = minutes.iter().map(|m| SectionList::parse_entry(m)).collect();
            let events = controller.start_plan(&minutes)?;
            let mut renderer = renderer_for(&controller, config, json);
            renderer.events(&events);
            if !detach {
                run_loop(&mut controller, &mut renderer, config).await?;
            }
        }
        TimerAction::Run { json } => {
            let mut renderer = renderer_for(&controller, config, json);
            renderer.event(&controller.snapshot_event());
            run_loop(&mut controller, &mut renderer, config).await?;
        }
        TimerAction::Pause => print_events(&controller.pause()?)?,
        TimerAction::Resume => print_events(&controller.resume()?)?,
        TimerAction::Skip => print_events(&controller.skip()?)?,
        TimerAction::Previous => print_events(&controller.previous()?)?,
        TimerAction::Cancel => print_events(&controller.cancel()?)?,
        TimerAction::Status { json } => {
            let snapshot = controller.snapshot_event();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let mut renderer = renderer_for(&controller, config, false);
                renderer.event(&snapshot);
            }
        }
    }

    Ok(())
}

fn renderer_for(controller: &Controller, config: &Config, json: bool) -> Renderer {
    let sections = controller.plan().map(|p| p.len()).unwrap_or(0);
    Renderer::new(json, config.display.show_progress, sections)
}

/// One-shot commands print what happened as pretty JSON, or a note when
/// nothing did.
fn print_events(events: &[studyrest_core::Event]) -> Result<(), Box<dyn std::error::Error>> {
    if events.is_empty() {
        eprintln!("nothing to do");
    }
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}

/// Tick once per interval and take single-letter commands from stdin until
/// the plan ends, is cancelled, or the user quits. Quitting keeps the session
/// saved for `timer run`.
async fn run_loop(
    controller: &mut Controller,
    renderer: &mut Renderer,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match controller.status() {
        Status::Running(_) => {}
        Status::Idle => {
            eprintln!("no saved plan; start one with `studyrest timer start <MINUTES>...`");
            return Ok(());
        }
        Status::Completed => {
            renderer.finish();
            return Ok(());
        }
    }

    let mut interval = tokio::time::interval(Duration::from_millis(config.timer.tick_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    let mut commands = spawn_stdin_reader();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let events = controller.tick()?;
                renderer.events(&events);
            }
            line = commands.recv(), if stdin_open => {
                match line {
                    Some(line) => {
                        let events = match line.trim() {
                            "p" | "pause" => controller.pause()?,
                            "r" | "resume" => controller.resume()?,
                            "s" | "skip" => controller.skip()?,
                            "b" | "previous" => controller.previous()?,
                            "c" | "cancel" => controller.cancel()?,
                            "q" | "quit" => {
                                renderer.finish();
                                tracing::info!("left the session running in storage");
                                return Ok(());
                            }
                            "" => Vec::new(),
                            other => {
                                renderer.finish();
                                eprintln!("unknown command '{other}' (p, r, s, b, c, q)");
                                Vec::new()
                            }
                        };
                        renderer.events(&events);
                    }
                    None => stdin_open = false,
                }
            }
        }

        renderer.set_sections(controller.plan().map(|p| p.len()).unwrap_or(0));
        if !matches!(controller.status(), Status::Running(_)) {
            renderer.finish();
            return Ok(());
        }
    }
}

/// Read stdin on a plain thread so a pending read never holds up shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
