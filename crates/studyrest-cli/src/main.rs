use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use studyrest_core::Config;

mod commands;
mod notifier;
mod render;

#[derive(Parser)]
#[command(name = "studyrest", version, about = "Study/rest interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Edit the list of study sections
    Sections {
        #[command(subcommand)]
        action: commands::sections::SectionsAction,
    },
    /// Show the study/rest seconds derived from minute values
    Derive {
        #[arg(required = true, allow_negative_numbers = true)]
        minutes: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions { shell: Shell },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => match Config::load() {
            Ok(config) => commands::timer::run(action, &config).await,
            Err(e) => Err(e.into()),
        },
        Commands::Sections { action } => match Config::load() {
            Ok(config) => commands::sections::run(action, &config),
            Err(e) => Err(e.into()),
        },
        Commands::Derive { minutes, json } => commands::derive::run(&minutes, json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyrest", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
