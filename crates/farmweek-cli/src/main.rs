use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "farmweek", version, about = "Weather-aware weekly farm-work planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weekly planning
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// External event management
    Events {
        #[command(subcommand)]
        action: commands::events::EventAction,
    },
    /// Classify a free-text task into the taxonomy
    Classify {
        /// Task description
        text: String,
    },
    /// Historical climate table
    Climate {
        #[command(subcommand)]
        action: commands::climate::ClimateAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Events { action } => commands::events::run(action),
        Commands::Classify { text } => commands::classify::run(&text),
        Commands::Climate { action } => commands::climate::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
