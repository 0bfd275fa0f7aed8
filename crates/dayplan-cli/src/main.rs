use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Inspect and repair a day of time blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect scheduling conflicts
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Compute side-by-side layout columns
    Layout(commands::layout::LayoutArgs),
    /// Find the earliest free slot of a given length
    FreeSlot(commands::slots::FreeSlotArgs),
    /// List free gaps inside a day window
    Gaps(commands::slots::GapsArgs),
    /// Apply move/resize/delete/split operations
    Apply(commands::apply::ApplyArgs),
    /// Propose ranked resolution strategies
    Strategies(commands::strategies::StrategiesArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Layout(args) => commands::layout::run(args),
        Commands::FreeSlot(args) => commands::slots::run_free_slot(args),
        Commands::Gaps(args) => commands::slots::run_gaps(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Strategies(args) => commands::strategies::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
