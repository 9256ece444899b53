//! Drape CLI: headless cloth simulation and config validation.

use clap::{Parser, Subcommand};

mod commands;
mod scenario;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "Verlet cloth simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation scenario.
    Simulate {
        /// Path to a scenario config (TOML). Omit for the built-in
        /// hanging-sheet-over-sphere scenario.
        #[arg(short, long)]
        config: Option<String>,

        /// Override the number of fixed steps to run.
        #[arg(short, long)]
        steps: Option<u32>,
    },

    /// Validate a scenario config file.
    Validate {
        /// Path to scenario config (TOML).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate { config, steps } => commands::simulate(config.as_deref(), steps),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
