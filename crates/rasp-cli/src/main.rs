//! rasp - command-line front end for the table-driven waveshaping distortion.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rasp")]
#[command(author, version, about = "Table-driven waveshaping distortion", long_about = None)]
struct Cli {
    /// Increase log detail on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the distortion
    Process(commands::process::ProcessArgs),

    /// List factory presets or show one
    Presets(commands::presets::PresetsArgs),

    /// List the curve families and what their parameters do
    Curves(commands::curves::CurvesArgs),

    /// Print the transfer table for a configuration
    Table(commands::table::TableArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Curves(args) => commands::curves::run(args),
        Commands::Table(args) => commands::table::run(args),
    }
}
