//! dspreset CLI - build, check and export DecentSampler instruments.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dspreset")]
#[command(author, version, about = "DecentSampler preset tool", long_about = None)]
struct Cli {
    /// Settings file to use instead of the one in the user config directory
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a preset against the export rules
    Validate(commands::validate::ValidateArgs),

    /// Summarize a preset
    Info(commands::info::InfoArgs),

    /// Re-export a preset, copying its samples next to the output
    Export(commands::export::ExportArgs),

    /// Build a preset from a folder of samples
    Automap(commands::automap::AutomapArgs),

    /// List the presets in a folder
    Presets(commands::presets::PresetsArgs),

    /// List available effects and their parameters
    Effects(commands::effects::EffectsArgs),

    /// Show the effective settings
    Settings(commands::settings::SettingsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(dspreset::paths::settings_path);

    match cli.command {
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Export(args) => commands::export::run(args, &settings_path),
        Commands::Automap(args) => commands::automap::run(args, &settings_path),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Effects(args) => commands::effects::run(args),
        Commands::Settings(args) => commands::settings::run(args, &settings_path),
    }
}
