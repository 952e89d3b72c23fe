//! Show the effective settings.

use std::path::Path;

use clap::Args;
use dspreset::Settings;

/// Show settings.
#[derive(Args)]
pub struct SettingsArgs {
    /// Print only the settings file path
    #[arg(long)]
    pub path: bool,
}

/// Run the settings command.
pub fn run(args: SettingsArgs, settings_path: &Path) -> anyhow::Result<()> {
    if args.path {
        println!("{}", settings_path.display());
        return Ok(());
    }

    let settings = Settings::load_from_or_default(settings_path)?;
    println!("# {}", settings_path.display());
    print!("{}", settings.to_toml()?);
    Ok(())
}
