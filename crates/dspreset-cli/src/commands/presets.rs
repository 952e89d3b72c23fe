//! List the presets in a folder.

use std::path::PathBuf;

use clap::Args;
use dspreset::InstrumentPreset;
use dspreset::paths::{list_presets_in_dir, preset_name_from_path};

/// List `.dspreset` files in a folder.
#[derive(Args)]
pub struct PresetsArgs {
    /// Folder to search (defaults to the current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Run the presets command.
pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let presets = list_presets_in_dir(&args.dir);

    println!("Presets in {}:", args.dir.display());
    if presets.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for path in presets {
        let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        match InstrumentPreset::from_dspreset(&path) {
            Ok(preset) => {
                let zones = preset.all_zones().len();
                let status = if preset.validate().is_ok() { "" } else { " [invalid]" };
                println!("  {name:20} - {zones} zones{status}");
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "preset failed to load");
                println!("  {name:20} - (error loading)");
            }
        }
    }
    Ok(())
}
