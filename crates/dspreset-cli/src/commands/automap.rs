//! Build a preset from a folder of samples.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use dspreset::{ExportOptions, InstrumentPreset, Settings, smart_map};

use super::common::export_and_record;

/// Map a sample folder and export the result.
#[derive(Args)]
pub struct AutomapArgs {
    /// Folder containing .wav files
    pub folder: PathBuf,

    /// Output .dspreset file
    pub output: PathBuf,

    /// Preset name (defaults to the output file name)
    #[arg(long)]
    pub name: Option<String>,

    /// First note for sequential mapping (defaults to the settings)
    #[arg(long, value_name = "NOTE", value_parser = clap::value_parser!(u8).range(0..=127))]
    pub start_note: Option<u8>,

    /// Read note names from file names and build one sample group
    #[arg(long)]
    pub smart: bool,
}

/// Run the automap command.
pub fn run(args: AutomapArgs, settings_path: &Path) -> anyhow::Result<()> {
    let mut settings = Settings::load_from_or_default(settings_path)?;

    let name = args
        .name
        .clone()
        .or_else(|| dspreset::paths::preset_name_from_path(&args.output))
        .unwrap_or_else(|| "Untitled".to_string());
    let mut preset = InstrumentPreset::new(name);
    preset.start_note = args.start_note.unwrap_or(settings.start_note);

    if args.smart {
        let group = smart_map(&args.folder)
            .with_context(|| format!("failed to map '{}'", args.folder.display()))?;
        println!("Mapped {} samples into group '{}'", group.len(), group.name);
        preset.sample_groups.push(group);
    } else {
        preset
            .auto_map(&args.folder)
            .with_context(|| format!("failed to map '{}'", args.folder.display()))?;
        println!(
            "Mapped {} samples from note {}",
            preset.mappings.len(),
            preset.start_note
        );
    }

    preset.add_envelope_controls();

    let options = ExportOptions::from(&settings);
    export_and_record(&preset, &args.output, &mut settings, &options, settings_path)?;
    Ok(())
}
