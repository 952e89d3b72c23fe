//! Re-export a preset with its samples.

use std::path::{Path, PathBuf};

use clap::Args;
use dspreset::{CopyPolicy, ExportOptions, Settings};

use super::common::{export_and_record, load_preset};

/// Import a preset and write it to a new location.
#[derive(Args)]
pub struct ExportArgs {
    /// Source .dspreset file
    pub input: PathBuf,

    /// Output .dspreset file
    pub output: PathBuf,

    /// Copy every sample even if an up-to-date copy exists
    #[arg(long)]
    pub always_copy: bool,

    /// Sample directory relative to the output (overrides the settings)
    #[arg(long, value_name = "DIR")]
    pub samples_dir: Option<String>,
}

/// Run the export command.
pub fn run(args: ExportArgs, settings_path: &Path) -> anyhow::Result<()> {
    let mut settings = Settings::load_from_or_default(settings_path)?;
    let mut options = ExportOptions::from(&settings);
    if args.always_copy {
        options.copy_policy = CopyPolicy::Always;
    }
    if let Some(dir) = args.samples_dir {
        options.samples_dir = dir;
    }

    let preset = load_preset(&args.input)?;
    export_and_record(&preset, &args.output, &mut settings, &options, settings_path)?;
    Ok(())
}
