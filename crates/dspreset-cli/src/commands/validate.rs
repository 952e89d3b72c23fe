//! Check a preset against the export rules.

use std::path::PathBuf;

use clap::Args;

use super::common::{load_preset, print_validation_errors};

/// Validate a preset file.
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the .dspreset file
    pub file: PathBuf,
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.file)?;

    match preset.validate() {
        Ok(()) => {
            println!("{}: OK", args.file.display());
            Ok(())
        }
        Err(errors) => {
            eprintln!("{}:", args.file.display());
            print_validation_errors(&errors);
            anyhow::bail!("{} validation error(s)", errors.len())
        }
    }
}
