//! Display a preset summary.

use std::path::PathBuf;

use clap::Args;
use dspreset::InstrumentPreset;

use super::common::load_preset;

/// Display preset information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the .dspreset file
    pub file: PathBuf,

    /// Print the full model as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&preset)?);
        return Ok(());
    }

    print_summary(&preset);
    Ok(())
}

fn print_summary(preset: &InstrumentPreset) {
    let zones = preset.all_zones();
    let controls = preset
        .ui
        .elements
        .iter()
        .filter(|el| el.is_value_control())
        .count();

    println!("Name:     {}", preset.name);
    println!("UI:       {}x{}", preset.width, preset.height);
    println!("Groups:   {}", preset.sample_groups.len());
    println!("Zones:    {}", zones.len());
    println!("Controls: {controls}");
    println!("LFOs:     {}", preset.lfos.len());
    println!("Routes:   {}", preset.modulation_routes.len());

    if !preset.effects.is_empty() {
        let names: Vec<&str> = preset.effects.keys().map(String::as_str).collect();
        println!("Effects:  {}", names.join(", "));
    }

    if !preset.sample_groups.is_empty() {
        println!();
        for group in &preset.sample_groups {
            let name = if group.name.is_empty() { "(unnamed)" } else { group.name.as_str() };
            let state = if group.enabled { "" } else { " [disabled]" };
            println!("  {name:20} {:4} zones{state}", group.len());
        }
    }
}
