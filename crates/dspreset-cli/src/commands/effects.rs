//! Effect listing and information command.

use clap::Args;
use dspreset_catalog::{EffectCategory, EffectDescriptor, EffectsCatalog, ParamKind};

const CATEGORIES: [EffectCategory; 6] = [
    EffectCategory::TimeBased,
    EffectCategory::Modulation,
    EffectCategory::Filter,
    EffectCategory::Utility,
    EffectCategory::Distortion,
    EffectCategory::Convolution,
];

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect (name or wire type)
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let catalog = EffectsCatalog::new();

    if let Some(effect_name) = &args.effect {
        let effect = catalog
            .resolve(effect_name)
            .or_else(|| {
                catalog
                    .all_effects()
                    .into_iter()
                    .find(|e| e.name.eq_ignore_ascii_case(effect_name))
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown effect: {}", effect_name))?;
        print_effect(effect);
        return Ok(());
    }

    println!("Available Effects");
    println!("=================");
    for category in CATEGORIES {
        let effects = catalog.effects_in_category(category);
        if effects.is_empty() {
            continue;
        }
        println!();
        println!("{}:", category.name());
        for effect in effects {
            println!("  {:15} type=\"{}\"", effect.name, effect.wire_type);
        }
    }
    println!();
    println!("Use 'dspreset effects <name>' for detailed parameter info.");
    Ok(())
}

fn print_effect(effect: &EffectDescriptor) {
    println!("{} (type=\"{}\")", effect.name, effect.wire_type);
    println!("{}", "=".repeat(effect.name.len()));
    println!();
    println!("Category: {}", effect.category.name());
    println!();
    println!("Parameters:");
    println!();
    println!("  {:16}  {:24}  {:10}  {:24}  Binding", "Name", "Label", "Default", "Range");
    println!("  {:16}  {:24}  {:10}  {:24}  -------", "----", "-----", "-------", "-----");

    for param in effect.params {
        let range = match param.kind {
            ParamKind::Range { min, max, .. } => format!("{min} - {max}"),
            ParamKind::Choice { options, .. } => options.join(" | "),
            ParamKind::File => "file path".to_string(),
            ParamKind::Toggle { .. } => "true | false".to_string(),
        };
        let marker = if param.simple { "*" } else { " " };
        println!(
            "{marker} {:16}  {:24}  {:10}  {:24}  {}",
            param.name,
            param.label,
            param.default_value_string(),
            range,
            param.ds_param.unwrap_or("-")
        );
    }
    println!();
    println!("* shown in the simple view");
}
