//! Factory preset listing.

use clap::Args;
use rasp_config::{ConfigError, PresetSummary, factory_presets, get_factory_preset};

use super::common::describe;

#[derive(Args)]
pub struct PresetsArgs {
    /// Show details for one preset (id or name)
    #[arg(value_name = "PRESET")]
    name: Option<String>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.name {
        let preset =
            get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.clone()))?;

        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&PresetSummary::from(preset))?
            );
            return Ok(());
        }

        println!("{}", preset.name);
        println!("{}", "=".repeat(preset.name.len()));
        println!();
        println!("{}", preset.description);
        println!();
        println!("  {}", describe(&preset.params));
        println!();
        println!("Example usage:");
        println!();
        println!("  rasp process input.wav output.wav --preset {}", preset.id);
        return Ok(());
    }

    if args.json {
        let summaries: Vec<PresetSummary> =
            factory_presets().iter().map(PresetSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Factory Presets");
    println!("===============");
    println!();
    for preset in factory_presets() {
        println!("  {:24} {}", preset.id, preset.name);
    }
    println!();
    println!("Use 'rasp presets <PRESET>' for details.");
    Ok(())
}
