use clap::Subcommand;
use timeflow_core::{PresetStore, SegmentSequence};

use super::common;

#[derive(Subcommand)]
pub enum PresetAction {
    /// List saved presets
    List,
    /// Print one preset as JSON
    Show {
        /// Preset name
        name: String,
    },
    /// Save a preset, overwriting an existing one with the same name
    Save {
        /// Preset name
        name: String,
        /// Inline segment list, e.g. "Warm Up:5,Deep Work:25,Break:5"
        #[arg(long)]
        segments: String,
    },
    /// Delete a preset
    Delete {
        /// Preset name
        name: String,
    },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PresetStore::open()?;
    match action {
        PresetAction::List => {
            let presets = store.load()?;
            if presets.is_empty() {
                println!("no presets saved");
                return Ok(());
            }
            for preset in presets {
                let total = SegmentSequence::from_segments(preset.segments.clone()).total_seconds();
                println!(
                    "{}  ({} segments, {})",
                    preset.name,
                    preset.segments.len(),
                    common::format_mmss(total)
                );
            }
        }
        PresetAction::Show { name } => {
            let preset = store
                .get(&name)?
                .ok_or_else(|| format!("preset '{name}' not found"))?;
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
        PresetAction::Save { name, segments } => {
            let segments = common::parse_segments(&segments)?;
            store.save(&name, &segments)?;
            println!("preset '{name}' saved");
        }
        PresetAction::Delete { name } => {
            if store.delete(&name)? {
                println!("preset '{name}' deleted");
            } else {
                return Err(format!("preset '{name}' not found").into());
            }
        }
    }
    Ok(())
}
