use clap::Subcommand;
use timeflow_core::storage::DisplayMode;
use timeflow_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration as TOML
    Show,
    /// Set the display mode (countdown or elapsed)
    SetMode {
        /// "countdown" or "elapsed"
        mode: String,
    },
    /// Set the preset loaded by `timer run` when none is given
    SetDefaultPreset {
        /// Preset name
        name: String,
    },
    /// Clear the default preset
    ClearDefaultPreset,
    /// Enable or disable the completion bell
    SetNotifications {
        /// "on" or "off"
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetMode { mode } => {
            let mode: DisplayMode = mode.parse()?;
            let mut config = Config::load_or_default();
            config.display.mode = mode;
            config.save()?;
            println!("display mode set to {}", mode.as_str());
        }
        ConfigAction::SetDefaultPreset { name } => {
            let mut config = Config::load_or_default();
            config.default_preset = Some(name.clone());
            config.save()?;
            println!("default preset set to '{name}'");
        }
        ConfigAction::ClearDefaultPreset => {
            let mut config = Config::load_or_default();
            config.default_preset = None;
            config.save()?;
            println!("default preset cleared");
        }
        ConfigAction::SetNotifications { state } => {
            let mut config = Config::load_or_default();
            config.notifications.enabled = state == "on";
            config.save()?;
            println!("notifications {state}");
        }
    }
    Ok(())
}
