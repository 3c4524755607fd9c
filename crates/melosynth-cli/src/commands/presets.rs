//! Preset management commands.
//!
//! Lists, shows and copies synthesis presets.

use clap::{Args, Subcommand};
use melosynth_config::paths::{
    ensure_user_presets_dir, list_presets, preset_name_from_path, system_presets_dir,
};
use melosynth_config::{
    SynthPreset, factory_presets, get_factory_preset, resolve_preset, user_presets_dir,
};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user and system presets
        #[arg(long)]
        user: bool,
    },

    /// Print a preset as TOML
    Show {
        /// Preset name or path
        name: String,
    },

    /// Copy a factory preset to user presets for customization
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (defaults to the source name)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing user preset
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list(factory, user),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Copy { source, name, force } => copy(&source, name.as_deref(), force),
        PresetsCommand::Paths => paths(),
    }
}

fn list(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for (key, preset) in melosynth_config::FACTORY_PRESET_NAMES
            .iter()
            .zip(factory_presets())
        {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {key:12} - {desc}");
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let found = list_presets();
        if found.is_empty() {
            println!("  (none)");
        }
        for path in found {
            let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match SynthPreset::load(&path) {
                Ok(preset) => {
                    let desc = preset.description.as_deref().unwrap_or("");
                    println!("  {name:12} - {desc}");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to load preset");
                    println!("  {name:12} - (error loading)");
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    preset.validate()?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn copy(source: &str, new_name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let preset = get_factory_preset(source)
        .ok_or_else(|| anyhow::anyhow!("Factory preset '{source}' not found."))?;
    let target = new_name.unwrap_or(source);

    let path = ensure_user_presets_dir()?.join(format!("{target}.toml"));
    if path.exists() && !force {
        anyhow::bail!(
            "Preset '{target}' already exists in user presets. Use --force to overwrite."
        );
    }

    let mut copy = preset;
    copy.name = target.to_string();
    copy.description = copy.description.take().map(|d| format!("{d} (copy)"));
    copy.save(&path)?;

    println!("Copied factory preset '{source}' to user preset '{target}'");
    println!("Path: {}", path.display());
    Ok(())
}

fn paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    Ok(())
}
