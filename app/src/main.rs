mod cli;
mod config;
mod runner;

use anyhow::{anyhow, bail};
use clap::Parser;
use file_nodes::{ExecutionContext, create_plugin_manager};
use log::warn;

use crate::cli::{Cli, Commands, ConfigAction};
use crate::config::{HostConfig, get_config_path, load_config_from, save_config_to};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(get_config_path);
    let (mut config, config_error) = match config_path.as_deref().map(load_config_from) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (HostConfig::default(), Some(e)),
        None => (HostConfig::default(), None),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    if let Some(e) = config_error {
        warn!("Failed to load host config, using defaults: {:#}", e);
    }

    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let manager = create_plugin_manager()?;
    let ctx = ExecutionContext::new(config.output_dir.clone());

    match cli.command {
        Commands::List => {
            for definition in manager.node_definitions() {
                println!(
                    "{:<24} {:<26} {}",
                    definition.type_id, definition.display_name, definition.category
                );
            }
        }
        Commands::Describe { type_id } => {
            let definition = manager
                .get_definition(&type_id)
                .ok_or_else(|| anyhow!("unknown node type '{}'", type_id))?;
            println!("{}", serde_json::to_string_pretty(&runner::describe(&definition)?)?);
        }
        Commands::Run {
            type_id,
            inputs,
            repeat,
        } => {
            let runs = runner::run_node(&manager, &ctx, &type_id, &inputs, repeat)?;
            for run in runs {
                println!("{}", serde_json::to_string(&run)?);
            }
        }
        Commands::Config { action } => {
            let path = config_path.ok_or_else(|| anyhow!("no config directory on this platform"))?;
            match action {
                ConfigAction::Init { force } => {
                    if path.exists() && !force {
                        bail!("{} already exists (use --force to replace it)", path.display());
                    }
                    save_config_to(&path, &HostConfig::default())?;
                    println!("{}", path.display());
                }
                ConfigAction::Show => {
                    println!("# {}", path.display());
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
        }
    }
    Ok(())
}
