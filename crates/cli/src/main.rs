// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use shelfkeeper_config::{ConfigManager, LogLevel};
use std::path::PathBuf;

mod commands;
mod render;
mod seed;
mod simulation;

fn build_cli() -> Command {
    Command::new("shelfkeeper")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Shelfkeeper Contributors")
        .about("Library catalog and lending simulator")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run a random borrow/return simulation")
                .arg(
                    Arg::new("steps")
                        .short('n')
                        .long("steps")
                        .value_name("N")
                        .help("Number of random actions")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed for a reproducible run")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("interactive")
                        .short('i')
                        .long("interactive")
                        .help("Prompt for steps and seed")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Create the default config file"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("validate").about("Check the config file for errors")),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let manager = match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new(),
    }
    .context("Failed to resolve config directory")?;

    let loaded = manager.load_with_env_overrides();
    let level = loaded
        .as_ref()
        .map(|config| config.app.log_level)
        .unwrap_or(LogLevel::Error);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_filter().to_string()),
    )
    .init();

    if let Ok(config) = &loaded {
        if !config.app.color_output {
            console::set_colors_enabled(false);
        }
    }

    match matches.subcommand() {
        Some(("simulate", sub_matches)) => {
            let config = loaded.context("Failed to load configuration")?;
            commands::simulate(&config, sub_matches)
        }
        Some(("config", sub_matches)) => match sub_matches.subcommand() {
            Some(("init", _)) => commands::config_init(&manager),
            Some(("show", _)) => {
                let config = loaded.context("Failed to load configuration")?;
                commands::config_show(&config)
            }
            Some(("path", _)) => commands::config_path(&manager),
            Some(("validate", _)) => commands::config_validate(&manager),
            _ => {
                build_cli().print_help()?;
                Ok(())
            }
        },
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_simulate_arguments_parse() {
        let matches = build_cli()
            .try_get_matches_from(["shelfkeeper", "simulate", "--steps", "40", "--seed", "9"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "simulate");
        assert_eq!(sub.get_one::<u32>("steps"), Some(&40));
        assert_eq!(sub.get_one::<u64>("seed"), Some(&9));
        assert!(!sub.get_flag("interactive"));
    }

    #[test]
    fn test_rejects_negative_steps() {
        let result = build_cli().try_get_matches_from(["shelfkeeper", "simulate", "--steps", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_dir() {
        let matches = build_cli()
            .try_get_matches_from(["shelfkeeper", "config", "path", "--config-dir", "/tmp/sk"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config-dir"),
            Some(&PathBuf::from("/tmp/sk"))
        );
    }
}
