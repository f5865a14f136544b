// FILE: crates/cli/src/commands.rs

use crate::simulation::Simulator;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use console::style;
use shelfkeeper_config::{Config, ConfigManager, ConfigSection, SimulationConfig};
use std::io::{self, BufRead, Write};

/// Parameters gathered by the interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParameters {
    pub steps: u32,
    pub seed: Option<u64>,
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Asks for the step count and seed; a blank answer keeps `defaults`
///
/// Returns `None` after printing "Bad input" if either answer does not parse.
pub fn prompt_parameters<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    defaults: &SimulationConfig,
) -> Result<Option<RunParameters>> {
    writeln!(
        output,
        "{}",
        style("Preparing to run a random simulation...").blue().bright()
    )?;

    write!(
        output,
        "{} ",
        style("Type in the number of steps for a simulation (Press Enter for default):")
            .blue()
            .bright()
    )?;
    output.flush()?;
    let steps = read_answer(&mut input).context("Failed to read step count")?;

    write!(
        output,
        "{} ",
        style("Type in the seed value for a simulation (Press Enter for default):")
            .blue()
            .bright()
    )?;
    output.flush()?;
    let seed = read_answer(&mut input).context("Failed to read seed")?;

    let steps = if steps.is_empty() {
        Ok(defaults.steps)
    } else {
        steps.parse::<u32>()
    };
    let seed = if seed.is_empty() {
        Ok(defaults.seed)
    } else {
        seed.parse::<u64>().map(Some)
    };

    match (steps, seed) {
        (Ok(steps), Ok(seed)) => Ok(Some(RunParameters { steps, seed })),
        _ => {
            writeln!(output, "{}", style("Bad input").red())?;
            Ok(None)
        }
    }
}

/// Resolves the simulation settings from config, flags and the prompt
pub fn simulation_settings<R: BufRead, W: Write>(
    config: &Config,
    matches: &ArgMatches,
    input: R,
    output: W,
) -> Result<Option<SimulationConfig>> {
    let mut settings = config.simulation.clone();

    if let Some(steps) = matches.get_one::<u32>("steps") {
        settings.steps = *steps;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        settings.seed = Some(*seed);
    }

    if matches.get_flag("interactive") {
        match prompt_parameters(input, output, &settings)? {
            Some(params) => {
                settings.steps = params.steps;
                settings.seed = params.seed;
            }
            None => return Ok(None),
        }
    }

    if let Err(errors) = settings.validate() {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        bail!("Invalid simulation settings: {}", details.join("; "));
    }

    Ok(Some(settings))
}

/// Run the random-action simulation
pub fn simulate(config: &Config, matches: &ArgMatches) -> Result<()> {
    let stdin = io::stdin();
    let settings = match simulation_settings(config, matches, stdin.lock(), io::stdout())? {
        Some(settings) => settings,
        None => return Ok(()),
    };

    let stdout = io::stdout();
    let mut simulator = Simulator::new(
        &config.library.name,
        &settings,
        config.library.report_limit,
        stdout.lock(),
    );
    simulator
        .run()
        .context("Failed to write simulation output")?;

    println!(
        "{} seed: {}",
        style("Simulation finished,").bold(),
        simulator.seed()
    );
    Ok(())
}

/// Create the default config file if missing
pub fn config_init(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to initialize config")?;

    if created {
        println!(
            "{} Created default config at {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
    } else {
        println!(
            "Config already exists at {}",
            manager.config_path().display()
        );
    }
    Ok(())
}

/// Print the effective configuration as TOML
pub fn config_show(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    println!("{}", rendered);
    Ok(())
}

/// Print the config file location
pub fn config_path(manager: &ConfigManager) -> Result<()> {
    println!("{}", manager.config_path().display());
    Ok(())
}

/// Validate the config file on disk
pub fn config_validate(manager: &ConfigManager) -> Result<()> {
    let errors = manager.validate().context("Failed to load config")?;

    if errors.is_empty() {
        println!("{} Configuration is valid", style("✓").green().bold());
        return Ok(());
    }

    for error in &errors {
        println!("  {} {}", style("✗").red().bold(), error);
    }
    bail!("Configuration has {} problem(s)", errors.len())
}

#[cfg(test)]
mod tests;
