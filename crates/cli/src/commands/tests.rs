use super::*;
use std::io::Cursor;
use tempfile::TempDir;

fn simulate_matches(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["shelfkeeper", "simulate"];
    argv.extend_from_slice(args);
    let matches = crate::build_cli().try_get_matches_from(argv).unwrap();
    matches.subcommand_matches("simulate").unwrap().clone()
}

fn prompt(input: &str, defaults: &SimulationConfig) -> (Option<RunParameters>, String) {
    let mut output = Vec::new();
    let params = prompt_parameters(Cursor::new(input), &mut output, defaults).unwrap();
    let text = console::strip_ansi_codes(&String::from_utf8(output).unwrap()).to_string();
    (params, text)
}

#[test]
fn test_prompt_accepts_values() {
    let (params, text) = prompt("40\n7\n", &SimulationConfig::default());
    assert_eq!(
        params,
        Some(RunParameters {
            steps: 40,
            seed: Some(7)
        })
    );
    assert!(text.contains("number of steps"));
}

#[test]
fn test_prompt_blank_keeps_defaults() {
    let defaults = SimulationConfig {
        steps: 12,
        seed: Some(3),
        ..SimulationConfig::default()
    };
    let (params, _) = prompt("\n\n", &defaults);
    assert_eq!(
        params,
        Some(RunParameters {
            steps: 12,
            seed: Some(3)
        })
    );
}

#[test]
fn test_prompt_eof_counts_as_blank() {
    let defaults = SimulationConfig::default();
    let (params, _) = prompt("", &defaults);
    assert_eq!(
        params,
        Some(RunParameters {
            steps: defaults.steps,
            seed: None
        })
    );
}

#[test]
fn test_prompt_rejects_bad_input() {
    let (params, text) = prompt("many\n5\n", &SimulationConfig::default());
    assert_eq!(params, None);
    assert!(text.contains("Bad input"));

    let (params, _) = prompt("10\n-1\n", &SimulationConfig::default());
    assert_eq!(params, None);
}

#[test]
fn test_flags_override_config() {
    let config = Config::default();
    let matches = simulate_matches(&["--steps", "5", "--seed", "99"]);

    let settings = simulation_settings(&config, &matches, Cursor::new(""), Vec::new())
        .unwrap()
        .unwrap();
    assert_eq!(settings.steps, 5);
    assert_eq!(settings.seed, Some(99));
    assert_eq!(settings.user_pool_size, config.simulation.user_pool_size);
}

#[test]
fn test_interactive_answers_win_over_flags() {
    let config = Config::default();
    let matches = simulate_matches(&["--steps", "5", "--interactive"]);

    let settings = simulation_settings(&config, &matches, Cursor::new("8\n\n"), Vec::new())
        .unwrap()
        .unwrap();
    assert_eq!(settings.steps, 8);
    assert_eq!(settings.seed, None);
}

#[test]
fn test_interactive_bad_input_skips_run() {
    let config = Config::default();
    let matches = simulate_matches(&["--interactive"]);

    let settings =
        simulation_settings(&config, &matches, Cursor::new("x\n\n"), Vec::new()).unwrap();
    assert!(settings.is_none());
}

#[test]
fn test_invalid_settings_are_rejected() {
    let config = Config::default();
    let matches = simulate_matches(&["--steps", "0"]);

    let err = simulation_settings(&config, &matches, Cursor::new(""), Vec::new()).unwrap_err();
    assert!(err.to_string().contains("simulation.steps"));
}

#[test]
fn test_config_init_and_validate() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf()).unwrap();

    config_init(&manager).unwrap();
    assert!(manager.config_path().exists());

    // Second run leaves the file alone
    config_init(&manager).unwrap();
    config_validate(&manager).unwrap();
}

#[test]
fn test_config_validate_reports_problems() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf()).unwrap();
    std::fs::write(
        manager.config_path(),
        "[simulation]\nsteps = 0\n\n[library]\nreport_limit = 500\n",
    )
    .unwrap();

    let err = config_validate(&manager).unwrap_err();
    assert!(err.to_string().contains("2 problem"));
}

#[test]
fn test_config_show_renders() {
    config_show(&Config::default()).unwrap();
}
