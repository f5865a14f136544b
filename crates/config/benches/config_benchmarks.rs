//! Benchmarks for configuration system
//!
//! Run with: cargo bench --package shelfkeeper-config

use criterion::{criterion_group, criterion_main, Criterion};
use shelfkeeper_config::{apply_overrides, Config, ConfigManager};
use std::hint::black_box;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_test_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().to_path_buf();
    (temp_dir, config_path)
}

fn bench_config_validation(c: &mut Criterion) {
    let config = Config::default();

    c.bench_function("config_validate", |b| {
        b.iter(|| black_box(config.validate()));
    });
}

fn bench_config_serialization(c: &mut Criterion) {
    let config = Config::default();
    let toml_string = toml::to_string(&config).expect("Failed to serialize");

    c.bench_function("config_serialize_toml", |b| {
        b.iter(|| black_box(toml::to_string(&config).expect("Failed to serialize")));
    });

    c.bench_function("config_deserialize_toml", |b| {
        b.iter(|| {
            let config: Config = toml::from_str(&toml_string).expect("Failed to deserialize");
            black_box(config)
        });
    });
}

fn bench_config_save_load(c: &mut Criterion) {
    let (_temp_dir, config_dir) = setup_test_dir();
    let manager = ConfigManager::with_directory(config_dir).expect("Failed to create manager");
    let config = Config::default();

    c.bench_function("config_save", |b| {
        b.iter(|| manager.save(&config).expect("Failed to save"));
    });

    c.bench_function("config_load", |b| {
        b.iter(|| black_box(manager.load().expect("Failed to load")));
    });
}

fn bench_env_overrides(c: &mut Criterion) {
    c.bench_function("config_apply_overrides", |b| {
        b.iter(|| {
            let mut config = Config::default();
            apply_overrides(&mut config, |key| {
                key.ends_with("STEPS").then(|| "40".to_string())
            })
            .expect("Failed to apply");
            black_box(config)
        });
    });
}

criterion_group!(
    benches,
    bench_config_validation,
    bench_config_serialization,
    bench_config_save_load,
    bench_env_overrides
);

criterion_main!(benches);
