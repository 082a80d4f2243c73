#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use stain_cli::settings::{SamplingSettings, Settings};
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("settings.toml"));

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.sampling.default_points, 1000);
    assert_eq!(settings.sampling.min_points, 100);
    assert_eq!(settings.sampling.max_points, 5000);
    assert_eq!(settings.sampling.step, 100);
    assert_eq!(settings.sampling.seed, None);
    assert_eq!(settings.preview.max_size, 100);
    assert_eq!(settings.history.path, None);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        "[sampling]\ndefault_points = 2500\nseed = 7\n\n[history]\npath = \"/tmp/h.json\"\n",
    )
    .unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(
        settings.sampling,
        SamplingSettings {
            default_points: 2500,
            seed: Some(7),
            ..SamplingSettings::default()
        }
    );
    assert_eq!(settings.history_path(), PathBuf::from("/tmp/h.json"));
    assert_eq!(settings.preview.max_size, 100);
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[sampling\ndefault_points = ").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Settings::default();
    settings.sampling.max_points = 8000;
    settings.sampling.seed = Some(42);
    settings.preview.max_size = 64;
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_default_toml_omits_unset_options() {
    let toml = Settings::default().to_toml().unwrap();
    assert!(toml.contains("[sampling]"));
    assert!(toml.contains("default_points = 1000"));
    assert!(!toml.contains("seed"));
}
