use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn run_config(dir: &std::path::Path, envs: &[(&str, &str)]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_codetags"))
        .current_dir(dir)
        .envs(envs.iter().copied())
        .arg("config")
        .output()
        .expect("Failed to run config command");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_env_override_with_nested_keys() {
    let temp_dir = TempDir::new().unwrap();

    // Double underscore separates nested levels
    let stdout = run_config(
        temp_dir.path(),
        &[
            ("CODETAGS_OUTPUT__SORT", "false"),
            ("CODETAGS_FIELDS__LANGUAGE", "Rust"),
        ],
    );
    assert!(stdout.contains("sort = false"));
    assert!(stdout.contains("language = \"Rust\""));
}

#[test]
fn test_env_beats_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(".codetags");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("settings.toml"),
        "[output]\nsilent = true\n\n[fields]\nlanguage = \"Zig\"\n",
    )
    .unwrap();

    let stdout = run_config(temp_dir.path(), &[("CODETAGS_FIELDS__LANGUAGE", "Odin")]);
    // Config file value is used when no env var is set
    assert!(stdout.contains("silent = true"));
    assert!(stdout.contains("language = \"Odin\""));
}

#[test]
fn test_explicit_config_path() {
    let temp_dir = TempDir::new().unwrap();
    let custom = temp_dir.path().join("custom.toml");
    fs::write(&custom, "[output]\nrelative = true\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_codetags"))
        .current_dir(temp_dir.path())
        .args(["--config", "custom.toml", "config"])
        .output()
        .expect("Failed to run config command");
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("relative = true"));
}
