//! End-to-end tests for `courtboard config` commands.

mod fixtures;
use fixtures::*;

#[test]
fn test_config_show_defaults() {
    let env = TestEnv::new();

    let output = env
        .command(&["config", "show", "--json"])
        .output()
        .expect("Failed to execute command");
    assert_success(&output, "Show config");

    let json = stdout_json(&output);
    assert_eq!(json["max_players"], 27);
    assert_eq!(json["max_waitlist"], 20);
    assert!(json.get("font_path").is_none());
    assert!(json["data_dir"]
        .as_str()
        .unwrap()
        .ends_with("Courtboard/data"));
}

#[test]
fn test_config_set_persists() {
    let env = TestEnv::new();
    let data_dir = env.data_dir();

    let output = env
        .command(&[
            "config",
            "set",
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--max-players",
            "12",
        ])
        .output()
        .expect("Failed to execute command");
    assert_success(&output, "Set config");
    assert!(data_dir.is_dir(), "Data dir should be created");
    assert!(env.config_home().join("Courtboard/config.toml").is_file());

    let output = env
        .command(&["config", "show", "--json"])
        .output()
        .expect("Failed to execute command");
    let json = stdout_json(&output);
    assert_eq!(json["max_players"], 12);
    assert_eq!(json["data_dir"], data_dir.to_str().unwrap());

    // Data commands now find the configured directory without a flag
    let output = env
        .command(&["courts", "autofill", "--target", "7"])
        .output()
        .expect("Failed to execute command");
    assert_success(&output, "Autofill");
    assert!(data_dir.join("court_layout.json").is_file());
}

#[test]
fn test_config_set_requires_an_option() {
    let env = TestEnv::new();

    let output = env
        .command(&["config", "set"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("At least one configuration option"));
}

#[test]
fn test_config_set_rejects_zero_capacity() {
    let env = TestEnv::new();

    let output = env
        .command(&["config", "set", "--max-waitlist", "0"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(!env.config_home().join("Courtboard/config.toml").exists());
}

#[test]
fn test_invalid_config_file_is_reported() {
    let env = TestEnv::new();
    let config_dir = env.config_home().join("Courtboard");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[roster\nmax_players = ").unwrap();

    let output = env.run(&["courts", "list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load configuration"));
}
