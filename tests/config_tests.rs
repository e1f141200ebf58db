// Config loading and validation tests

use botboard::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8080
host = "0.0.0.0"

[dashboard]
static_dir = "static"

[monitoring]
active_window_secs = 15.0
history_capacity = 100
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.dashboard.static_dir, "static");
    assert_eq!(config.monitoring.active_window_secs, 15.0);
    assert_eq!(config.monitoring.history_capacity, 100);
}

#[test]
fn test_config_defaults_when_sections_omitted() {
    let minimal = r#"
[server]
port = 8080
host = "127.0.0.1"
"#;
    let config = AppConfig::load_from_str(minimal).expect("minimal config");
    assert_eq!(config.dashboard.static_dir, "static");
    assert_eq!(config.monitoring.active_window_secs, 15.0);
    assert_eq!(config.monitoring.history_capacity, 100);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8080", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_static_dir() {
    let bad = VALID_CONFIG.replace("static_dir = \"static\"", "static_dir = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("static_dir"));
}

#[test]
fn test_config_validation_rejects_zero_active_window() {
    let bad = VALID_CONFIG.replace("active_window_secs = 15.0", "active_window_secs = 0.0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("active_window_secs"));
}

#[test]
fn test_config_validation_rejects_zero_history_capacity() {
    let bad = VALID_CONFIG.replace("history_capacity = 100", "history_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("history_capacity"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.monitoring.history_capacity, 100);
}
