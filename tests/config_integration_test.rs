use std::fs;
use tempfile::tempdir;
use url_frontier::config::ConfigManager;
use url_frontier::UrlFrontier;

#[test]
fn test_config_file_builds_frontier() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("frontier.toml");

    let config_content = r#"
log-format = "json"

[frontier]
queue-capacity = 64
push-timeout-ms = 5
pop-timeout-ms = 20

[small]
queue-capacity = 2
"#;

    fs::write(&config_path, config_content).expect("Failed to write config file");

    let manager = ConfigManager::load_from_file(config_path.clone()).expect("Config should load");
    assert_eq!(manager.get_value("base", "log-format").unwrap(), "json");

    let frontier = UrlFrontier::from_config(&manager.get_frontier_config().unwrap());
    assert_eq!(frontier.capacity(), 64);
    assert!(frontier.next_url().is_none());

    let mut manager = ConfigManager::load_from_file(config_path).unwrap();
    manager.select_section("small".to_string());
    assert_eq!(manager.get_frontier_config().unwrap().queue_capacity, 2);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let result = ConfigManager::load_from_file(temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}
