// tests/config_load.rs
use finance_insight_dashboard::config::{DashboardConfig, DEFAULT_NEWS_ENDPOINT};
use std::{env, fs};

#[test]
fn load_from_reads_a_full_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.toml");
    fs::write(
        &path,
        r#"
news_endpoint = "http://localhost:9000/api/news"
quote_api_key = "demo"
watched_symbols = ["AAPL", "KO"]
bind_addr = "127.0.0.1:9999"
"#,
    )
    .unwrap();

    let cfg = DashboardConfig::load_from(&path).unwrap();
    assert_eq!(cfg.news_endpoint, "http://localhost:9000/api/news");
    assert_eq!(cfg.quote_api_key, "demo");
    assert_eq!(cfg.watched_symbols, vec!["AAPL", "KO"]);
    assert_eq!(cfg.bind_addr, "127.0.0.1:9999");
    // Unspecified fields keep their defaults.
    assert_eq!(cfg.static_dir, "static");
}

#[serial_test::serial]
#[test]
fn load_prefers_env_path_and_applies_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.toml");
    fs::write(&path, r#"news_endpoint = "http://from-file/api/news""#).unwrap();

    env::set_var("DASHBOARD_CONFIG_PATH", path.display().to_string());
    env::remove_var("NEWS_ENDPOINT");
    env::set_var("ALPHAVANTAGE_API_KEY", "key-from-env");

    let cfg = DashboardConfig::load().unwrap();
    assert_eq!(cfg.news_endpoint, "http://from-file/api/news");
    assert_eq!(cfg.quote_api_key, "key-from-env");

    // Field-level env override beats the file.
    env::set_var("NEWS_ENDPOINT", "http://from-env/api/news");
    let cfg = DashboardConfig::load().unwrap();
    assert_eq!(cfg.news_endpoint, "http://from-env/api/news");

    env::remove_var("DASHBOARD_CONFIG_PATH");
    env::remove_var("NEWS_ENDPOINT");
    env::remove_var("ALPHAVANTAGE_API_KEY");
}

#[serial_test::serial]
#[test]
fn missing_env_path_is_an_error_but_missing_default_file_is_not() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var("NEWS_ENDPOINT");
    env::remove_var("ALPHAVANTAGE_API_KEY");

    // Nonexistent explicit path fails loudly.
    env::set_var("DASHBOARD_CONFIG_PATH", "/definitely/not/here.toml");
    assert!(DashboardConfig::load().is_err());
    env::remove_var("DASHBOARD_CONFIG_PATH");

    // No config file at all falls back to defaults.
    let cfg = DashboardConfig::load().unwrap();
    assert_eq!(cfg.news_endpoint, DEFAULT_NEWS_ENDPOINT);

    env::set_current_dir(&old).unwrap();
}
