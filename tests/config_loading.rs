mod common;

use bocha_search::config::{self, Config, DebugLogRotation, Freshness};
use common::TestFixture;

#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new();
    let path = fixture.create_file(
        "config.toml",
        r#"
debug = true
debug_log_rotation = "daily"
debug_log_keep = 3

[search]
bocha_api_key = "bocha-from-file"
langsearch_api_key = "lang-from-file"
ai_search_count = 30
citation_links = false
freshness = "oneMonth"
timeout_secs = 60
"#,
    );

    let config = config::load_config_from(&path).unwrap();
    assert!(config.debug);
    assert_eq!(config.debug_log_rotation, Some(DebugLogRotation::Daily));
    assert_eq!(config.debug_log_keep, Some(3));
    assert_eq!(config.search.bocha_api_key, "bocha-from-file");
    assert_eq!(config.search.langsearch_api_key, "lang-from-file");
    assert_eq!(config.search.ai_search_count, 30);
    assert!(!config.search.citation_links);
    assert_eq!(config.search.freshness, Freshness::OneMonth);
    assert_eq!(config.search.timeout_secs, 60);
    // Unset keys keep their defaults
    assert_eq!(
        config.search.chinese_web_search_endpoint,
        "https://api.bochaai.com/v1/web-search"
    );
}

#[test]
fn test_save_then_load() {
    let fixture = TestFixture::new();
    let path = fixture.path().join("saved.toml");

    let mut config = Config::default();
    config.search.freshness = Freshness::OneYear;
    config.search.english_search_count = 4;
    config::save_config_to(&config, &path).unwrap();

    let written = fixture.read_file("saved.toml");
    assert!(written.contains("freshness = \"oneYear\""));

    let loaded = config::load_config_from(&path).unwrap();
    assert_eq!(loaded.search.freshness, Freshness::OneYear);
    assert_eq!(loaded.search.english_search_count, 4);
}

#[test]
fn test_invalid_freshness_is_rejected() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("bad.toml", "[search]\nfreshness = \"oneDecade\"\n");

    let err = config::load_config_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config file"));
}

#[test]
fn test_missing_file_is_an_error() {
    let fixture = TestFixture::new();
    let err = config::load_config_from(&fixture.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
