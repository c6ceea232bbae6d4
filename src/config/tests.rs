//! Configuration tests
//!
//! Guards that every field survives `to_toml` and that precedence holds.

use super::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = Config::from_sources(parsed.unwrap(), no_env());
    assert_eq!(reloaded, config);
}

#[test]
fn test_config_roundtrip_all_fields() {
    let config = Config {
        api_url: "https://buddy.example.edu/api".to_string(),
        request_timeout_secs: 30,
        include_enrichment: false,
        export_dir: Some(PathBuf::from("/tmp/study \"exports\"")),
        logging: LoggingConfig {
            level: "debug".to_string(),
            file_enabled: true,
            file_dir: PathBuf::from("/var/log/study-buddy"),
            file_rotation: LogRotation::Hourly,
            file_prefix: "sb".to_string(),
        },
    };

    let reloaded = Config::from_sources(parse(&config.to_toml()), no_env());
    assert_eq!(reloaded, config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_without_file_or_env() {
    let config = Config::from_sources(FileConfig::default(), no_env());
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert!(config.include_enrichment);
    assert_eq!(config.export_dir, None);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_env_beats_file() {
    let file = parse(
        r#"
api_url = "http://file:9000"
export_dir = "/from/file"
"#,
    );
    let env = env_from(&[
        ("STUDY_BUDDY_API_URL", "http://env:7000"),
        ("STUDY_BUDDY_EXPORT_DIR", "/from/env"),
    ]);

    let config = Config::from_sources(file, env);
    assert_eq!(config.api_url, "http://env:7000");
    assert_eq!(config.export_dir, Some(PathBuf::from("/from/env")));
}

#[test]
fn test_blank_env_falls_through_to_file() {
    let file = parse(r#"api_url = "http://file:9000""#);
    let config = Config::from_sources(file, env_from(&[("STUDY_BUDDY_API_URL", "  ")]));
    assert_eq!(config.api_url, "http://file:9000");
}

#[test]
fn test_no_enrichment_env_overrides_file() {
    let file = parse("include_enrichment = true");
    let config = Config::from_sources(file, env_from(&[("STUDY_BUDDY_NO_ENRICHMENT", "1")]));
    assert!(!config.include_enrichment);

    let file = parse("include_enrichment = false");
    let config = Config::from_sources(file, env_from(&[("STUDY_BUDDY_NO_ENRICHMENT", "0")]));
    assert!(!config.include_enrichment);
}

#[test]
fn test_zero_timeout_uses_default() {
    let config = Config::from_sources(parse("request_timeout_secs = 0"), no_env());
    assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
fn test_configured_export_dir_wins() {
    let config = Config {
        export_dir: Some(PathBuf::from("/srv/pdfs")),
        ..Config::default()
    };
    assert_eq!(config.resolved_export_dir(), PathBuf::from("/srv/pdfs"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging section
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_logging_partial_section() {
    let file = parse(
        r#"
[logging]
level = "warn"
file_rotation = "NEVER"
"#,
    );
    let config = Config::from_sources(file, no_env());
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert!(!config.logging.file_enabled);
    assert_eq!(config.logging.file_prefix, "study-buddy");
}

#[test]
fn test_unknown_rotation_is_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("Hourly"), LogRotation::Hourly);
}

#[test]
fn test_unknown_keys_are_tolerated() {
    let parsed: Result<FileConfig, _> = toml::from_str("theme = \"dark\"\n[extra]\nx = 1\n");
    assert!(parsed.is_ok());
}
