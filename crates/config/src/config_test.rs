//! Tests for configuration parsing and validation

use std::str::FromStr;

use chrono::Duration;

use klaxon_classify::DetectionRule;
use klaxon_pipeline::{BootstrapSource, Durability};

use crate::{Config, ConfigError};

#[test]
fn test_empty_config_gets_defaults() {
    let config = Config::from_str("").unwrap();
    assert_eq!(config.api.bind, "127.0.0.1:8080");
    assert_eq!(config.store.max_events, 10_000);
    assert_eq!(config.store.retention_days, 35);
    assert_eq!(config.classifier.rule, DetectionRule::Lenient);
    assert_eq!(config.pipeline.durability, Durability::BestEffort);
    assert_eq!(config.bootstrap.source, BootstrapSource::Durable);
    assert_eq!(config.log.level, "info");
}

#[test]
fn test_full_config() {
    let config = Config::from_str(
        r#"
        [api]
        bind = "0.0.0.0:9000"

        [store]
        max_events = 500
        retention_days = 7

        [classifier]
        rule = "strict-suffix"

        [pipeline]
        durability = "required"

        [bootstrap]
        window = "PT30M"
        source = "recent"

        [log]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.api.bind_addr().unwrap().port(), 9000);
    assert_eq!(config.store.max_events, 500);
    assert_eq!(
        config.store.store_config().retention,
        Duration::days(7)
    );
    assert_eq!(config.classifier.rule, DetectionRule::StrictSuffix);
    assert_eq!(config.pipeline.durability, Durability::Required);
    assert_eq!(
        config.bootstrap.window().unwrap().duration(),
        Duration::minutes(30)
    );
    assert_eq!(config.bootstrap.source, BootstrapSource::Recent);
}

#[test]
fn test_zero_max_events_rejected() {
    let err = Config::from_str("[store]\nmax_events = 0").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "max_events", .. }));
}

#[test]
fn test_bad_bind_rejected() {
    let err = Config::from_str("[api]\nbind = \"not-an-addr\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "bind", .. }));
}

#[test]
fn test_bad_window_rejected() {
    let err = Config::from_str("[bootstrap]\nwindow = \"10 minutes\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "window", .. }));
}

#[test]
fn test_unknown_rule_rejected() {
    let err = Config::from_str("[classifier]\nrule = \"both\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::from_str("[store]\nmax_size = 10").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Config::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
