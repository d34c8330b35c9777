//! Integration tests for rapor-config

use rapor_config::domains::logging::{LogFormat, LogLevel};
use rapor_config::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = RaporConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("RAPOR_API_BASE_URL", Some("https://shop.example.com/api")),
        ("RAPOR_API_TOKEN", Some("admin-token")),
        ("RAPOR_HTTP_TIMEOUT", Some("60")),
        ("RAPOR_LOG_LEVEL", Some("debug")),
        ("RAPOR_LOG_FORMAT", Some("json")),
        ("RAPOR_EXPORT_DIR", Some("/tmp/rapor-exports")),
        ("RAPOR_LOADTEST_EMAIL", Some("vu@example.com")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.token.as_deref(), Some("admin-token"));
        assert_eq!(config.http.timeout, Duration::from_secs(60));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.export.directory, PathBuf::from("/tmp/rapor-exports"));
        assert_eq!(config.loadtest.email, "vu@example.com");
    });
}

#[test]
fn test_invalid_env_value_is_reported() {
    with_vars(vec![("RAPOR_HTTP_TIMEOUT", Some("soon"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("SHOP_API_KEY", Some("k-123"))], || {
        let config = ConfigLoader::with_prefix("SHOP").from_env().unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("k-123"));
    });
}

#[test]
fn test_yaml_config_serialization() {
    let config = RaporConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();

    let parsed: RaporConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.loadtest.stages, config.loadtest.stages);
}

#[test]
fn test_comprehensive_config_file() {
    let yaml = r#"
api:
  base_url: "https://shop.example.com/api"
  token: "admin-token"
  api_key: "public-key"

http:
  timeout: 15
  user_agent: "rapor-test"
  verify_ssl: false

logging:
  level: warn
  format: compact

report:
  default_range: 30d
  default_channel: trendyol

export:
  directory: "./out"
  utf8_bom: true

loadtest:
  email: "vu@example.com"
  password: "secret"
  stages:
    - duration: 10
      target: 5
    - duration: 10
      target: 0
  thresholds:
    p95_ms: 750
    max_failure_rate: 0.05
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let cleared = vec![
        ("RAPOR_LOG_LEVEL", None::<&str>),
        ("RAPOR_HTTP_TIMEOUT", None),
    ];

    with_vars(cleared, || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("public-key"));
        assert_eq!(config.http.timeout, Duration::from_secs(15));
        assert!(!config.http.verify_ssl);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.report.default_range, "30d");
        assert_eq!(config.report.default_channel.as_deref(), Some("trendyol"));
        assert!(config.export.utf8_bom);
        assert_eq!(config.loadtest.stages.len(), 2);
        assert_eq!(config.loadtest.thresholds.p95_ms, 750);
    });
}

#[test]
fn test_invalid_domain_is_rejected() {
    let yaml = r#"
report:
  default_range: 90d
"#;
    with_vars(vec![("RAPOR_HTTP_TIMEOUT", None::<&str>)], || {
        let err = ConfigLoader::new().from_yaml_str(yaml).unwrap_err();
        match err {
            ConfigError::DomainError { domain, .. } => assert_eq!(domain, "report"),
            other => panic!("unexpected error: {other}"),
        }
    });
}

#[test]
fn test_missing_file() {
    let result = ConfigLoader::new().from_file("/definitely/not/here.yaml");
    assert!(matches!(result, Err(ConfigError::FileReadError(_))));
}
