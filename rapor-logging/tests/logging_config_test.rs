use rapor_logging::{
    build_env_filter, init_logging_from_config, init_simple_tracing, LogFormat, LogLevel,
    LoggingConfig,
};

#[test]
fn test_logging_config_integration() {
    let yaml_config = r#"
level: debug
format: json
directives: "hyper=warn"
include_location: true
"#;

    let config: LoggingConfig = serde_yaml::from_str(yaml_config).unwrap();

    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.filter_directives(), "debug,hyper=warn");
    assert!(config.include_target);

    // Initialising twice must not panic
    init_logging_from_config(&config, None).unwrap();
    init_logging_from_config(&config, Some("trace")).unwrap();
    init_simple_tracing("warn").unwrap();
}

#[test]
fn test_minimal_logging_config() {
    let config: LoggingConfig = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.format, LogFormat::Text);
    assert!(!config.include_location);
}

#[test]
fn test_override_level_wins() {
    let config = LoggingConfig::default();
    let filter = build_env_filter(&config, Some("rapor_core=trace"));
    assert!(filter.to_string().contains("rapor_core=trace"));
}
