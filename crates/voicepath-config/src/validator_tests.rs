use std::path::PathBuf;

use super::*;

fn has_error(result: &ValidationResult, path: &str) -> bool {
    result.errors.iter().any(|e| e.path == path)
}

fn has_warning(result: &ValidationResult, path: &str) -> bool {
    result.warnings.iter().any(|w| w.path == path)
}

#[test]
fn test_default_config_is_valid() {
    let result = ConfigValidator::validate(&Config::default()).unwrap();
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_zero_batch_size() {
    let mut config = Config::default();
    config.recorder.batch_size = 0;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(has_error(&result, "recorder.batch_size"));
}

#[test]
fn test_empty_retry_schedule() {
    let mut config = Config::default();
    config.recorder.retry_delays_ms.clear();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(has_error(&result, "recorder.retry_delays_ms"));

    config.recorder.max_retries = 0;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(has_warning(&result, "recorder.max_retries"));
}

#[test]
fn test_bad_urls() {
    let mut config = Config::default();
    config.api.base_url = "not a url".to_string();
    config.api.ws_url = "http://localhost:8000/ws".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(has_error(&result, "api.base_url"));
    assert!(has_error(&result, "api.ws_url"));
}

#[test]
fn test_zero_timeouts() {
    let mut config = Config::default();
    config.executor.wait_timeout_secs = 0;
    config.api.timeout_secs = 0;
    config.browser.response_timeout_ms = 0;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(has_error(&result, "executor.wait_timeout_secs"));
    assert!(has_error(&result, "api.timeout_secs"));
    assert!(has_error(&result, "browser.response_timeout_ms"));
}

#[test]
fn test_missing_bridge_script() {
    let mut config = Config::default();
    config.browser.bridge_script_path = Some(PathBuf::from("/nonexistent/bridge.js"));
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(has_error(&result, "browser.bridge_script_path"));
}

#[test]
fn test_profile_warnings() {
    let mut config = Config::default();
    config.profile.phone_number = Some("010-123".to_string());
    config.profile.birth_date = Some("1990-1-2".to_string());
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(has_warning(&result, "profile.phone_number"));
    assert!(has_warning(&result, "profile.birth_date"));
}

#[test]
fn test_into_result() {
    let mut config = Config::default();
    config.recorder.batch_size = 0;
    let err = ConfigValidator::validate(&config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "recorder.batch_size"));

    let warnings = ConfigValidator::validate(&Config::default())
        .unwrap()
        .into_result()
        .unwrap();
    assert!(warnings.is_empty());
}
