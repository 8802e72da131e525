//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_executor(config, &mut result);
        Self::validate_recorder(config, &mut result);
        Self::validate_api(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_profile(config, &mut result);

        Ok(result)
    }

    fn validate_executor(config: &Config, result: &mut ValidationResult) {
        let executor = &config.executor;
        if executor.wait_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "executor.wait_timeout_secs",
                "wait_timeout_secs must be greater than 0",
            ));
        }
        if executor.selector_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "executor.selector_timeout_ms",
                "selector_timeout_ms must be greater than 0",
            ));
        }
        if executor.step_delay_ms > 10_000 {
            result.add_warning(ValidationWarning::new(
                "executor.step_delay_ms",
                "step delay is over 10s, replays will be very slow",
            ));
        }
    }

    fn validate_recorder(config: &Config, result: &mut ValidationResult) {
        let recorder = &config.recorder;
        if recorder.batch_size == 0 {
            result.add_error(ValidationError::new(
                "recorder.batch_size",
                "batch_size must be greater than 0",
            ));
        }
        if recorder.retry_delays_ms.is_empty() && recorder.max_retries > 0 {
            result.add_error(ValidationError::new(
                "recorder.retry_delays_ms",
                "retry schedule cannot be empty while max_retries > 0",
            ));
        }
        if recorder.session_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "recorder.session_timeout_secs",
                "session_timeout_secs must be greater than 0",
            ));
        }
        if recorder.max_task_length == 0 {
            result.add_error(ValidationError::new(
                "recorder.max_task_length",
                "max_task_length must be greater than 0",
            ));
        }
        if recorder.debounce_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "recorder.debounce_ms",
                "debounce is disabled, every keystroke is recorded as a step",
            ));
        }
        if recorder.max_retries == 0 {
            result.add_warning(ValidationWarning::new(
                "recorder.max_retries",
                "transmissions are never retried",
            ));
        }
    }

    fn validate_api(config: &Config, result: &mut ValidationResult) {
        let api = &config.api;
        Self::check_url(
            "api.base_url",
            &api.base_url,
            &["http", "https"],
            result,
        );
        Self::check_url("api.ws_url", &api.ws_url, &["ws", "wss"], result);

        if api.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "api.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }
        if api.search_limit == 0 {
            result.add_error(ValidationError::new(
                "api.search_limit",
                "search_limit must be greater than 0",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;
        if browser.response_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.response_timeout_ms",
                "response_timeout_ms must be greater than 0",
            ));
        }
        if browser.response_timeout_ms < browser.navigation_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "browser.response_timeout_ms",
                "bridge response timeout is shorter than the navigation timeout",
            ));
        }
        if let Some(ref script) = browser.bridge_script_path {
            if !script.exists() {
                result.add_error(ValidationError::new(
                    "browser.bridge_script_path",
                    format!("{} does not exist", script.display()),
                ));
            }
        }
    }

    fn validate_profile(config: &Config, result: &mut ValidationResult) {
        if let Some(phone) = config.profile.phone_number() {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            if !(10..=11).contains(&digits) {
                result.add_warning(ValidationWarning::new(
                    "profile.phone_number",
                    "phone number should have 10 or 11 digits, it will not be auto-filled",
                ));
            }
        }
        if let Some(birth) = config.profile.birth_date() {
            let digits = birth.chars().filter(char::is_ascii_digit).count();
            if digits != 8 {
                result.add_warning(ValidationWarning::new(
                    "profile.birth_date",
                    "birth date should be YYYYMMDD, it will not be auto-filled",
                ));
            }
        }
    }

    fn check_url(field: &str, value: &str, schemes: &[&str], result: &mut ValidationResult) {
        match Url::parse(value) {
            Ok(url) if schemes.contains(&url.scheme()) => {}
            Ok(url) => result.add_error(ValidationError::new(
                field,
                format!(
                    "scheme '{}' not supported, expected one of: {}",
                    url.scheme(),
                    schemes.join(", ")
                ),
            )),
            Err(e) => result.add_error(ValidationError::new(
                field,
                format!("invalid URL '{}': {}", value, e),
            )),
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
