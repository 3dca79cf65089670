//! Service configuration.

use std::time::Duration;

/// Runtime configuration, read from the environment with defaults matching
/// the reference deployment (Python classifier script, port 8080, local
/// frontend origin).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Classifier program (e.g. `python3`).
    pub classifier_program: String,
    /// Classifier script path, passed before the URL argument.
    pub classifier_script: String,
    /// Bound on one classifier invocation; `None` waits indefinitely.
    pub classifier_timeout: Option<Duration>,
    /// Allowed CORS origin; `*` allows any.
    pub allowed_origin: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            classifier_program: "python3".to_string(),
            classifier_script: "./scripts/predict_url.py".to_string(),
            classifier_timeout: None,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port: u16 = std::env::var("PHISHGUARD_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let classifier_program = std::env::var("PHISHGUARD_CLASSIFIER_PROGRAM")
            .unwrap_or(defaults.classifier_program);

        let classifier_script =
            std::env::var("PHISHGUARD_CLASSIFIER_SCRIPT").unwrap_or(defaults.classifier_script);

        // Unset or 0 leaves the wait unbounded.
        let classifier_timeout = std::env::var("PHISHGUARD_CLASSIFIER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);

        let allowed_origin =
            std::env::var("PHISHGUARD_ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin);

        Self {
            port,
            classifier_program,
            classifier_script,
            classifier_timeout,
            allowed_origin,
        }
    }
}
