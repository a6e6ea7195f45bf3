use std::collections::HashMap;
use std::env;
use std::fmt;

/// Backward offset applied to signing timestamps when none is configured.
pub const DEFAULT_CLOCK_SKEW_SECONDS: i64 = 30;

/// How long an issued signature is accepted by `verify_signature`.
pub const DEFAULT_MAX_SIGNATURE_AGE_SECONDS: i64 = 7200;

/// Upper bound for `SIGNATURE_CLOCK_SKEW_SECONDS` (one day).
pub const MAX_CLOCK_SKEW_SECONDS: i64 = 86_400;

/// Upper bound for `SIGNATURE_MAX_AGE_SECONDS` (one week).
pub const MAX_SIGNATURE_AGE_SECONDS: i64 = 604_800;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub zoom_api_key: String,
    pub zoom_api_secret: String,
    pub clock_skew_seconds: i64,
    pub max_signature_age_seconds: i64,
}

/// The API secret never shows up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("zoom_api_key", &self.zoom_api_key)
            .field("zoom_api_secret", &"[REDACTED]")
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .field("max_signature_age_seconds", &self.max_signature_age_seconds)
            .finish()
    }
}

impl Config {
    /// Read from the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a map (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Ok(Config {
            server_host: vars
                .get("SERVER_HOST")
                .cloned()
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: vars
                .get("SERVER_PORT")
                .map(String::as_str)
                .unwrap_or("8080")
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            zoom_api_key: required(vars, "ZOOM_API_KEY")?,
            zoom_api_secret: required(vars, "ZOOM_API_SECRET")?,
            clock_skew_seconds: number_or(
                vars,
                "SIGNATURE_CLOCK_SKEW_SECONDS",
                DEFAULT_CLOCK_SKEW_SECONDS,
                MAX_CLOCK_SKEW_SECONDS,
            )?,
            max_signature_age_seconds: number_or(
                vars,
                "SIGNATURE_MAX_AGE_SECONDS",
                DEFAULT_MAX_SIGNATURE_AGE_SECONDS,
                MAX_SIGNATURE_AGE_SECONDS,
            )?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    vars.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn number_or(
    vars: &HashMap<String, String>,
    name: &str,
    default: i64,
    max: i64,
) -> Result<i64, ConfigError> {
    match vars.get(name) {
        Some(raw) => {
            let value: i64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber(name.to_string()))?;
            if !(0..=max).contains(&value) {
                return Err(ConfigError::OutOfRange(name.to_string(), max));
            }
            Ok(value)
        }
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("{0} environment variable is required")]
    MissingEnvVar(String),
    #[error("{0} must be an integer")]
    InvalidNumber(String),
    #[error("{0} must be between 0 and {1}")]
    OutOfRange(String, i64),
    #[error("Invalid meeting SDK credential: {0}")]
    InvalidCredential(&'static str),
}
