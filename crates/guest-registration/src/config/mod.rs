use std::env;
use std::fmt;

/// Default upper bound of the guest-count selector.
pub const DEFAULT_MAX_GUESTS: u8 = 6;

/// Advisory per-file ceiling shown next to the upload controls (5 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub form: FormConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let max_guests = match env::var("REGISTRATION_MAX_GUESTS") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidMaxGuests { value: raw })?,
            Err(_) => DEFAULT_MAX_GUESTS,
        };

        let max_upload_bytes = match env::var("REGISTRATION_MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidUploadCeiling { value: raw })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let enforce_upload_ceiling = env::var("REGISTRATION_ENFORCE_UPLOAD_CEILING")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            form: FormConfig {
                max_guests,
                max_upload_bytes,
                enforce_upload_ceiling,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Bounds applied by the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    pub max_guests: u8,
    pub max_upload_bytes: u64,
    /// When false the upload ceiling is presentation guidance only.
    pub enforce_upload_ceiling: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_guests: DEFAULT_MAX_GUESTS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enforce_upload_ceiling: false,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMaxGuests { value: String },
    InvalidUploadCeiling { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxGuests { value } => write!(
                f,
                "REGISTRATION_MAX_GUESTS must be an integer between 1 and 255 (found '{}')",
                value
            ),
            ConfigError::InvalidUploadCeiling { value } => write!(
                f,
                "REGISTRATION_MAX_UPLOAD_BYTES must be a positive byte count (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
