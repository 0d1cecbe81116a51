//! Configuration module
//!
//! Process-wide settings for the HTTP server and the upload pipeline. The
//! configuration is read once at startup and then shared read-only by every
//! handler, so the storage and detection clients are built from a single source.

use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_MAX_LABELS, DEFAULT_MAX_REQUEST_BODY_BYTES, DEFAULT_MIN_CONFIDENCE, DEFAULT_PORT,
    DEFAULT_REGION, DEFAULT_REQUIRED_LABEL, DEFAULT_UPLOAD_URL_EXPIRY_SECS, MAX_DETECTION_LABELS,
    MAX_UPLOAD_URL_EXPIRY_SECS,
};

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_request_body_bytes: usize,
}

/// Content store and detection service settings
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub base: BaseConfig,
    /// Destination bucket. Optional at startup; the initiator reports a
    /// misconfiguration per request when it is absent.
    pub s3_bucket: Option<String>,
    pub aws_region: String,
    // Custom endpoint for S3-compatible providers (MinIO, LocalStack, ...)
    pub s3_endpoint: Option<String>,
    pub upload_url_expiry_secs: u64,
    pub detection_max_labels: i32,
    pub detection_min_confidence: f32,
    pub required_label: String,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            s3_bucket: None,
            aws_region: DEFAULT_REGION.to_string(),
            s3_endpoint: None,
            upload_url_expiry_secs: DEFAULT_UPLOAD_URL_EXPIRY_SECS,
            detection_max_labels: DEFAULT_MAX_LABELS,
            detection_min_confidence: DEFAULT_MIN_CONFIDENCE,
            required_label: DEFAULT_REQUIRED_LABEL.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PipelineConfig>);

impl Config {
    pub fn new(config: PipelineConfig) -> Self {
        Config(Box::new(config))
    }

    fn as_pipeline(&self) -> &PipelineConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PipelineConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_pipeline().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_pipeline().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.as_pipeline().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_pipeline().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_pipeline().base.environment
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.as_pipeline().base.max_request_body_bytes
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_pipeline().s3_bucket.as_deref()
    }

    pub fn aws_region(&self) -> &str {
        &self.as_pipeline().aws_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_pipeline().s3_endpoint.as_deref()
    }

    pub fn upload_url_expiry_secs(&self) -> u64 {
        self.as_pipeline().upload_url_expiry_secs
    }

    pub fn detection_max_labels(&self) -> i32 {
        self.as_pipeline().detection_max_labels
    }

    pub fn detection_min_confidence(&self) -> f32 {
        self.as_pipeline().detection_min_confidence
    }

    pub fn required_label(&self) -> &str {
        &self.as_pipeline().required_label
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

/// Read a numeric environment variable. Unset or blank means `default`; anything
/// that does not parse is a startup error.
fn env_number<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    parse_number(name, env::var(name).ok().as_deref(), default)
}

fn parse_number<T: FromStr>(name: &str, raw: Option<&str>, default: T) -> Result<T, anyhow::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, value)),
    }
}

/// First non-empty value among the given environment variables.
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment =
            first_env(&["ENVIRONMENT", "APP_ENV"]).unwrap_or_else(|| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env_number("PORT", DEFAULT_PORT)?,
            cors_origins,
            environment,
            max_request_body_bytes: env_number(
                "MAX_REQUEST_BODY_BYTES",
                DEFAULT_MAX_REQUEST_BODY_BYTES,
            )?,
        };

        let config = PipelineConfig {
            base,
            s3_bucket: first_env(&["AWS_S3_BUCKET_NAME", "S3_BUCKET"]),
            aws_region: first_env(&["AWS_REGION_NAME", "AWS_REGION"])
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: first_env(&["S3_ENDPOINT"]),
            upload_url_expiry_secs: env_number(
                "UPLOAD_URL_EXPIRY_SECS",
                DEFAULT_UPLOAD_URL_EXPIRY_SECS,
            )?,
            detection_max_labels: env_number("DETECTION_MAX_LABELS", DEFAULT_MAX_LABELS)?,
            detection_min_confidence: env_number(
                "DETECTION_MIN_CONFIDENCE",
                DEFAULT_MIN_CONFIDENCE,
            )?,
            required_label: first_env(&["REQUIRED_LABEL"])
                .unwrap_or_else(|| DEFAULT_REQUIRED_LABEL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_url_expiry_secs == 0 {
            return Err(anyhow::anyhow!(
                "UPLOAD_URL_EXPIRY_SECS must be greater than zero"
            ));
        }

        if self.upload_url_expiry_secs > MAX_UPLOAD_URL_EXPIRY_SECS {
            return Err(anyhow::anyhow!(
                "UPLOAD_URL_EXPIRY_SECS must be at most {}",
                MAX_UPLOAD_URL_EXPIRY_SECS
            ));
        }

        if !(1..=MAX_DETECTION_LABELS).contains(&self.detection_max_labels) {
            return Err(anyhow::anyhow!(
                "DETECTION_MAX_LABELS must be between 1 and {}",
                MAX_DETECTION_LABELS
            ));
        }

        if !(0.0..=100.0).contains(&self.detection_min_confidence) {
            return Err(anyhow::anyhow!(
                "DETECTION_MIN_CONFIDENCE must be between 0 and 100"
            ));
        }

        if self.required_label.trim().is_empty() {
            return Err(anyhow::anyhow!("REQUIRED_LABEL must not be empty"));
        }

        if self.base.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("CORS_ORIGINS must list at least one origin"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new(PipelineConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.upload_url_expiry_secs(), 3600);
        assert_eq!(config.detection_max_labels(), 10);
        assert_eq!(config.detection_min_confidence(), 70.0);
        assert_eq!(config.required_label(), "Dog");
        assert_eq!(config.aws_region(), "eu-central-1");
        assert!(config.s3_bucket().is_none());
    }

    #[test]
    fn test_validate_rejects_zero_expiry() {
        let config = PipelineConfig {
            upload_url_expiry_secs: 0,
            ..PipelineConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("UPLOAD_URL_EXPIRY_SECS"), "got: {}", err);
    }

    #[test]
    fn test_validate_rejects_expiry_beyond_seven_days() {
        let config = PipelineConfig {
            upload_url_expiry_secs: MAX_UPLOAD_URL_EXPIRY_SECS + 1,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            upload_url_expiry_secs: MAX_UPLOAD_URL_EXPIRY_SECS,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_caps_max_labels() {
        let config = PipelineConfig {
            detection_max_labels: MAX_DETECTION_LABELS + 1,
            ..PipelineConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("DETECTION_MAX_LABELS"), "got: {}", err);

        let config = PipelineConfig {
            detection_max_labels: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_number_rejects_malformed_values() {
        let err = parse_number("DETECTION_MAX_LABELS", Some("ten"), DEFAULT_MAX_LABELS)
            .unwrap_err()
            .to_string();
        assert_eq!(err, "DETECTION_MAX_LABELS must be a valid number, got 'ten'");

        assert!(parse_number("DETECTION_MIN_CONFIDENCE", Some("70%"), 70.0_f32).is_err());
        assert!(parse_number("UPLOAD_URL_EXPIRY_SECS", Some("-5"), 3600_u64).is_err());
    }

    #[test]
    fn test_parse_number_defaults_and_trims() {
        assert_eq!(parse_number("PORT", None, DEFAULT_PORT).unwrap(), DEFAULT_PORT);
        assert_eq!(parse_number("PORT", Some("  "), DEFAULT_PORT).unwrap(), DEFAULT_PORT);
        assert_eq!(parse_number("DETECTION_MAX_LABELS", Some(" 25 "), 10).unwrap(), 25);
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        let config = PipelineConfig {
            detection_min_confidence: 150.0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_required_label() {
        let config = PipelineConfig {
            required_label: "  ".to_string(),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut pipeline = PipelineConfig::default();
        pipeline.base.environment = "PROD".to_string();
        assert!(Config::new(pipeline).is_production());
        assert!(!Config::new(PipelineConfig::default()).is_production());
    }
}
