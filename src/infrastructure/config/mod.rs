use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;

pub const DEFAULT_FEED_LIMIT: i64 = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Absolute http(s) URL of the managed data service. Optional: when
    /// missing or malformed the feedback feature degrades instead of failing.
    pub service_url: Option<String>,
    /// Service credential, structurally a three-segment signed token.
    pub service_credential: Option<String>,
    /// Rolling window size for the recent-feedback feed.
    pub feed_limit: i64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .map(|s| match s.as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            })
            .unwrap_or(Environment::Development);

        // Structured logs in production unless explicitly overridden.
        let log_format = env::var("LOG_FORMAT")
            .map(|s| match s.as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            })
            .unwrap_or(if environment == Environment::Production {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            });

        let config = Config {
            service_url: non_empty_var("SERVICE_ENDPOINT_URL"),
            service_credential: non_empty_var("SERVICE_CREDENTIAL"),
            feed_limit: env::var("FEED_LIMIT")
                .unwrap_or_else(|_| DEFAULT_FEED_LIMIT.to_string())
                .parse()?,
            environment,
            log_format,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Configuration Guard: true only when both service settings are present
    /// and structurally valid. Every data-service call site checks this first
    /// so a missing or malformed environment degrades the feedback feature
    /// instead of crashing the process.
    pub fn is_configured(&self) -> bool {
        self.validated_endpoint().is_ok() && self.validated_credential().is_ok()
    }

    /// Endpoint URL, or a descriptive error naming the failed check.
    pub fn validated_endpoint(&self) -> AppResult<&str> {
        let url = self.service_url.as_deref().ok_or_else(|| {
            AppError::Configuration("SERVICE_ENDPOINT_URL is not set".to_string())
        })?;

        if !is_absolute_http_url(url) {
            return Err(AppError::Configuration(format!(
                "SERVICE_ENDPOINT_URL is not an absolute http(s) URL: {url}"
            )));
        }

        Ok(url)
    }

    /// Service credential, or a descriptive error naming the failed check.
    pub fn validated_credential(&self) -> AppResult<&str> {
        let credential = self.service_credential.as_deref().ok_or_else(|| {
            AppError::Configuration("SERVICE_CREDENTIAL is not set".to_string())
        })?;

        if !is_signed_token(credential) {
            return Err(AppError::Configuration(
                "SERVICE_CREDENTIAL is not a three-segment signed token".to_string(),
            ));
        }

        Ok(credential)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_absolute_http_url(url: &str) -> bool {
    let host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    matches!(host, Some(rest) if !rest.is_empty() && !rest.starts_with('/'))
}

/// Structural check only: exactly three dot-delimited segments whose first
/// segment decodes to a JOSE header. No signature verification happens here,
/// the service itself authenticates the credential.
fn is_signed_token(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return false;
    }

    jsonwebtoken::decode_header(token).is_ok()
}
