use anyhow::{bail, Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    /// Explicit `LOG_FORMAT`; otherwise JSON in prod, pretty elsewhere.
    pub log_format: Option<LogFormat>,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Prediction service
    pub prediction_service_url: String,
    pub prediction_service_timeout_seconds: u64,
    pub health_check_timeout_seconds: u64,

    /// Seed for the sampled payload fields; entropy when unset.
    pub prediction_rng_seed: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::from_str(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => Some(
                LogFormat::parse(&raw).with_context(|| format!("Unknown LOG_FORMAT: {raw}"))?,
            ),
            None => None,
        };

        // CORS
        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Prediction service
        let prediction_service_url =
            lookup("PREDICTION_SERVICE_URL").unwrap_or_else(|| "http://localhost:5000".to_string());
        url::Url::parse(&prediction_service_url)
            .with_context(|| format!("PREDICTION_SERVICE_URL is not a valid URL: {prediction_service_url}"))?;

        let prediction_service_timeout_seconds = lookup("PREDICTION_SERVICE_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        if prediction_service_timeout_seconds == 0 {
            bail!("PREDICTION_SERVICE_TIMEOUT_SECONDS must be greater than zero");
        }

        let health_check_timeout_seconds = lookup("HEALTH_CHECK_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(5);

        let prediction_rng_seed = match lookup("PREDICTION_RNG_SEED") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .context("PREDICTION_RNG_SEED must be an unsigned integer")?,
            ),
            None => None,
        };

        Ok(Settings {
            env,
            server_addr,
            log_format,
            cors_allow_origins,
            prediction_service_url,
            prediction_service_timeout_seconds,
            health_check_timeout_seconds,
            prediction_rng_seed,
        })
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or(match self.env {
            Environment::Prod => LogFormat::Json,
            _ => LogFormat::Pretty,
        })
    }
}
