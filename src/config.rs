/*
 * Responsibility
 * - Read environment variables (PORT, APP_ENV, UPSTREAM_*)
 * - Validate values (startup fails on anything present but unparsable)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.receitaws.com.br";
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Base of the registry API; `/v1/cnpj/{cnpj}` is appended per request.
    pub upstream_base_url: Url,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match var("PORT") {
            Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        let upstream_base_url = var("UPSTREAM_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());
        let upstream_base_url = Url::parse(&upstream_base_url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https") && !u.cannot_be_a_base())
            .ok_or(ConfigError::Invalid("UPSTREAM_BASE_URL"))?;

        let timeout_seconds = match var("UPSTREAM_TIMEOUT_SECONDS") {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|v| (1..=60).contains(v))
                .ok_or(ConfigError::Invalid("UPSTREAM_TIMEOUT_SECONDS"))?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        };

        Ok(Self {
            addr,
            app_env,
            upstream_base_url,
            upstream_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}
