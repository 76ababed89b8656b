use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use chrono::Datelike;

use crate::listings::valuation::{ValuationConfig, ValuationEngine, DEFAULT_AREA_AVG_PRICE_PER_SQFT};

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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub valuation: ValuationSettings,
    pub saved_listings_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let area_avg_price_per_sqft = match env::var("MARKET_AVG_PRICE_PER_SQFT") {
            Ok(raw) => parse_market_rate(&raw)?,
            Err(_) => DEFAULT_AREA_AVG_PRICE_PER_SQFT,
        };
        let as_of_year = match env::var("VALUATION_AS_OF_YEAR") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ConfigError::InvalidAsOfYear(raw.clone()))?,
            ),
            Err(_) => None,
        };

        let saved_listings_path = env::var("SAVED_LISTINGS_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            valuation: ValuationSettings {
                area_avg_price_per_sqft,
                as_of_year,
            },
            saved_listings_path,
        })
    }
}

/// Validate a market price-per-square-foot override.
pub fn parse_market_rate(raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or_else(|| ConfigError::InvalidMarketRate(raw.to_string()))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Market inputs for the valuation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationSettings {
    pub area_avg_price_per_sqft: f64,
    /// Pinned reference year; the local calendar year when unset.
    pub as_of_year: Option<i32>,
}

impl ValuationSettings {
    pub fn resolved_as_of_year(&self) -> i32 {
        self.as_of_year.unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn engine(&self) -> ValuationEngine {
        let config = ValuationConfig {
            area_avg_price_per_sqft: self.area_avg_price_per_sqft,
        };
        ValuationEngine::new(config, self.resolved_as_of_year())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMarketRate(String),
    InvalidAsOfYear(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMarketRate(raw) => write!(
                f,
                "MARKET_AVG_PRICE_PER_SQFT must be a positive number (got '{raw}')"
            ),
            ConfigError::InvalidAsOfYear(raw) => {
                write!(f, "VALUATION_AS_OF_YEAR must be a year (got '{raw}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMarketRate(_)
            | ConfigError::InvalidAsOfYear(_) => None,
        }
    }
}
