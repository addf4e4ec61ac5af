//! Application configuration loaded from the environment (and `.env`).

use std::env;
use std::str::FromStr;

/// All runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub payment: PaymentConfig,
    pub email: EmailConfig,
    pub camp: CampConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Without a URL bookings are kept in memory
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub pool_size: u32,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub gateway_url: String,
    pub secret_key: Option<String>,
    pub currency: String,
    pub timeout_secs: u64,
}

/// Without a relay URL confirmation emails are only logged
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub relay_url: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct CampConfig {
    /// Season being sold; defaults to the current calendar year
    pub season_year: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                host: or("HOST", "0.0.0.0"),
                port: parse(&var, "PORT", "port number", 8000)?,
                rust_log: or("RUST_LOG", "summercamp_web=debug,tower_http=info"),
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL"),
                pool_size: parse(&var, "DB_POOL_SIZE", "number", 10)?,
            },
            payment: PaymentConfig {
                gateway_url: or("PAYMENT_GATEWAY_URL", "https://api.stripe.com")
                    .trim_end_matches('/')
                    .to_string(),
                secret_key: var("PAYMENT_SECRET_KEY"),
                currency: or("PAYMENT_CURRENCY", "aed").to_lowercase(),
                timeout_secs: parse(&var, "PAYMENT_TIMEOUT_SECS", "number of seconds", 30)?,
            },
            email: EmailConfig {
                relay_url: var("EMAIL_RELAY_URL"),
                from: or("EMAIL_FROM", "bookings@summercamp.ae"),
            },
            camp: CampConfig {
                season_year: var("CAMP_SEASON_YEAR")
                    .map(|value| {
                        value.parse().map_err(|_| ConfigError::Invalid {
                            name: "CAMP_SEASON_YEAR",
                            expected: "year",
                            value,
                        })
                    })
                    .transpose()?,
            },
        })
    }
}

fn parse<T, F>(var: &F, name: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
