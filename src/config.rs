//! Configuration module
//!
//! Reads TOML configuration from `~/.config/revamp-booking/config.toml`
//! (override with `BOOKING_CONFIG`). Every section has safe defaults so the
//! service starts without a config file.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::shared::errors::InfraError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub shop: ShopConfig,
    pub payment: PaymentConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HMAC secret shared with the identity provider
    pub jwt_secret: String,
    pub jwt_issuer: String,
}

/// Working hours; modification appointments default to this full window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub secret_key: String,
    /// ISO 4217 lower-case code sent to the gateway
    pub currency: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CalendarConfig {
    /// Holiday/maintenance dates seeded into the blackout set at startup
    pub blackout_dates: Vec<NaiveDate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8084,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            jwt_issuer: "revamp-auth".to_string(),
        }
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            opening_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            currency: "lkr".to_string(),
            api_base: "https://api.stripe.com".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            security: SecurityConfig::default(),
            shop: ShopConfig::default(),
            payment: PaymentConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("read {}: {}", path.display(), e)))?;
        toml::from_str(&raw).map_err(|e| InfraError::Config(format!("parse {}: {}", path.display(), e)))
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revamp-booking")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8084);
        assert_eq!(cfg.shop.opening_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(cfg.shop.closing_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(cfg.payment.currency, "lkr");
        assert!(cfg.calendar.blackout_dates.is_empty());
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [calendar]
            blackout_dates = ["2024-04-13", "2024-04-14"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        // Unspecified sections fall back to defaults
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.calendar.blackout_dates.len(), 2);
        assert_eq!(
            cfg.calendar.blackout_dates[0],
            NaiveDate::from_ymd_opt(2024, 4, 13).unwrap()
        );
    }

    #[test]
    fn address_joins_host_and_port() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.address(), "0.0.0.0:8084");
    }
}
