use serde::{Deserialize, Serialize};

use crate::error::VotingError;
use crate::models::Address;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub contract_address: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub mount_element_id: String,
    pub refresh_config: RefreshConfig,
    pub receipt_config: ReceiptConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract_address: ZERO_ADDRESS.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            mount_element_id: "app".to_string(),
            refresh_config: RefreshConfig::default(),
            receipt_config: ReceiptConfig::default(),
        }
    }
}

/// Refresco periódico de estado, tiempo restante y recuento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval_ms: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_ms: 15_000 }
    }
}

/// Espera de confirmación de la transacción de voto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    pub poll_interval_ms: u32,
    pub poll_attempts: u32,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_500,
            poll_attempts: 400,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            contract_address: option_env!("CONTRACT_ADDRESS")
                .unwrap_or(ZERO_ADDRESS)
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            log_level: option_env!("LOG_LEVEL").unwrap_or("info").to_string(),
            mount_element_id: option_env!("MOUNT_ELEMENT_ID")
                .unwrap_or("app")
                .to_string(),
            refresh_config: RefreshConfig {
                interval_ms: option_env!("REFRESH_INTERVAL_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.refresh_config.interval_ms),
            },
            receipt_config: ReceiptConfig {
                poll_interval_ms: option_env!("RECEIPT_POLL_INTERVAL_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.receipt_config.poll_interval_ms),
                poll_attempts: option_env!("RECEIPT_POLL_ATTEMPTS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.receipt_config.poll_attempts),
            },
        }
    }

    /// Dirección del contrato ya validada
    pub fn contract_address(&self) -> Result<Address, VotingError> {
        Address::parse(&self.contract_address)
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm-logger; sin logging solo pasan los errores
    pub fn log_level(&self) -> log::Level {
        if !self.is_logging_enabled() {
            return log::Level::Error;
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
