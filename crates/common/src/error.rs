//! Error types for TravelPay

use thiserror::Error;

/// Result type alias using TravelPay Error
pub type Result<T> = std::result::Result<T, Error>;

/// TravelPay error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown card status: {0}")]
    UnknownCardStatus(String),

    #[error("Unknown purchase kind: {0}")]
    UnknownPurchaseKind(String),
}
