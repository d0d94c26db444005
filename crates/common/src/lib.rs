//! TravelPay Common Library
//!
//! Shared pieces of the TravelPay end-to-end suite: card catalog, test data
//! generators, database records and cleanup, and suite configuration.

pub mod card;
pub mod config;
pub mod data;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use card::{CardStatus, PurchaseKind};
pub use config::SuiteConfig;
pub use data::DataHelper;
pub use db::{CreditRequestEntity, OrderEntity, PaymentEntity, SqlHelper, Table};
pub use error::{Error, Result};

/// TravelPay suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file looked up in the working directory
pub fn default_config_path() -> std::path::PathBuf {
    std::path::PathBuf::from("travelpay.toml")
}
