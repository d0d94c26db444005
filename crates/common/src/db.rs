//! Read-only access to the application's payment tables, plus cleanup
//!
//! The application under test owns the schema. This module only reads the
//! newest row of each table and empties the tables between scenarios.

use serde::{Deserialize, Serialize};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::Result;

/// Tables written by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Payment,
    CreditRequest,
    Order,
}

impl Table {
    /// Deletion order: orders reference payments and credit requests
    pub const CLEANUP_ORDER: [Table; 3] = [Table::Order, Table::Payment, Table::CreditRequest];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Payment => "payment_entity",
            Table::CreditRequest => "credit_request_entity",
            Table::Order => "order_entity",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Debit payment outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntity {
    pub id: String,
    pub status: String,
    /// Amount in kopecks
    pub amount: i64,
    pub transaction_id: Option<String>,
}

/// Credit request outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRequestEntity {
    pub id: String,
    pub status: String,
    pub bank_id: Option<String>,
}

/// Link between a purchase attempt and its payment or credit request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntity {
    pub id: String,
    pub payment_id: Option<String>,
    pub credit_id: Option<String>,
}

const PAYMENT_QUERY: &str =
    "SELECT id, status, amount, transaction_id FROM payment_entity ORDER BY created DESC LIMIT 1";
const CREDIT_REQUEST_QUERY: &str =
    "SELECT id, status, bank_id FROM credit_request_entity ORDER BY created DESC LIMIT 1";
const ORDER_QUERY: &str =
    "SELECT id, payment_id, credit_id FROM order_entity ORDER BY created DESC LIMIT 1";

/// SQL helper bound to the application's database
#[derive(Clone)]
pub struct SqlHelper {
    pool: AnyPool,
}

impl SqlHelper {
    /// Connect using the suite's database settings
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.connection_url();
        Self::connect_url(&url, config.max_connections).await
    }

    /// Connect to an explicit URL (`mysql://`, `postgres://` or `sqlite:`)
    pub async fn connect_url(url: &str, max_connections: u32) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await?;

        info!("Connected to database ({})", scheme(url));
        Ok(Self { pool })
    }

    /// Expose the pool for fixtures that need to run their own statements
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Newest debit payment, if any
    pub async fn payment_entity(&self) -> Result<Option<PaymentEntity>> {
        let row = sqlx::query(PAYMENT_QUERY).fetch_optional(&self.pool).await?;
        row.map(|row| payment_from_row(&row)).transpose()
    }

    /// Newest credit request, if any
    pub async fn credit_request_entity(&self) -> Result<Option<CreditRequestEntity>> {
        let row = sqlx::query(CREDIT_REQUEST_QUERY).fetch_optional(&self.pool).await?;
        row.map(|row| credit_request_from_row(&row)).transpose()
    }

    /// Newest order, if any
    pub async fn order_entity(&self) -> Result<Option<OrderEntity>> {
        let row = sqlx::query(ORDER_QUERY).fetch_optional(&self.pool).await?;
        row.map(|row| order_from_row(&row)).transpose()
    }

    /// Number of rows currently in `table`
    pub async fn count(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) AS total FROM {}", table.name());
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>("total")?)
    }

    /// Delete every row written by the application
    pub async fn clean_database(&self) -> Result<()> {
        for table in Table::CLEANUP_ORDER {
            let sql = format!("DELETE FROM {}", table.name());
            let result = sqlx::query(&sql).execute(&self.pool).await?;
            debug!("Deleted {} row(s) from {}", result.rows_affected(), table);
        }
        Ok(())
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn payment_from_row(row: &AnyRow) -> Result<PaymentEntity> {
    Ok(PaymentEntity {
        id: row.try_get("id")?,
        status: row.try_get("status")?,
        amount: row.try_get("amount")?,
        transaction_id: row.try_get("transaction_id")?,
    })
}

fn credit_request_from_row(row: &AnyRow) -> Result<CreditRequestEntity> {
    Ok(CreditRequestEntity {
        id: row.try_get("id")?,
        status: row.try_get("status")?,
        bank_id: row.try_get("bank_id")?,
    })
}

fn order_from_row(row: &AnyRow) -> Result<OrderEntity> {
    Ok(OrderEntity {
        id: row.try_get("id")?,
        payment_id: row.try_get("payment_id")?,
        credit_id: row.try_get("credit_id")?,
    })
}

/// URL scheme only, so credentials never reach the logs
fn scheme(url: &str) -> &str {
    url.split(':').next().unwrap_or("unknown")
}
