//! Database operations for the admin panel.
//!
//! # Tables (schema `admin`)
//!
//! - `admin_user` - Panel logins (email + argon2 password hash + role)
//! - `inventory_item` - Stocked equipment
//! - `staff_member` - Staff records referenced by transactions
//! - `stock_transaction` - Immutable stock movement log
//! - `session` - tower-sessions store
//!
//! # Migrations
//!
//! Migrations live in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p sunstock-cli -- migrate
//! ```
//!
//! Queries use sqlx's runtime API with `FromRow` row types mapped into the
//! domain models, so the workspace builds without a live database.

pub mod admin_users;
pub mod inventory;
pub mod staff;
pub mod transactions;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use inventory::ItemRepository;
pub use staff::StaffRepository;
pub use transactions::TransactionRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
