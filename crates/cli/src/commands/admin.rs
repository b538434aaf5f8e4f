//! Panel login management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new login; a random password is generated and printed
//! sunstock-cli admin create -e admin@example.com -n "Admin Name" -r admin
//!
//! # Or set the initial password explicitly
//! sunstock-cli admin create -e admin@example.com -n "Admin Name" --password "..."
//! ```
//!
//! # Environment Variables
//!
//! - `SUNSTOCK_DATABASE_URL` - `PostgreSQL` connection string

use rand::distr::{Alphanumeric, SampleString};
use sqlx::PgPool;
use thiserror::Error;

use sunstock_admin::services::auth::{AuthError, AuthService};
use sunstock_core::StaffRole;

/// Length of generated initial passwords.
const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Errors that can occur during login management.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, manager, staff")]
    InvalidRole(String),

    /// Account creation failed.
    #[error("Account creation failed: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new panel login.
///
/// When `password` is omitted a random one is generated and printed once.
///
/// # Errors
///
/// Returns `AdminCommandError` if the role is invalid, the database is
/// unreachable, or the email is already taken.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: Option<&str>,
) -> Result<(), AdminCommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SUNSTOCK_DATABASE_URL")
        .map_err(|_| AdminCommandError::MissingEnvVar("SUNSTOCK_DATABASE_URL"))?;

    let role: StaffRole = role
        .parse()
        .map_err(|_| AdminCommandError::InvalidRole(role.to_owned()))?;

    let pool = PgPool::connect(&database_url).await?;
    let auth = AuthService::new(&pool);

    let generated = password.is_none();
    let password = match password {
        Some(p) => p.to_owned(),
        None => Alphanumeric.sample_string(&mut rand::rng(), GENERATED_PASSWORD_LENGTH),
    };

    let user = auth.create_account(email, name, role, &password).await?;

    tracing::info!(id = %user.id, email = %user.email, role = %user.role, "Login created");
    #[allow(clippy::print_stdout)]
    {
        println!("Created login {} ({})", user.email, user.role);
        if generated {
            println!("Initial password: {password}");
        }
    }

    Ok(())
}
