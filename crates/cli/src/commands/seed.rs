//! Seed the database with demo data from a YAML file.
//!
//! The file carries inventory items and staff members; see
//! `crates/cli/seeds/demo.yaml` for the expected shape.
//!
//! # Usage
//!
//! ```bash
//! sunstock-cli seed -f crates/cli/seeds/demo.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `SUNSTOCK_DATABASE_URL` - `PostgreSQL` connection string

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use sunstock_admin::db::{ItemRepository, StaffRepository};
use sunstock_admin::models::{ItemInput, StaffInput};
use sunstock_core::{Email, StaffRole};

/// A seed file: inventory items plus staff members.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub items: Vec<SeedItem>,
    #[serde(default)]
    pub staff: Vec<SeedStaff>,
}

/// One inventory item in the seed file.
#[derive(Debug, Deserialize)]
pub struct SeedItem {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub project: Option<String>,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit_price: Decimal,
    pub supplier: String,
}

/// One staff member in the seed file.
#[derive(Debug, Deserialize)]
pub struct SeedStaff {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

/// Load the YAML file and insert its rows.
///
/// # Errors
///
/// Returns an error if the environment is incomplete, the file cannot be
/// read or parsed, or an insert fails.
pub async fn run(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("SUNSTOCK_DATABASE_URL").map_err(|_| "SUNSTOCK_DATABASE_URL not set")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed data from file");

    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(
        items = seed.items.len(),
        staff = seed.staff.len(),
        "Parsed seed file"
    );

    let pool = PgPool::connect(&database_url).await?;

    let items = ItemRepository::new(&pool);
    for entry in &seed.items {
        let input = ItemInput {
            name: entry.name.clone(),
            category: entry.category.clone(),
            project: entry.project.clone(),
            current_stock: entry.current_stock,
            min_stock: entry.min_stock,
            max_stock: entry.max_stock,
            unit_price: entry.unit_price,
            supplier: entry.supplier.clone(),
        };
        let item = items.create(&input).await?;
        info!(id = %item.id, name = %item.name, "Seeded item");
    }

    let staff = StaffRepository::new(&pool);
    for entry in &seed.staff {
        let role: StaffRole = entry
            .role
            .parse()
            .map_err(|_| format!("invalid role in seed file: {}", entry.role))?;
        let email = Email::parse(&entry.email)
            .map_err(|e| format!("invalid email in seed file: {e}"))?;

        let input = StaffInput {
            name: entry.name.clone(),
            email,
            role,
            department: entry.department.clone(),
        };
        let member = staff.create(&input).await?;
        info!(id = %member.id, name = %member.name, "Seeded staff member");
    }

    info!("Seeding complete");
    Ok(())
}
