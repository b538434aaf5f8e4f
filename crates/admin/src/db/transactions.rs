//! Database operations for the stock transaction log.
//!
//! Recording a transaction also mutates the referenced item's stock level:
//! input adds the quantity, output subtracts it floored at zero. Both
//! statements run in one database transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use sunstock_core::{ItemId, StaffId, StockDirection, TransactionId};

use super::RepositoryError;
use crate::models::{NewTransaction, StockTransaction};

/// Internal row type for transaction queries.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i32,
    item_id: Option<i32>,
    item_name: String,
    direction: String,
    quantity: i32,
    unit_price: Decimal,
    total_value: Decimal,
    project: String,
    staff_id: Option<i32>,
    staff_name: String,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for StockTransaction {
    type Error = RepositoryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let direction: StockDirection = row.direction.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid direction in database: {e}"))
        })?;

        Ok(Self {
            id: TransactionId::new(row.id),
            item_id: row.item_id.map(ItemId::new),
            item_name: row.item_name,
            direction,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_value: row.total_value,
            project: row.project,
            staff_id: row.staff_id.map(StaffId::new),
            staff_name: row.staff_name,
            comment: row.comment,
            created_at: row.created_at,
        })
    }
}

/// Item fields needed when recording a transaction.
#[derive(Debug, sqlx::FromRow)]
struct ItemStockRow {
    name: String,
    current_stock: i32,
    unit_price: Decimal,
}

const TRANSACTION_COLUMNS: &str = "id, item_id, item_name, direction, quantity, unit_price, \
                                   total_value, project, staff_id, staff_name, comment, created_at";

/// Repository for stock transaction database operations.
pub struct TransactionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TransactionRepository<'a> {
    /// Create a new transaction repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<StockTransaction>, RepositoryError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM admin.stock_transaction
             ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Record a stock transaction and apply it to the item's stock level.
    ///
    /// A missing or zero unit price falls back to the item's configured
    /// price. The stock update clamps output withdrawals at zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item or staff member does
    /// not exist, `RepositoryError::Database` for query failures.
    pub async fn create(
        &self,
        input: &NewTransaction,
    ) -> Result<StockTransaction, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, ItemStockRow>(
            "SELECT name, current_stock, unit_price FROM admin.inventory_item WHERE id = $1",
        )
        .bind(input.item_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let staff_name: String =
            sqlx::query_scalar("SELECT name FROM admin.staff_member WHERE id = $1")
                .bind(input.staff_id.as_i32())
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepositoryError::NotFound)?;

        // Zero counts as "not provided" - the form's price field defaults to 0.
        let unit_price = input
            .unit_price
            .filter(|p| !p.is_zero())
            .unwrap_or(item.unit_price);
        let total_value = Decimal::from(input.quantity) * unit_price;

        let sql = format!(
            "INSERT INTO admin.stock_transaction
                 (item_id, item_name, direction, quantity, unit_price, total_value,
                  project, staff_id, staff_name, comment)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {TRANSACTION_COLUMNS}"
        );

        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(input.item_id.as_i32())
            .bind(&item.name)
            .bind(input.direction.as_str())
            .bind(input.quantity)
            .bind(unit_price)
            .bind(total_value)
            .bind(&input.project)
            .bind(input.staff_id.as_i32())
            .bind(&staff_name)
            .bind(input.comment.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        let new_stock = input.direction.apply(item.current_stock, input.quantity);

        sqlx::query(
            "UPDATE admin.inventory_item SET current_stock = $2, updated_at = now() WHERE id = $1",
        )
        .bind(input.item_id.as_i32())
        .bind(new_stock)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }
}
