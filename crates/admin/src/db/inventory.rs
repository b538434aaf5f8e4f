//! Database operations for inventory items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use sunstock_core::ItemId;

use super::RepositoryError;
use crate::models::{InventoryItem, ItemInput};

/// Internal row type for inventory item queries.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i32,
    name: String,
    category: String,
    project: Option<String>,
    current_stock: i32,
    min_stock: i32,
    max_stock: i32,
    unit_price: Decimal,
    supplier: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId::new(row.id),
            name: row.name,
            category: row.category,
            project: row.project,
            current_stock: row.current_stock,
            min_stock: row.min_stock,
            max_stock: row.max_stock,
            unit_price: row.unit_price,
            supplier: row.supplier,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ITEM_COLUMNS: &str = "id, name, category, project, current_stock, min_stock, max_stock, \
                            unit_price, supplier, created_at, updated_at";

/// Repository for inventory item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List items, newest first, optionally filtered by a case-insensitive
    /// substring match over name, category and supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<InventoryItem>, RepositoryError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS}
             FROM admin.inventory_item
             WHERE ($1::text IS NULL
                    OR name ILIKE '%' || $1 || '%'
                    OR category ILIKE '%' || $1 || '%'
                    OR supplier ILIKE '%' || $1 || '%')
             ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(search)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, RepositoryError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM admin.inventory_item WHERE id = $1");

        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &ItemInput) -> Result<InventoryItem, RepositoryError> {
        let sql = format!(
            "INSERT INTO admin.inventory_item
                 (name, category, project, current_stock, min_stock, max_stock,
                  unit_price, supplier)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ITEM_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.project.as_deref())
            .bind(input.current_stock)
            .bind(input.min_stock)
            .bind(input.max_stock)
            .bind(input.unit_price)
            .bind(&input.supplier)
            .fetch_one(self.pool)
            .await?;

        Ok(row.into())
    }

    /// Update an existing item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has the given ID.
    pub async fn update(
        &self,
        id: ItemId,
        input: &ItemInput,
    ) -> Result<InventoryItem, RepositoryError> {
        let sql = format!(
            "UPDATE admin.inventory_item
             SET name = $2, category = $3, project = $4, current_stock = $5,
                 min_stock = $6, max_stock = $7, unit_price = $8, supplier = $9,
                 updated_at = now()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id.as_i32())
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.project.as_deref())
            .bind(input.current_stock)
            .bind(input.min_stock)
            .bind(input.max_stock)
            .bind(input.unit_price)
            .bind(&input.supplier)
            .fetch_optional(self.pool)
            .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete an item. Transactions referencing it keep the denormalized
    /// name; their foreign key goes NULL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has the given ID.
    pub async fn delete(&self, id: ItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin.inventory_item WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
