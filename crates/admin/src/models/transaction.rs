//! Stock transaction domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use sunstock_core::{ItemId, StaffId, StockDirection, TransactionId};

/// An immutable stock movement record.
///
/// Item and staff names are denormalized at creation time so the log stays
/// readable after the referenced rows are deleted (the foreign keys go NULL).
#[derive(Debug, Clone)]
pub struct StockTransaction {
    pub id: TransactionId,
    pub item_id: Option<ItemId>,
    pub item_name: String,
    pub direction: StockDirection,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// quantity x unit price, computed at creation.
    pub total_value: Decimal,
    /// Free-text project/client name.
    pub project: String,
    pub staff_id: Option<StaffId>,
    pub staff_name: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a new stock transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub item_id: ItemId,
    pub direction: StockDirection,
    pub quantity: i32,
    /// Unit price override. `None` or zero falls back to the item's price.
    pub unit_price: Option<Decimal>,
    pub project: String,
    pub staff_id: StaffId,
    pub comment: Option<String>,
}
