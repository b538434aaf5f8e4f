//! Inventory item domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use sunstock_core::ItemId;

/// A stocked piece of equipment.
///
/// `current_stock` is assumed non-negative (output transactions floor at
/// zero); `min_stock <= max_stock` is not enforced anywhere.
#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    /// Optional project tag the item is earmarked for.
    pub project: Option<String>,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    /// Unit price in RSD.
    pub unit_price: Decimal,
    pub supplier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Whether current stock has fallen to or below the configured minimum.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    /// Value of the stock on hand.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.current_stock) * self.unit_price
    }
}

/// Create/update payload for an inventory item.
#[derive(Debug, Clone)]
pub struct ItemInput {
    pub name: String,
    pub category: String,
    pub project: Option<String>,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit_price: Decimal,
    pub supplier: String,
}
