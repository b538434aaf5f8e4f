//! Request-for-quote draft builder.
//!
//! An [`RfqDraft`] is an ephemeral, session-local collection of line items
//! used to assemble an outbound request for quote. It is never persisted;
//! the admin panel stores it in the user's session and it resets when the
//! session ends.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ItemId;

/// Default unit label for line items.
pub const DEFAULT_UNIT: &str = "kom";

/// A single line in an RFQ draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqLine {
    /// Line identity (distinct from the inventory item identity).
    pub id: Uuid,
    /// The inventory item this line refers to.
    pub item_id: ItemId,
    /// Display name, copied from the item at add time.
    pub name: String,
    /// Unit label (e.g. "kom").
    pub unit: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl RfqLine {
    /// Line total: quantity x unit price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// An in-memory RFQ draft.
///
/// Lines merge by item identity on add; removal and quantity updates are
/// keyed by line identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RfqDraft {
    lines: Vec<RfqLine>,
}

impl RfqDraft {
    /// Create an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The draft's lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[RfqLine] {
        &self.lines
    }

    /// Number of lines in the draft.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the draft has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of an item to the draft.
    ///
    /// If a line for the same item already exists its quantity is increased;
    /// otherwise a new line with a fresh line id is appended.
    pub fn add(&mut self, item_id: ItemId, name: &str, unit_price: Decimal, quantity: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += quantity;
            return;
        }

        self.lines.push(RfqLine {
            id: Uuid::new_v4(),
            item_id,
            name: name.to_owned(),
            unit: DEFAULT_UNIT.to_owned(),
            quantity,
            unit_price,
        });
    }

    /// Remove a line by line identity. Unknown ids are ignored.
    pub fn remove(&mut self, line_id: Uuid) {
        self.lines.retain(|l| l.id != line_id);
    }

    /// Set a line's quantity, clamped to a minimum of 1.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, line_id: Uuid, quantity: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total value of the draft: sum over lines of quantity x unit price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(RfqLine::total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "String inverter 10kW", dec("180000"), 2);

        assert_eq!(draft.len(), 1);
        let line = &draft.lines()[0];
        assert_eq!(line.item_id, ItemId::new(1));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit, DEFAULT_UNIT);
    }

    #[test]
    fn test_add_same_item_merges_quantities() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Junction box IP67", dec("2500"), 3);
        draft.add(ItemId::new(1), "Junction box IP67", dec("2500"), 4);

        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].quantity, 7);
    }

    #[test]
    fn test_add_different_items_keeps_separate_lines() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "DC kabl 4mm2", dec("120"), 100);
        draft.add(ItemId::new(2), "DC prekidac 32A", dec("8500"), 5);

        assert_eq!(draft.len(), 2);
    }

    #[test]
    fn test_remove_by_line_id() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Panel 450W", dec("35000"), 10);
        draft.add(ItemId::new(2), "Inverter", dec("180000"), 1);

        let line_id = draft.lines()[0].id;
        draft.remove(line_id);

        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].item_id, ItemId::new(2));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Panel 450W", dec("35000"), 10);
        draft.remove(Uuid::new_v4());
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Panel 450W", dec("35000"), 10);
        let line_id = draft.lines()[0].id;

        draft.set_quantity(line_id, 0);
        assert_eq!(draft.lines()[0].quantity, 1);

        draft.set_quantity(line_id, -5);
        assert_eq!(draft.lines()[0].quantity, 1);

        draft.set_quantity(line_id, 25);
        assert_eq!(draft.lines()[0].quantity, 25);
    }

    #[test]
    fn test_total_sums_line_totals() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Panel 450W", dec("35000"), 2);
        draft.add(ItemId::new(2), "DC kabl 4mm2", dec("120.50"), 10);

        // 2 * 35000 + 10 * 120.50
        assert_eq!(draft.total(), dec("71205.00"));
    }

    #[test]
    fn test_clear_empties_draft() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Panel 450W", dec("35000"), 2);
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.total(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(3), "Aluminijumska sina", dec("1200"), 40);

        let json = serde_json::to_string(&draft).unwrap();
        let back: RfqDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.lines()[0].quantity, 40);
        assert_eq!(back.total(), draft.total());
    }
}
