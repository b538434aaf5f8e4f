//! Read-model aggregation over item and transaction lists.
//!
//! The panel recomputes every derived number from the full lists on each
//! request: single-pass filters, group-bys and reduce-sums over small
//! arrays. Nothing here touches the database.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use sunstock_core::StockDirection;

use crate::models::{InventoryItem, StockTransaction};

/// How many recent transactions the dashboard shows.
const RECENT_LIMIT: usize = 5;

/// Dashboard aggregates, optionally scoped to one project.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// Number of items in scope.
    pub total_items: usize,
    /// Sum over items of current stock x unit price.
    pub total_value: Decimal,
    /// Items at or below their minimum stock.
    pub low_stock: Vec<InventoryItem>,
    /// Most recent transactions in scope, newest first.
    pub recent: Vec<StockTransaction>,
}

/// Per-project consumption rollup (output transactions only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRollup {
    pub project: String,
    pub total_value: Decimal,
    pub total_quantity: i64,
    pub distinct_items: usize,
    pub transaction_count: usize,
}

/// Transaction-history counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    pub total: usize,
    pub inputs: usize,
    pub outputs: usize,
    pub total_value: Decimal,
}

/// Distinct non-empty project names seen in the transaction log, sorted.
#[must_use]
pub fn distinct_projects(transactions: &[StockTransaction]) -> Vec<String> {
    let mut projects: Vec<String> = transactions
        .iter()
        .map(|t| t.project.as_str())
        .filter(|p| !p.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    projects.sort();
    projects
}

/// Distinct suppliers derived from the inventory, sorted.
#[must_use]
pub fn suppliers(items: &[InventoryItem]) -> Vec<String> {
    let mut suppliers: Vec<String> = items
        .iter()
        .map(|i| i.supplier.as_str())
        .filter(|s| !s.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    suppliers.sort();
    suppliers
}

/// Compute the dashboard aggregates.
///
/// With a project selected, items are scoped by their project tag and
/// transactions by their project field. `transactions` is expected newest
/// first (repository order).
#[must_use]
pub fn dashboard_summary(
    items: &[InventoryItem],
    transactions: &[StockTransaction],
    project: Option<&str>,
) -> DashboardSummary {
    let in_scope = |item_project: Option<&str>| match project {
        Some(p) => item_project == Some(p),
        None => true,
    };

    let scoped_items: Vec<&InventoryItem> = items
        .iter()
        .filter(|i| in_scope(i.project.as_deref()))
        .collect();

    let total_value = scoped_items.iter().map(|i| i.stock_value()).sum();
    let low_stock = scoped_items
        .iter()
        .filter(|i| i.is_low_stock())
        .map(|i| (*i).clone())
        .collect();

    let recent = transactions
        .iter()
        .filter(|t| project.is_none_or(|p| t.project == p))
        .take(RECENT_LIMIT)
        .cloned()
        .collect();

    DashboardSummary {
        total_items: scoped_items.len(),
        total_value,
        low_stock,
        recent,
    }
}

/// Filter transactions by free-text search, direction and project.
///
/// The search term matches case-insensitively against item name, staff name
/// and project. Input order (newest first) is preserved.
#[must_use]
pub fn filter_transactions<'a>(
    transactions: &'a [StockTransaction],
    search: Option<&str>,
    direction: Option<StockDirection>,
    project: Option<&str>,
) -> Vec<&'a StockTransaction> {
    let needle = search.map(str::to_lowercase);

    transactions
        .iter()
        .filter(|t| direction.is_none_or(|d| t.direction == d))
        .filter(|t| project.is_none_or(|p| t.project == p))
        .filter(|t| {
            needle.as_deref().is_none_or(|q| {
                t.item_name.to_lowercase().contains(q)
                    || t.staff_name.to_lowercase().contains(q)
                    || t.project.to_lowercase().contains(q)
            })
        })
        .collect()
}

/// Summarize a filtered transaction list for the history screen.
#[must_use]
pub fn history_summary(transactions: &[&StockTransaction]) -> HistorySummary {
    let inputs = transactions
        .iter()
        .filter(|t| t.direction == StockDirection::Input)
        .count();

    HistorySummary {
        total: transactions.len(),
        inputs,
        outputs: transactions.len() - inputs,
        total_value: transactions.iter().map(|t| t.total_value).sum(),
    }
}

/// Per-project rollups over output transactions, ranked by total value
/// descending. Transactions without a project are excluded.
#[must_use]
pub fn project_rollups(transactions: &[StockTransaction]) -> Vec<ProjectRollup> {
    let mut groups: BTreeMap<&str, Vec<&StockTransaction>> = BTreeMap::new();
    for t in transactions {
        if t.direction == StockDirection::Output && !t.project.is_empty() {
            groups.entry(t.project.as_str()).or_default().push(t);
        }
    }

    let mut rollups: Vec<ProjectRollup> = groups
        .into_iter()
        .map(|(project, group)| rollup_for(project, &group))
        .collect();
    rollups.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    rollups
}

/// Aggregate totals for a set of output transactions (the "all projects"
/// summary strip).
#[must_use]
pub fn consumption_totals(transactions: &[&StockTransaction]) -> ProjectRollup {
    rollup_for("", transactions)
}

fn rollup_for(project: &str, group: &[&StockTransaction]) -> ProjectRollup {
    let distinct: HashSet<&str> = group.iter().map(|t| t.item_name.as_str()).collect();

    ProjectRollup {
        project: project.to_owned(),
        total_value: group.iter().map(|t| t.total_value).sum(),
        total_quantity: group.iter().map(|t| i64::from(t.quantity)).sum(),
        distinct_items: distinct.len(),
        transaction_count: group.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use sunstock_core::{ItemId, StaffId, TransactionId};

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(id: i32, project: Option<&str>, current: i32, min: i32, price: &str) -> InventoryItem {
        InventoryItem {
            id: ItemId::new(id),
            name: format!("Artikal {id}"),
            category: "Solarni paneli".to_owned(),
            project: project.map(str::to_owned),
            current_stock: current,
            min_stock: min,
            max_stock: 500,
            unit_price: dec(price),
            supplier: "Solar Tech Solutions".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tx(
        id: i32,
        item_name: &str,
        direction: StockDirection,
        quantity: i32,
        total: &str,
        project: &str,
    ) -> StockTransaction {
        StockTransaction {
            id: TransactionId::new(id),
            item_id: Some(ItemId::new(1)),
            item_name: item_name.to_owned(),
            direction,
            quantity,
            unit_price: dec("100"),
            total_value: dec(total),
            project: project.to_owned(),
            staff_id: Some(StaffId::new(1)),
            staff_name: "Marko Petrovic".to_owned(),
            comment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_boundary_is_inclusive() {
        let items = vec![
            item(1, None, 10, 10, "100"), // at minimum -> low
            item(2, None, 11, 10, "100"), // above minimum -> fine
            item(3, None, 0, 5, "100"),   // below minimum -> low
        ];

        let summary = dashboard_summary(&items, &[], None);
        let low: Vec<i32> = summary.low_stock.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(low, vec![1, 3]);
    }

    #[test]
    fn test_dashboard_project_filter_scopes_items_and_transactions() {
        let items = vec![
            item(1, Some("Solarna elektrana Novi Sad"), 2, 5, "1000"),
            item(2, Some("Solarna elektrana Beograd"), 1, 5, "500"),
            item(3, None, 0, 1, "100"),
        ];
        let transactions = vec![
            tx(1, "Inverter", StockDirection::Output, 1, "1000", "Solarna elektrana Novi Sad"),
            tx(2, "Kabl", StockDirection::Input, 5, "500", "Solarna elektrana Beograd"),
        ];

        let summary =
            dashboard_summary(&items, &transactions, Some("Solarna elektrana Novi Sad"));
        assert_eq!(summary.total_items, 1);
        assert_eq!(summary.total_value, dec("2000"));
        assert_eq!(summary.low_stock.len(), 1);
        assert_eq!(summary.recent.len(), 1);
        assert_eq!(summary.recent[0].item_name, "Inverter");
    }

    #[test]
    fn test_dashboard_total_value_sums_stock_times_price() {
        let items = vec![item(1, None, 3, 0, "120.50"), item(2, None, 2, 0, "1000")];
        let summary = dashboard_summary(&items, &[], None);
        assert_eq!(summary.total_value, dec("2361.50"));
    }

    #[test]
    fn test_recent_takes_at_most_five() {
        let transactions: Vec<StockTransaction> = (0..8)
            .map(|i| tx(i, "Panel", StockDirection::Input, 1, "100", "P"))
            .collect();
        let summary = dashboard_summary(&[], &transactions, None);
        assert_eq!(summary.recent.len(), 5);
        // Repository order (newest first) is preserved
        assert_eq!(summary.recent[0].id.as_i32(), 0);
    }

    #[test]
    fn test_filter_transactions_search_is_case_insensitive() {
        let transactions = vec![
            tx(1, "String inverter 10kW", StockDirection::Output, 1, "100", "Projekat A"),
            tx(2, "DC kabl", StockDirection::Output, 1, "100", "Projekat B"),
        ];

        let hits = filter_transactions(&transactions, Some("INVERTER"), None, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_i32(), 1);

        // Search also matches project and staff name
        let hits = filter_transactions(&transactions, Some("projekat b"), None, None);
        assert_eq!(hits.len(), 1);
        let hits = filter_transactions(&transactions, Some("marko"), None, None);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_filter_transactions_by_direction() {
        let transactions = vec![
            tx(1, "Panel", StockDirection::Input, 1, "100", "P"),
            tx(2, "Panel", StockDirection::Output, 1, "100", "P"),
        ];

        let outputs =
            filter_transactions(&transactions, None, Some(StockDirection::Output), None);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].id.as_i32(), 2);
    }

    #[test]
    fn test_history_summary_counts() {
        let transactions = vec![
            tx(1, "Panel", StockDirection::Input, 1, "100", "P"),
            tx(2, "Panel", StockDirection::Output, 1, "250.50", "P"),
            tx(3, "Panel", StockDirection::Output, 1, "149.50", "P"),
        ];
        let refs: Vec<&StockTransaction> = transactions.iter().collect();

        let summary = history_summary(&refs);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.inputs, 1);
        assert_eq!(summary.outputs, 2);
        assert_eq!(summary.total_value, dec("500.00"));
    }

    #[test]
    fn test_project_rollups_rank_by_value_desc() {
        let transactions = vec![
            tx(1, "Panel", StockDirection::Output, 2, "200", "Mali projekat"),
            tx(2, "Inverter", StockDirection::Output, 1, "5000", "Veliki projekat"),
            tx(3, "Kabl", StockDirection::Output, 10, "1000", "Veliki projekat"),
            // Inputs and blank projects are excluded
            tx(4, "Panel", StockDirection::Input, 5, "9999", "Veliki projekat"),
            tx(5, "Panel", StockDirection::Output, 1, "50", ""),
        ];

        let rollups = project_rollups(&transactions);
        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups[0].project, "Veliki projekat");
        assert_eq!(rollups[0].total_value, dec("6000"));
        assert_eq!(rollups[0].total_quantity, 11);
        assert_eq!(rollups[0].distinct_items, 2);
        assert_eq!(rollups[0].transaction_count, 2);
        assert_eq!(rollups[1].project, "Mali projekat");
    }

    #[test]
    fn test_consumption_totals_equal_sum_of_rollups() {
        let transactions = vec![
            tx(1, "Panel", StockDirection::Output, 2, "200", "A"),
            tx(2, "Inverter", StockDirection::Output, 1, "5000", "B"),
        ];
        let refs: Vec<&StockTransaction> = transactions.iter().collect();

        let all = consumption_totals(&refs);
        let per_project = project_rollups(&transactions);
        let summed: Decimal = per_project.iter().map(|r| r.total_value).sum();
        assert_eq!(all.total_value, summed);
        assert_eq!(all.transaction_count, 2);
        assert_eq!(all.distinct_items, 2);
    }

    #[test]
    fn test_distinct_projects_drops_blanks_and_sorts() {
        let transactions = vec![
            tx(1, "Panel", StockDirection::Input, 1, "100", "Zeleni krov"),
            tx(2, "Panel", StockDirection::Output, 1, "100", "Autoput"),
            tx(3, "Panel", StockDirection::Output, 1, "100", ""),
            tx(4, "Panel", StockDirection::Output, 1, "100", "Autoput"),
        ];

        assert_eq!(
            distinct_projects(&transactions),
            vec!["Autoput".to_owned(), "Zeleni krov".to_owned()]
        );
    }

    #[test]
    fn test_suppliers_deduped_and_sorted() {
        let items = vec![
            item(1, None, 1, 0, "1"),
            item(2, None, 1, 0, "1"),
        ];
        assert_eq!(suppliers(&items), vec!["Solar Tech Solutions".to_owned()]);
    }
}
