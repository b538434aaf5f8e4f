//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::db::{ItemRepository, TransactionRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{CurrentAdmin, InventoryItem, StockTransaction};
use crate::services::reports;
use crate::state::AppState;

use sunstock_core::StockDirection;

/// How many low-stock rows the dashboard lists.
const LOW_STOCK_LIMIT: usize = 5;

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
            role: admin.role.to_string(),
        }
    }
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub project: Option<String>,
}

/// Low-stock row view.
#[derive(Debug, Clone)]
pub struct LowStockView {
    pub name: String,
    pub current_stock: i32,
    pub min_stock: i32,
}

impl From<&InventoryItem> for LowStockView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            current_stock: item.current_stock,
            min_stock: item.min_stock,
        }
    }
}

/// Recent transaction view.
#[derive(Debug, Clone)]
pub struct RecentTransactionView {
    pub item_name: String,
    pub is_input: bool,
    pub signed_quantity: String,
    pub date: String,
    pub comment: String,
}

impl From<&StockTransaction> for RecentTransactionView {
    fn from(t: &StockTransaction) -> Self {
        let sign = match t.direction {
            StockDirection::Input => '+',
            StockDirection::Output => '-',
        };
        Self {
            item_name: t.item_name.clone(),
            is_input: t.direction == StockDirection::Input,
            signed_quantity: format!("{sign}{}", t.quantity),
            date: t.created_at.format("%d.%m.%Y").to_string(),
            comment: t.comment.clone().unwrap_or_default(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub projects: Vec<String>,
    pub selected_project: String,
    pub total_items: usize,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub low_stock: Vec<LowStockView>,
    pub recent: Vec<RecentTransactionView>,
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<DashboardTemplate, AppError> {
    let items = ItemRepository::new(state.pool()).list(None).await?;
    let transactions = TransactionRepository::new(state.pool()).list().await?;

    let selected = query
        .project
        .as_deref()
        .filter(|p| !p.is_empty() && *p != "all");

    let summary = reports::dashboard_summary(&items, &transactions, selected);
    let projects = reports::distinct_projects(&transactions);

    Ok(DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/",
        projects,
        selected_project: selected.unwrap_or_default().to_owned(),
        total_items: summary.total_items,
        total_value: summary.total_value,
        low_stock_count: summary.low_stock.len(),
        low_stock: summary
            .low_stock
            .iter()
            .take(LOW_STOCK_LIMIT)
            .map(Into::into)
            .collect(),
        recent: summary.recent.iter().map(Into::into).collect(),
    })
}
