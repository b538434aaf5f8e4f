//! Transaction history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use sunstock_core::StockDirection;

use crate::db::TransactionRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::StockTransaction;
use crate::services::reports;
use crate::state::AppState;

use super::dashboard::AdminUserView;

/// Query parameters for the history page.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub q: Option<String>,
    /// "input", "output" or empty/"all".
    pub direction: Option<String>,
}

/// Transaction row view for templates.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub date: String,
    pub is_input: bool,
    pub direction_label: &'static str,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub total_value: String,
    pub staff_name: String,
    pub project: String,
    pub comment: String,
}

impl From<&StockTransaction> for TransactionView {
    fn from(t: &StockTransaction) -> Self {
        Self {
            date: t.created_at.format("%d.%m.%Y").to_string(),
            is_input: t.direction == StockDirection::Input,
            direction_label: match t.direction {
                StockDirection::Input => "Ulaz",
                StockDirection::Output => "Izlaz",
            },
            item_name: t.item_name.clone(),
            quantity: t.quantity,
            unit_price: format!("{:.2} RSD", t.unit_price),
            total_value: format!("{:.2} RSD", t.total_value),
            staff_name: t.staff_name.clone(),
            project: t.project.clone(),
            comment: t.comment.clone().unwrap_or_default(),
        }
    }
}

/// History page template.
#[derive(Template, WebTemplate)]
#[template(path = "history/index.html")]
pub struct HistoryTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub transactions: Vec<TransactionView>,
    pub search_query: String,
    pub selected_direction: String,
    pub total: usize,
    pub inputs: usize,
    pub outputs: usize,
    pub total_value: String,
}

/// Transaction history page.
///
/// GET /history
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<HistoryTemplate, AppError> {
    let transactions = TransactionRepository::new(state.pool()).list().await?;

    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let direction = query
        .direction
        .as_deref()
        .and_then(|d| d.parse::<StockDirection>().ok());

    let filtered = reports::filter_transactions(&transactions, search, direction, None);
    let summary = reports::history_summary(&filtered);

    Ok(HistoryTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/history",
        transactions: filtered.iter().map(|t| TransactionView::from(*t)).collect(),
        search_query: search.unwrap_or_default().to_owned(),
        selected_direction: direction.map(|d| d.to_string()).unwrap_or_default(),
        total: summary.total,
        inputs: summary.inputs,
        outputs: summary.outputs,
        total_value: format!("{:.2} RSD", summary.total_value),
    })
}
