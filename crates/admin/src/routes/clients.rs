//! Client/project consumption route handlers.
//!
//! "Clients" are the projects material was issued to: the screen shows
//! per-project rollups over output transactions and exports the filtered
//! rows as CSV.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use sunstock_core::StockDirection;

use crate::db::TransactionRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::services::reports::{self, ProjectRollup};
use crate::services::export;
use crate::state::AppState;

use super::dashboard::AdminUserView;
use super::history::TransactionView;

/// How many projects the overview cards show.
const OVERVIEW_LIMIT: usize = 6;

/// Query parameters for the clients page and its CSV export.
#[derive(Debug, Deserialize)]
pub struct ClientsQuery {
    pub q: Option<String>,
    pub project: Option<String>,
}

impl ClientsQuery {
    fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn project(&self) -> Option<&str> {
        self.project
            .as_deref()
            .filter(|p| !p.is_empty() && *p != "all")
    }
}

/// Project rollup view for templates.
#[derive(Debug, Clone)]
pub struct RollupView {
    pub project: String,
    pub total_value: String,
    pub total_quantity: i64,
    pub distinct_items: usize,
    pub transaction_count: usize,
}

impl From<&ProjectRollup> for RollupView {
    fn from(rollup: &ProjectRollup) -> Self {
        Self {
            project: rollup.project.clone(),
            // Whole dinars on the overview cards
            total_value: format!("{:.0} RSD", rollup.total_value),
            total_quantity: rollup.total_quantity,
            distinct_items: rollup.distinct_items,
            transaction_count: rollup.transaction_count,
        }
    }
}

/// Clients page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/index.html")]
pub struct ClientsTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub projects: Vec<String>,
    pub selected_project: String,
    pub search_query: String,
    pub totals: RollupView,
    /// Shown only when no single project is selected.
    pub overview: Vec<RollupView>,
    pub transactions: Vec<TransactionView>,
}

/// Clients page.
///
/// GET /clients
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ClientsQuery>,
) -> Result<ClientsTemplate, AppError> {
    let transactions = TransactionRepository::new(state.pool()).list().await?;

    let selected = query.project();
    let filtered = reports::filter_transactions(
        &transactions,
        query.search(),
        Some(StockDirection::Output),
        selected,
    );

    let totals = reports::consumption_totals(&filtered);
    let rollups = reports::project_rollups(&transactions);
    let overview = if selected.is_none() {
        rollups.iter().take(OVERVIEW_LIMIT).map(Into::into).collect()
    } else {
        Vec::new()
    };

    let mut projects: Vec<String> = rollups.into_iter().map(|r| r.project).collect();
    projects.sort();

    Ok(ClientsTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/clients",
        projects,
        selected_project: selected.unwrap_or_default().to_owned(),
        search_query: query.search().unwrap_or_default().to_owned(),
        totals: RollupView::from(&totals),
        overview,
        transactions: filtered.iter().map(|t| TransactionView::from(*t)).collect(),
    })
}

/// CSV export of the filtered output transactions.
///
/// GET /clients/export.csv
#[instrument(skip(_admin, state))]
pub async fn export_csv(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = TransactionRepository::new(state.pool()).list().await?;

    let selected = query.project();
    let filtered = reports::filter_transactions(
        &transactions,
        query.search(),
        Some(StockDirection::Output),
        selected,
    );

    let csv = export::consumption_csv(&filtered);
    let filename = export::consumption_filename(selected);

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", "text/csv".to_owned()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
