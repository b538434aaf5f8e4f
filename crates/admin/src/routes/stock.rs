//! Stock transaction route handlers (goods received / goods issued).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use sunstock_core::{ItemId, StaffId, StockDirection};

use crate::db::{ItemRepository, StaffRepository, TransactionRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{CurrentAdmin, NewTransaction};
use crate::state::AppState;

use super::dashboard::AdminUserView;

/// Query parameters for the form page (success/error feedback).
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub saved: Option<String>,
    pub error: Option<String>,
}

/// Form input for recording a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub item_id: i32,
    pub staff_id: i32,
    pub quantity: i32,
    /// Optional price override; an empty field arrives as None.
    #[serde(default, deserialize_with = "empty_decimal_as_none")]
    pub unit_price: Option<Decimal>,
    pub project: String,
    #[serde(default)]
    pub comment: String,
}

/// Deserialize an optional decimal form field, treating "" as absent.
///
/// Browsers submit empty number inputs as empty strings, which a plain
/// `Option<Decimal>` rejects.
fn empty_decimal_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<Decimal>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Item option for the select box.
#[derive(Debug, Clone)]
pub struct ItemOptionView {
    pub id: i32,
    pub label: String,
}

/// Staff option for the select box.
#[derive(Debug, Clone)]
pub struct StaffOptionView {
    pub id: i32,
    pub label: String,
}

/// Stock transaction form template (shared by both directions).
#[derive(Template, WebTemplate)]
#[template(path = "stock/form.html")]
pub struct StockFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub title: &'static str,
    pub action: &'static str,
    pub is_input: bool,
    pub items: Vec<ItemOptionView>,
    pub staff: Vec<StaffOptionView>,
    pub saved: bool,
    pub error: String,
}

async fn form_page(
    admin: &CurrentAdmin,
    state: &AppState,
    direction: StockDirection,
    query: &StockQuery,
) -> Result<StockFormTemplate, AppError> {
    let items = ItemRepository::new(state.pool()).list(None).await?;
    let staff = StaffRepository::new(state.pool()).list().await?;

    let (title, action, current_path) = match direction {
        StockDirection::Input => ("Ulaz robe", "/stock/input", "/stock/input"),
        StockDirection::Output => ("Izlaz robe", "/stock/output", "/stock/output"),
    };

    Ok(StockFormTemplate {
        admin_user: AdminUserView::from(admin),
        current_path,
        title,
        action,
        is_input: direction == StockDirection::Input,
        items: items
            .iter()
            .map(|i| ItemOptionView {
                id: i.id.as_i32(),
                label: format!("{} (Trenutno: {})", i.name, i.current_stock),
            })
            .collect(),
        staff: staff
            .iter()
            .map(|s| StaffOptionView {
                id: s.id.as_i32(),
                label: format!("{} ({})", s.name, s.role),
            })
            .collect(),
        saved: query.saved.is_some(),
        error: error_message(query.error.as_deref()),
    })
}

/// Map an error code from the query string to a display message.
fn error_message(code: Option<&str>) -> String {
    match code {
        Some("quantity") => "Kolicina mora biti veca od nule.".to_owned(),
        Some("project") => "Naziv projekta je obavezan.".to_owned(),
        Some(_) => "Transakcija nije mogla da se obradi.".to_owned(),
        None => String::new(),
    }
}

async fn record(
    state: &AppState,
    direction: StockDirection,
    form: TransactionForm,
) -> Result<Redirect, AppError> {
    let back = match direction {
        StockDirection::Input => "/stock/input",
        StockDirection::Output => "/stock/output",
    };

    if form.quantity <= 0 {
        return Ok(Redirect::to(&format!("{back}?error=quantity")));
    }
    if form.project.trim().is_empty() {
        return Ok(Redirect::to(&format!("{back}?error=project")));
    }

    let comment = form.comment.trim();
    let input = NewTransaction {
        item_id: ItemId::new(form.item_id),
        direction,
        quantity: form.quantity,
        unit_price: form.unit_price,
        project: form.project.trim().to_owned(),
        staff_id: StaffId::new(form.staff_id),
        comment: (!comment.is_empty()).then(|| comment.to_owned()),
    };

    let transaction = TransactionRepository::new(state.pool()).create(&input).await?;
    tracing::info!(
        transaction = %transaction.id,
        item = %transaction.item_name,
        direction = %transaction.direction,
        quantity = transaction.quantity,
        "Transaction recorded"
    );

    Ok(Redirect::to(&format!("{back}?saved=1")))
}

/// Goods-received form.
///
/// GET /stock/input
#[instrument(skip(admin, state))]
pub async fn input_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<StockFormTemplate, AppError> {
    form_page(&admin, &state, StockDirection::Input, &query).await
}

/// Goods-issued form.
///
/// GET /stock/output
#[instrument(skip(admin, state))]
pub async fn output_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<StockFormTemplate, AppError> {
    form_page(&admin, &state, StockDirection::Output, &query).await
}

/// Record an input transaction.
///
/// POST /stock/input
#[instrument(skip(_admin, state, form))]
pub async fn record_input(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> Result<Redirect, AppError> {
    record(&state, StockDirection::Input, form).await
}

/// Record an output transaction.
///
/// POST /stock/output
#[instrument(skip(_admin, state, form))]
pub async fn record_output(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> Result<Redirect, AppError> {
    record(&state, StockDirection::Output, form).await
}
