//! RFQ draft route handlers.
//!
//! The draft lives in the session (the cart idiom): add merges by item,
//! remove/update are keyed by line id, and the whole thing resets when the
//! session ends. Export renders either a printable A4 document or CSV.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use sunstock_core::{ItemId, RfqDraft, RfqLine};

use crate::db::ItemRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::session_keys;
use crate::services::export;
use crate::state::AppState;

use super::dashboard::AdminUserView;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the draft from the session, empty if none yet.
async fn load_draft(session: &Session) -> RfqDraft {
    session
        .get::<RfqDraft>(session_keys::RFQ_DRAFT)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the draft back to the session.
async fn save_draft(session: &Session, draft: &RfqDraft) -> Result<(), AppError> {
    session
        .insert(session_keys::RFQ_DRAFT, draft)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store RFQ draft: {e}")))
}

// =============================================================================
// Form & Query Types
// =============================================================================

/// Add-to-draft form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemForm {
    pub item_id: i32,
    /// An empty quantity field arrives as None and defaults to 1.
    #[serde(default, deserialize_with = "empty_i32_as_none")]
    pub quantity: Option<i32>,
}

/// Deserialize an optional integer form field, treating "" as absent.
fn empty_i32_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<i32>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Quantity-update form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemForm {
    pub line_id: Uuid,
    pub quantity: i32,
}

/// Remove-line form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemForm {
    pub line_id: Uuid,
}

/// Supplier block entered on the draft screen, passed through to the
/// document routes as query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierQuery {
    pub supplier_name: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_email: Option<String>,
}

/// Error-code query for the draft screen.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Map an error code from the query string to a display message.
fn error_message(code: Option<&str>) -> String {
    match code {
        Some("supplier_name") => "Molimo unesite naziv dobavljaca.".to_owned(),
        Some("supplier_address") => "Molimo unesite adresu dobavljaca.".to_owned(),
        Some("supplier_email") => "Molimo unesite email dobavljaca.".to_owned(),
        Some("empty") => "Molimo izaberite bar jedan artikal.".to_owned(),
        Some(_) => "Zahtev nije mogao da se obradi.".to_owned(),
        None => String::new(),
    }
}

// =============================================================================
// Views
// =============================================================================

/// Draft line view for templates.
#[derive(Debug, Clone)]
pub struct RfqLineView {
    pub line_id: String,
    pub ordinal: usize,
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl RfqLineView {
    fn from_line(index: usize, line: &RfqLine) -> Self {
        Self {
            line_id: line.id.to_string(),
            ordinal: index + 1,
            name: line.name.clone(),
            unit: line.unit.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total(),
        }
    }
}

fn line_views(draft: &RfqDraft) -> Vec<RfqLineView> {
    draft
        .lines()
        .iter()
        .enumerate()
        .map(|(i, l)| RfqLineView::from_line(i, l))
        .collect()
}

/// Draft screen template.
#[derive(Template, WebTemplate)]
#[template(path = "rfq/index.html")]
pub struct RfqIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub lines: Vec<RfqLineView>,
    pub total: Decimal,
    pub error: String,
}

/// Printable A4 document template (standalone, print stylesheet).
#[derive(Template, WebTemplate)]
#[template(path = "rfq/print.html")]
pub struct RfqPrintTemplate {
    pub company_name: String,
    pub company_address: String,
    pub company_email: String,
    pub company_phone: String,
    pub supplier_name: String,
    pub supplier_address: String,
    pub supplier_email: String,
    pub date: String,
    pub lines: Vec<RfqLineView>,
    pub total: Decimal,
}

// =============================================================================
// Handlers
// =============================================================================

/// Draft screen.
///
/// GET /rfq
#[instrument(skip(admin, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> RfqIndexTemplate {
    let draft = load_draft(&session).await;

    RfqIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/rfq",
        lines: line_views(&draft),
        total: draft.total(),
        error: error_message(query.error.as_deref()),
    }
}

/// Add an item to the draft.
///
/// Merges into an existing line for the same item; quantities below 1 are
/// raised to 1 before the add.
///
/// POST /rfq/items
#[instrument(skip(_admin, state, session, form))]
pub async fn add_item(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddItemForm>,
) -> Result<Redirect, AppError> {
    let item = ItemRepository::new(state.pool())
        .get(ItemId::new(form.item_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {}", form.item_id)))?;

    let quantity = form.quantity.unwrap_or(1).max(1);

    let mut draft = load_draft(&session).await;
    draft.add(item.id, &item.name, item.unit_price, quantity);
    save_draft(&session, &draft).await?;

    Ok(Redirect::to("/inventory"))
}

/// Set a line's quantity (clamped to a minimum of 1).
///
/// POST /rfq/items/update
#[instrument(skip(_admin, session, form))]
pub async fn update_item(
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<UpdateItemForm>,
) -> Result<Redirect, AppError> {
    let mut draft = load_draft(&session).await;
    draft.set_quantity(form.line_id, form.quantity);
    save_draft(&session, &draft).await?;

    Ok(Redirect::to("/rfq"))
}

/// Remove a line from the draft.
///
/// POST /rfq/items/remove
#[instrument(skip(_admin, session, form))]
pub async fn remove_item(
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<RemoveItemForm>,
) -> Result<Redirect, AppError> {
    let mut draft = load_draft(&session).await;
    draft.remove(form.line_id);
    save_draft(&session, &draft).await?;

    Ok(Redirect::to("/rfq"))
}

/// Empty the draft.
///
/// POST /rfq/clear
#[instrument(skip(_admin, session))]
pub async fn clear(
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
) -> Result<Redirect, AppError> {
    let mut draft = load_draft(&session).await;
    draft.clear();
    save_draft(&session, &draft).await?;

    Ok(Redirect::to("/rfq"))
}

/// Validate the supplier block; returns the error code of the first missing
/// field.
fn validate_supplier(query: &SupplierQuery) -> Result<(String, String, String), &'static str> {
    let name = query.supplier_name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        return Err("supplier_name");
    }
    let address = query.supplier_address.as_deref().unwrap_or("").trim();
    if address.is_empty() {
        return Err("supplier_address");
    }
    let email = query.supplier_email.as_deref().unwrap_or("").trim();
    if email.is_empty() {
        return Err("supplier_email");
    }
    Ok((name.to_owned(), address.to_owned(), email.to_owned()))
}

/// Printable A4 document.
///
/// GET /rfq/print
#[instrument(skip(_admin, state, session))]
pub async fn print(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SupplierQuery>,
) -> Response {
    let draft = load_draft(&session).await;
    if draft.is_empty() {
        return Redirect::to("/rfq?error=empty").into_response();
    }

    let (supplier_name, supplier_address, supplier_email) = match validate_supplier(&query) {
        Ok(supplier) => supplier,
        Err(code) => return Redirect::to(&format!("/rfq?error={code}")).into_response(),
    };

    let company = &state.config().company;

    RfqPrintTemplate {
        company_name: company.name.clone(),
        company_address: company.address.clone(),
        company_email: company.email.clone(),
        company_phone: company.phone.clone(),
        supplier_name,
        supplier_address,
        supplier_email,
        date: Utc::now().format("%d.%m.%Y").to_string(),
        lines: line_views(&draft),
        total: draft.total(),
    }
    .into_response()
}

/// Draft as CSV.
///
/// GET /rfq/export.csv
#[instrument(skip(_admin, session))]
pub async fn export_csv(
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
) -> Response {
    let draft = load_draft(&session).await;
    if draft.is_empty() {
        return Redirect::to("/rfq?error=empty").into_response();
    }

    let csv = export::rfq_csv(&draft);
    let filename = format!("zahtev_za_ponudu_{}.csv", Utc::now().format("%Y-%m-%d"));

    (
        StatusCode::OK,
        [
            ("Content-Type", "text/csv".to_owned()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}
