//! Inventory management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use sunstock_core::ItemId;

use crate::db::ItemRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{InventoryItem, ItemInput};
use crate::services::reports;
use crate::state::AppState;

use super::dashboard::AdminUserView;

/// Query parameters for the inventory listing.
#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    pub q: Option<String>,
}

/// Form input for creating/updating an item.
///
/// Field names match the camelCase the screens submit; the repository maps
/// them onto the snake_case columns.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub project: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit_price: Decimal,
    pub supplier: String,
}

impl From<ItemForm> for ItemInput {
    fn from(form: ItemForm) -> Self {
        let project = form.project.trim();
        Self {
            name: form.name,
            category: form.category,
            project: (!project.is_empty()).then(|| project.to_owned()),
            current_stock: form.current_stock,
            min_stock: form.min_stock,
            max_stock: form.max_stock,
            unit_price: form.unit_price,
            supplier: form.supplier,
        }
    }
}

/// Inventory row view for templates.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub project: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit_price: String,
    pub stock_value: String,
    pub supplier: String,
    pub is_low_stock: bool,
}

impl From<&InventoryItem> for ItemView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            category: item.category.clone(),
            project: item.project.clone().unwrap_or_default(),
            current_stock: item.current_stock,
            min_stock: item.min_stock,
            max_stock: item.max_stock,
            unit_price: format!("{:.2} RSD", item.unit_price),
            stock_value: format!("{:.2} RSD", item.stock_value()),
            supplier: item.supplier.clone(),
            is_low_stock: item.is_low_stock(),
        }
    }
}

/// Inventory listing template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/index.html")]
pub struct InventoryIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub items: Vec<ItemView>,
    pub search_query: String,
    pub low_stock_count: usize,
}

/// Item form template (create and edit share it).
#[derive(Template, WebTemplate)]
#[template(path = "inventory/form.html")]
pub struct InventoryFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    /// Empty id means "create".
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub project: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit_price: String,
    pub supplier: String,
    pub suppliers: Vec<String>,
}

impl InventoryFormTemplate {
    fn blank(admin_user: AdminUserView, suppliers: Vec<String>) -> Self {
        Self {
            admin_user,
            current_path: "/inventory",
            item_id: String::new(),
            name: String::new(),
            category: String::new(),
            project: String::new(),
            current_stock: 0,
            min_stock: 0,
            max_stock: 0,
            unit_price: String::new(),
            supplier: String::new(),
            suppliers,
        }
    }

    fn prefilled(admin_user: AdminUserView, item: &InventoryItem, suppliers: Vec<String>) -> Self {
        Self {
            admin_user,
            current_path: "/inventory",
            item_id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.clone(),
            project: item.project.clone().unwrap_or_default(),
            current_stock: item.current_stock,
            min_stock: item.min_stock,
            max_stock: item.max_stock,
            unit_price: format!("{:.2}", item.unit_price),
            supplier: item.supplier.clone(),
            suppliers,
        }
    }
}

/// Inventory listing page.
///
/// GET /inventory
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<InventoryIndexTemplate, AppError> {
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let items = ItemRepository::new(state.pool()).list(search).await?;

    let low_stock_count = items.iter().filter(|i| i.is_low_stock()).count();

    Ok(InventoryIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/inventory",
        items: items.iter().map(Into::into).collect(),
        search_query: search.unwrap_or_default().to_owned(),
        low_stock_count,
    })
}

/// New item form.
///
/// GET /inventory/new
#[instrument(skip(admin, state))]
pub async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<InventoryFormTemplate, AppError> {
    let items = ItemRepository::new(state.pool()).list(None).await?;

    Ok(InventoryFormTemplate::blank(
        AdminUserView::from(&admin),
        reports::suppliers(&items),
    ))
}

/// Create an item.
///
/// POST /inventory
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, AppError> {
    let input = ItemInput::from(form);
    let item = ItemRepository::new(state.pool()).create(&input).await?;
    tracing::info!(item = %item.id, name = %item.name, "Item created");

    Ok(Redirect::to("/inventory"))
}

/// Edit item form, pre-filled.
///
/// GET /inventory/{id}/edit
#[instrument(skip(admin, state))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<InventoryFormTemplate, AppError> {
    let repo = ItemRepository::new(state.pool());
    let item = repo
        .get(ItemId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;
    let items = repo.list(None).await?;

    Ok(InventoryFormTemplate::prefilled(
        AdminUserView::from(&admin),
        &item,
        reports::suppliers(&items),
    ))
}

/// Update an item.
///
/// POST /inventory/{id}
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, AppError> {
    let input = ItemInput::from(form);
    ItemRepository::new(state.pool())
        .update(ItemId::new(id), &input)
        .await?;
    tracing::info!(item = id, "Item updated");

    Ok(Redirect::to("/inventory"))
}

/// Delete an item.
///
/// POST /inventory/{id}/delete
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    ItemRepository::new(state.pool())
        .delete(ItemId::new(id))
        .await?;
    tracing::info!(item = id, "Item deleted");

    Ok(Redirect::to("/inventory"))
}
