//! Staff management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use sunstock_core::{Email, StaffId, StaffRole};

use crate::db::StaffRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{StaffInput, StaffMember};
use crate::state::AppState;

use super::dashboard::AdminUserView;

/// Form input for creating/updating a staff member.
#[derive(Debug, Deserialize)]
pub struct StaffForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

impl TryFrom<StaffForm> for StaffInput {
    type Error = AppError;

    fn try_from(form: StaffForm) -> Result<Self, Self::Error> {
        let email = Email::parse(form.email.trim())
            .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
        let role: StaffRole = form
            .role
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid role: {}", form.role)))?;

        Ok(Self {
            name: form.name.trim().to_owned(),
            email,
            role,
            department: form.department.trim().to_owned(),
        })
    }
}

/// Staff row view for templates.
#[derive(Debug, Clone)]
pub struct StaffView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub created_at: String,
}

impl From<&StaffMember> for StaffView {
    fn from(member: &StaffMember) -> Self {
        Self {
            id: member.id.as_i32(),
            name: member.name.clone(),
            email: member.email.to_string(),
            role: member.role.to_string(),
            department: member.department.clone(),
            created_at: member.created_at.format("%d.%m.%Y").to_string(),
        }
    }
}

/// Staff listing template.
#[derive(Template, WebTemplate)]
#[template(path = "staff/index.html")]
pub struct StaffIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    pub staff: Vec<StaffView>,
}

/// Staff form template (create and edit share it).
#[derive(Template, WebTemplate)]
#[template(path = "staff/form.html")]
pub struct StaffFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: &'static str,
    /// Empty id means "create".
    pub staff_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub roles: Vec<String>,
}

fn role_options() -> Vec<String> {
    StaffRole::all().iter().map(ToString::to_string).collect()
}

/// Staff listing page.
///
/// GET /staff
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<StaffIndexTemplate, AppError> {
    let staff = StaffRepository::new(state.pool()).list().await?;

    Ok(StaffIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/staff",
        staff: staff.iter().map(Into::into).collect(),
    })
}

/// New staff form.
///
/// GET /staff/new
#[instrument(skip(admin))]
pub async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> StaffFormTemplate {
    StaffFormTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/staff",
        staff_id: String::new(),
        name: String::new(),
        email: String::new(),
        role: StaffRole::Staff.to_string(),
        department: String::new(),
        roles: role_options(),
    }
}

/// Create a staff member.
///
/// POST /staff
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<StaffForm>,
) -> Result<Redirect, AppError> {
    let input = StaffInput::try_from(form)?;
    let member = StaffRepository::new(state.pool()).create(&input).await?;
    tracing::info!(staff = %member.id, name = %member.name, "Staff member created");

    Ok(Redirect::to("/staff"))
}

/// Edit staff form, pre-filled.
///
/// GET /staff/{id}/edit
#[instrument(skip(admin, state))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StaffFormTemplate, AppError> {
    let member = StaffRepository::new(state.pool())
        .get(StaffId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("staff member {id}")))?;

    Ok(StaffFormTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/staff",
        staff_id: member.id.to_string(),
        name: member.name.clone(),
        email: member.email.to_string(),
        role: member.role.to_string(),
        department: member.department,
        roles: role_options(),
    })
}

/// Update a staff member.
///
/// POST /staff/{id}
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<StaffForm>,
) -> Result<Redirect, AppError> {
    let input = StaffInput::try_from(form)?;
    StaffRepository::new(state.pool())
        .update(StaffId::new(id), &input)
        .await?;
    tracing::info!(staff = id, "Staff member updated");

    Ok(Redirect::to("/staff"))
}

/// Delete a staff member.
///
/// POST /staff/{id}/delete
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    StaffRepository::new(state.pool())
        .delete(StaffId::new(id))
        .await?;
    tracing::info!(staff = id, "Staff member deleted");

    Ok(Redirect::to("/staff"))
}
