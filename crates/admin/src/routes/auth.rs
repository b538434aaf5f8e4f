//! Authentication route handlers.
//!
//! Email + password login backed by the `admin_user` table; the session
//! stores a minimal `CurrentAdmin` identity afterwards.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query string carrying an error code back to the login page.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    /// Human-readable error message; empty when there is none.
    error: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Map an error code from the query string to a display message.
fn error_message(code: Option<&str>) -> String {
    match code {
        Some("credentials") => {
            "Neispravni podaci za prijavu. Proverite email adresu i lozinku.".to_owned()
        }
        Some("session") => "Sesija nije mogla da se sacuva. Pokusajte ponovo.".to_owned(),
        Some(_) => "Prijava nije uspela. Pokusajte ponovo.".to_owned(),
        None => String::new(),
    }
}

/// Render the login page.
///
/// Already-authenticated admins are sent straight to the dashboard.
///
/// GET /auth/login
#[instrument(skip(admin))]
pub async fn login_page(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: error_message(query.error.as_deref()),
    }
    .into_response()
}

/// Handle login form submission.
///
/// POST /auth/login
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentAdmin::from(&user);
            if let Err(e) = set_current_admin(&session, &current).await {
                tracing::error!("Failed to store session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }
            set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));
            tracing::info!(admin = %user.email, "Admin logged in");
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
            tracing::warn!("Failed login attempt");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            Redirect::to("/auth/login?error=internal").into_response()
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = clear_current_admin(&session).await;
    clear_sentry_user();
    Redirect::to("/auth/login")
}
