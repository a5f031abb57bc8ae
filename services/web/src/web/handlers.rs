//! services/web/src/web/handlers.rs
//!
//! Contains the Axum handlers for the five HTTP endpoints and the explicit
//! routing table that wires them together. All side effects are delegated to
//! the storage port and the session module.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use tracing::error;

use crate::web::session;
use crate::web::state::AppState;
use crate::web::templates;

//=========================================================================================
// Form Payloads
//=========================================================================================

#[derive(Deserialize)]
pub struct AddEntryForm {
    pub title: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

//=========================================================================================
// Routing Table
//=========================================================================================

/// Builds the router: every endpoint the service exposes, in one place.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_entries))
        .route("/add", post(add_entry))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .with_state(state)
}

/// 302 back to the entry list.
fn redirect_to_index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/")])
}

fn storage_error(e: miniblog_core::ports::PortError) -> (StatusCode, String) {
    error!("Storage operation failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "storage unavailable".to_string(),
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET / - every entry, newest first, plus any pending flash message.
async fn show_entries(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = state.store.list_entries().await.map_err(storage_error)?;

    let logged_in = session::is_authenticated(&jar);
    let (jar, flash) = session::take_flash(jar);
    let page = templates::render_entries(&entries, flash.as_deref(), logged_in);
    Ok((jar, Html(page)))
}

/// POST /add - insert one entry; admin only.
async fn add_entry(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddEntryForm>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !session::is_authenticated(&jar) {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
    }

    state
        .store
        .add_entry(&form.title, &form.text)
        .await
        .map_err(storage_error)?;

    let jar = session::set_flash(jar, "New entry was successfully posted");
    Ok((jar, redirect_to_index()))
}

/// GET /login - the blank login form.
async fn login_form(jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, flash) = session::take_flash(jar);
    (jar, Html(templates::render_login(None, flash.as_deref())))
}

/// POST /login - verify credentials; the jar is only returned (and thus the
/// session only changes) on success.
async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.config.admin.verify(&form.username, &form.password) {
        Ok(()) => {
            let jar = session::set_flash(session::log_in(jar), "You were logged in");
            (jar, redirect_to_index()).into_response()
        }
        Err(reason) => {
            Html(templates::render_login(Some(&reason.to_string()), None)).into_response()
        }
    }
}

/// GET /logout - drop the logged-in flag; harmless when already anonymous.
async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    let jar = session::set_flash(session::log_out(jar), "You were logged out");
    (jar, redirect_to_index())
}
