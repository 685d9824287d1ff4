// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! `/auth` HTTP handlers.
use crate::middleware::session::{
    clear_session_cookie, session_cookie, session_token, CurrentIdentity,
};
use crate::validation::validate_credentials;
use crate::{auth::Identity, error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use credentials_common::{Credentials, IdentityView};
use std::sync::Arc;

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, AppError> {
    let Json(credentials) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    validate_credentials(&credentials)?;
    Ok(credentials)
}

/// Issue a session for `identity` and build the response for it
fn established(
    state: &AppState,
    status: StatusCode,
    identity: &Identity,
) -> Result<impl IntoResponse, AppError> {
    let token = state.sessions.serialize_session(identity.id);
    let cookie = session_cookie(
        &state.settings.cookie_name,
        &token,
        state.sessions.ttl(),
        state.settings.cookie_secure,
    )?;
    Ok((status, [(header::SET_COOKIE, cookie)], Json(identity.view())))
}

/// `POST /auth/signup`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = credentials(payload)?;
    let identity = state
        .auth
        .signup(&credentials.email, &credentials.password)
        .await?;
    established(&state, StatusCode::CREATED, &identity)
}

/// `POST /auth/signin`
pub async fn signin(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = credentials(payload)?;
    let identity = state
        .auth
        .signin(&credentials.email, &credentials.password)
        .await?;
    established(&state, StatusCode::OK, &identity)
}

/// `GET /auth/whoami`. Anonymous requests get `null`.
pub async fn whoami(
    Extension(CurrentIdentity(identity)): Extension<CurrentIdentity>,
) -> Json<Option<IdentityView>> {
    Json(identity.as_ref().map(Identity::view))
}

/// `POST /auth/signout`
pub async fn signout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = session_token(&headers, &state.settings.cookie_name) {
        state.sessions.revoke(&token);
    }
    let cookie = clear_session_cookie(&state.settings.cookie_name, state.settings.cookie_secure)?;
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}
