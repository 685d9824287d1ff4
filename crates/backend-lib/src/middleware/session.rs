// ============================
// crates/backend-lib/src/middleware/session.rs
// ============================
//! Session cookie transport.
//!
//! Reads the session cookie on the way in and attaches the identity it
//! resolves to; builds `Set-Cookie` values on the way out.
use crate::auth::Identity;
use crate::{error::AppError, AppState};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Duration;

/// Identity attached to the request by [`current_identity`].
/// `None` for anonymous requests.
#[derive(Clone, Debug, Default)]
pub struct CurrentIdentity(pub Option<Identity>);

/// Value of the cookie named `name`, if the request carries one
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(
    name: &str,
    token: &str,
    ttl: Duration,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))
}

/// `Set-Cookie` value that makes the client drop the session cookie
pub fn clear_session_cookie(name: &str, secure: bool) -> Result<HeaderValue, AppError> {
    session_cookie(name, "", Duration::ZERO, secure)
}

/// Resolve the session cookie to an identity and attach it as
/// [`CurrentIdentity`]
pub async fn current_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match session_token(request.headers(), &state.settings.cookie_name)
        .and_then(|token| state.sessions.resolve_session(&token))
    {
        Some(id) => {
            let identity = state.auth.identity(id).await?;
            if identity.is_none() {
                tracing::warn!(%id, "session refers to unknown identity");
            }
            identity
        },
        None => None,
    };

    request.extensions_mut().insert(CurrentIdentity(identity));
    Ok(next.run(request).await)
}
