// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use crate::handlers::auth::{signin, signout, signup, whoami};
use crate::middleware::current_identity;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the `/auth` router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/signout", post(signout))
        .route("/auth/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(state.clone(), current_identity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
