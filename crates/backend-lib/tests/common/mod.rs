//! Shared setup for the router tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use backend_lib::auth::{DefaultAuth, HashParams, InMemoryIdentityStore, PasswordHasher};
use backend_lib::{config::Settings, router::create_router, AppState};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

/// Scrypt parameters cheap enough for tests
pub const FAST: HashParams = HashParams { log_n: 4, r: 8, p: 1 };

/// Router over a fresh in-memory store, plus the store for inspection
pub fn test_app() -> (Router, InMemoryIdentityStore) {
    let store = InMemoryIdentityStore::new();
    let hasher = PasswordHasher::new(FAST).unwrap();
    let settings = Settings {
        hasher: FAST,
        ..Settings::default()
    };
    let state = AppState::new(Arc::new(DefaultAuth::new(store.clone(), hasher)), settings);
    (create_router(Arc::new(state)), store)
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// `name=value` part of the response's `Set-Cookie` header
pub fn cookie_pair(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
