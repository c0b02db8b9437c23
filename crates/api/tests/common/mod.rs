#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dressup_api::config::ServerConfig;
use dressup_api::router::build_app_router;
use dressup_api::sessions::SessionManager;
use dressup_api::state::AppState;
use dressup_api::ws::WsManager;
use dressup_core::{Catalog, DressUpEngine};
use dressup_events::EventBus;

/// The catalog shipped with the server.
pub const CATALOG_JSON: &str = include_str!("../../../../data/catalog.json");

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        catalog_path: "data/catalog.json".to_string(),
        default_variant: None,
        max_sessions: 100,
        session_idle_timeout_secs: 7200,
        session_reap_interval_secs: 300,
    }
}

/// Application state over the shipped catalog.
pub fn test_state(config: &ServerConfig) -> AppState {
    let catalog = Catalog::from_json_str(CATALOG_JSON).expect("shipped catalog must load");
    AppState {
        config: Arc::new(config.clone()),
        engine: Arc::new(DressUpEngine::new(Arc::new(catalog))),
        sessions: Arc::new(SessionManager::new(config.max_sessions)),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    build_app_router(test_state(&config), &config)
}

/// Like [`build_test_app`] but also hands back the state so tests can
/// subscribe to the event bus or inspect sessions.
pub fn build_test_app_with_state(config: ServerConfig) -> (Router, AppState) {
    let state = test_state(&config);
    (build_app_router(state.clone(), &config), state)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// POST a raw body with no content type, as a drag-and-drop payload arrives.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a session and return its id.
pub async fn create_session(app: Router, variant: Option<&str>) -> String {
    let response = match variant {
        Some(v) => post_json(app, "/api/v1/sessions", serde_json::json!({ "variant": v })).await,
        None => post(app, "/api/v1/sessions").await,
    };
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
