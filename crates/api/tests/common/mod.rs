#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cinedex_api::config::ServerConfig;
use cinedex_api::router::build_app_router;
use cinedex_api::state::AppState;
use cinedex_core::catalog::MovieCatalog;
use cinedex_core::memory_store::InMemoryMovieStore;
use cinedex_core::store::MovieStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Mirrors the development CORS defaults and serves uploads from `uploads_dir`.
pub fn test_config(uploads_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![
            "http://localhost:3000".to_string(),
            "https://movies.example.com".to_string(),
        ],
        cors_origin_suffixes: vec!["vercel.app".to_string()],
        request_timeout_secs: 30,
        uploads_dir,
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given store.
pub fn build_app_with(store: Arc<dyn MovieStore>, config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        movies: MovieCatalog::new(store),
    };
    build_app_router(state, &config)
}

/// Build the application over a fresh in-memory store.
///
/// Returns the store too so tests can inspect it directly.
pub fn build_test_app() -> (Router, Arc<InMemoryMovieStore>) {
    let store = Arc::new(InMemoryMovieStore::new());
    let app = build_app_with(
        store.clone(),
        test_config(std::env::temp_dir().join("cinedex-test-uploads")),
    );
    (app, store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Titles of a JSON array of movies, in order.
pub fn titles(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect()
}
