//! Integration tests against a real listener.
//!
//! Each test binds an ephemeral port on localhost and talks to it over HTTP.

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use spaceship::api::{create_router, AppState};
use spaceship::config::Config;
use spaceship::matrix::{MATRIX_LEN, VALUE_UPPER};

/// Serve `state` on an ephemeral port and return its address.
async fn spawn_server(state: AppState, config: Config) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = create_router(state.clone(), &config);
    state.set_ready(true);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

async fn get_json(url: String) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn ints(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn greeting_over_http() {
    let addr = spawn_server(AppState::new(), Config::default()).await;

    let (status, body) = get_json(format!("http://{addr}/api")).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({"msg": "Hello, World!"}));
}

#[tokio::test]
async fn matrices_over_http() {
    let addr = spawn_server(AppState::new(), Config::default()).await;

    let (status, body) = get_json(format!("http://{addr}/api/matrices")).await;
    assert_eq!(status, reqwest::StatusCode::OK);

    let a = ints(&body["matrix_a"]);
    let b = ints(&body["matrix_b"]);
    assert_eq!(a.len(), MATRIX_LEN);
    assert_eq!(b.len(), MATRIX_LEN);
    assert!(a.iter().chain(&b).all(|x| (0..VALUE_UPPER).contains(x)));

    let product: i64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
    assert_eq!(body["product"], json!(product));
}

#[tokio::test]
async fn repeated_calls_are_not_idempotent() {
    let addr = spawn_server(AppState::new(), Config::default()).await;
    let url = format!("http://{addr}/api/matrices");

    let (_, first) = get_json(url.clone()).await;
    let (_, second) = get_json(url).await;
    assert!(first["matrix_a"] != second["matrix_a"]);
}

#[tokio::test]
async fn seeded_servers_serve_identical_sequences() {
    let left = spawn_server(AppState::seeded(2024), Config::default()).await;
    let right = spawn_server(AppState::seeded(2024), Config::default()).await;

    for _ in 0..3 {
        let (_, a) = get_json(format!("http://{left}/api/matrices")).await;
        let (_, b) = get_json(format!("http://{right}/api/matrices")).await;
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn custom_prefix_moves_routes() {
    let config = Config {
        api_prefix: "/v2".to_string(),
        ..Config::default()
    };
    let addr = spawn_server(AppState::new(), config).await;

    let (status, _) = get_json(format!("http://{addr}/v2")).await;
    assert_eq!(status, reqwest::StatusCode::OK);

    let response = reqwest::get(format!("http://{addr}/api")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ready_once_serving() {
    let addr = spawn_server(AppState::new(), Config::default()).await;

    let (status, body) = get_json(format!("http://{addr}/ready")).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({"ready": true}));
}
