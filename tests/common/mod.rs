//! Shared utilities for integration testing.
//!
//! Provides an upstream mock that records every request it receives and a
//! programmable encryption-service mock with a call counter. Both bind to
//! ephemeral ports so tests can run in parallel.

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Json, Request, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use tokio::net::TcpListener;

use identity_gateway::config::{GatewayConfig, ListenerConfig, TimeoutConfig};
use identity_gateway::http::HttpServer;

/// One request observed by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub user_name: Option<String>,
}

#[derive(Clone)]
struct UpstreamState {
    records: Arc<Mutex<Vec<RecordedRequest>>>,
    body: &'static str,
}

async fn upstream_handler(State(state): State<UpstreamState>, request: Request) -> impl IntoResponse {
    let record = RecordedRequest {
        method: request.method().to_string(),
        path_and_query: request
            .uri()
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| "/".to_string()),
        user_name: request
            .headers()
            .get("x-user-name")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string()),
    };
    state.records.lock().unwrap().push(record);
    (StatusCode::OK, state.body)
}

/// Start a mock upstream that records received requests and returns a
/// fixed 200 response.
pub async fn start_mock_upstream(
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>) {
    let records = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        records: records.clone(),
        body,
    };
    let app = Router::new().fallback(upstream_handler).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, records)
}

type EncryptFn = dyn Fn(&str) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct EncryptorState {
    respond: Arc<EncryptFn>,
    calls: Arc<AtomicUsize>,
}

async fn encryptor_handler(
    State(state): State<EncryptorState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let user_name = body["userName"].as_str().unwrap_or("");
    let (status, body) = (state.respond)(user_name);
    (StatusCode::from_u16(status).unwrap(), body)
}

/// Start a programmable mock encryption service.
///
/// The closure maps the received plaintext to a (status, raw body) pair;
/// returning a non-JSON body is allowed so tests can exercise malformed
/// responses. The returned counter tracks how many calls were made.
pub async fn start_mock_encryptor<F>(respond: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let state = EncryptorState {
        respond: Arc::new(respond),
        calls: calls.clone(),
    };
    let app = Router::new()
        .route("/encrypt", post(encryptor_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/encrypt", addr), calls)
}

/// Start the gateway pointed at the given upstream and encryption endpoint.
///
/// Returns the address the gateway is serving on.
pub async fn start_gateway(upstream: SocketAddr, encryption_service_url: String) -> SocketAddr {
    let config = GatewayConfig {
        listener: ListenerConfig::default(),
        target_server_url: format!("http://{}", upstream),
        encryption_service_url,
        timeouts: TimeoutConfig {
            request_secs: 5,
            encryption_secs: 2,
        },
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // Give the server a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(50)).await;

    addr
}

/// Non-pooled client so each test request opens a fresh connection.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
