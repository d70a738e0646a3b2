//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all forwarding handler
//! - Wire up middleware (tracing, timeout, request ID, identity transform)
//! - Bind server to listener
//! - Forward requests to the single configured upstream
//! - Relay upstream responses back to the caller verbatim

use std::str::FromStr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        uri::{Authority, InvalidUriParts, PathAndQuery, Scheme},
        StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::encrypt::{pseudonymize_identity, EncryptionClient};
use crate::lifecycle::signals::shutdown_signal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client used for upstream forwarding.
    pub client: Client<HttpConnector, Body>,
    /// Client for the external encryption service.
    pub encryptor: EncryptionClient,
    /// Scheme of the configured upstream.
    pub target_scheme: Scheme,
    /// Authority (host:port) of the configured upstream.
    pub target_authority: Authority,
}

/// Errors from assembling the server out of a validated config.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("target server URL is not a valid URI: {0}")]
    TargetUri(#[from] axum::http::uri::InvalidUri),

    #[error("target server URL has no authority: {0}")]
    TargetAuthority(String),
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, ServerError> {
        let target = Uri::from_str(&config.target_server_url)?;
        let target_authority = target
            .authority()
            .cloned()
            .ok_or_else(|| ServerError::TargetAuthority(config.target_server_url.clone()))?;
        let target_scheme = target.scheme().cloned().unwrap_or(Scheme::HTTP);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let encryptor = EncryptionClient::new(
            config.encryption_service_url.clone(),
            Duration::from_secs(config.timeouts.encryption_secs),
        );

        let state = AppState {
            client,
            encryptor,
            target_scheme,
            target_authority,
        };

        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Request flow, outermost first: request-id stamp → trace →
    /// request-id propagation → timeout → identity transform → forward.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state.clone())
            .layer(axum::middleware::from_fn_with_state(
                state,
                pseudonymize_identity,
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forwarding handler.
///
/// Rewrites the request URI to the single configured upstream (path and
/// query preserved) and relays status, headers, and body back unchanged.
async fn forward_handler(State(state): State<AppState>, request: Request) -> impl IntoResponse {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path = request.uri().path().to_string();
    let method = request.method().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Forwarding request to upstream"
    );

    let (mut parts, body) = request.into_parts();

    parts.uri = match rewrite_uri(&parts.uri, &state.target_scheme, &state.target_authority) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to rewrite upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let status = response.status();
            tracing::debug!(
                request_id = %request_id,
                status = %status,
                "Relaying upstream response"
            );
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Point the inbound URI at the configured upstream, keeping path and query.
fn rewrite_uri(
    inbound: &Uri,
    scheme: &Scheme,
    authority: &Authority,
) -> Result<Uri, InvalidUriParts> {
    let mut uri_parts = inbound.clone().into_parts();
    uri_parts.scheme = Some(scheme.clone());
    uri_parts.authority = Some(authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    Uri::from_parts(uri_parts)
}
