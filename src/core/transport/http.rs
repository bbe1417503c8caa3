//! HTTP transport implementation.
//!
//! Every resource of the device tree is served under its own path. Reads are
//! plain `GET` (or `HEAD`) requests; anything else is answered with `405`.

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::service::RunningTransport;
use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::DeviceServer;
use crate::domains::directory::{DISCOVERY_PATH, LINK_FORMAT_MEDIA_TYPE};
use crate::domains::resources::ResourceError;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the listener and serve in a background task.
    pub async fn start(self, server: DeviceServer) -> TransportResult<RunningTransport> {
        let addr = self.address();
        let app = router(server, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;
        let local_addr = listener.local_addr()?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", local_addr, cors_status);
        info!("  → Discovery: GET {}", DISCOVERY_PATH);
        info!("  → Health:    GET /health");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .map_err(|e| TransportError::http(e.to_string()))
        });

        Ok(RunningTransport::new(local_addr, handle))
    }
}

/// Build the router serving `server`'s resources.
pub fn router(server: DeviceServer, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route(DISCOVERY_PATH, get(core_listing))
        .route("/health", get(health_check))
        .fallback(handle_resource)
        .with_state(server)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// The device's link-format resource listing.
async fn core_listing(State(server): State<DeviceServer>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, LINK_FORMAT_MEDIA_TYPE)],
        server.core_listing(),
    )
}

/// Health check endpoint.
async fn health_check(State(server): State<DeviceServer>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "name": server.name(),
        "version": server.version(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Resolve the request path in the resource tree and read it.
#[instrument(skip_all, fields(method = %method, path = %uri.path()))]
async fn handle_resource(
    State(server): State<DeviceServer>,
    method: Method,
    uri: Uri,
) -> Response {
    let path = uri.path();

    if method != Method::GET && method != Method::HEAD {
        if let Err(e) = server.tree().resolve_path(path) {
            return error_response(e);
        }
        debug!("Rejecting {} on {}", method, path);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
            format!("Method {} not allowed on {}", method, path),
        )
            .into_response();
    }

    match server.read(path) {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, payload.media_type())],
            payload.content,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Map a read error to a protocol-level response.
fn error_response(error: ResourceError) -> Response {
    let status = match &error {
        ResourceError::PathNotFound(_) => StatusCode::NOT_FOUND,
        ResourceError::UnsupportedOperation(_) => StatusCode::METHOD_NOT_ALLOWED,
        ResourceError::DuplicateSegment { .. } | ResourceError::InvalidSegment(_) => {
            warn!("Configuration error surfaced at request time: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, error.to_string()).into_response()
}
