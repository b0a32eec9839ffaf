use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::inline::registry::CallbackRegistry;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` while the process serves requests.
    pub status: String,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
    /// Crate version.
    pub version: String,
    /// Pending entries and default lifetime.
    pub callbacks: CallbackHealth,
    /// Seconds since the health service started.
    pub uptime_seconds: u64,
}

/// Registry figures reported by the health check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallbackHealth {
    /// Entries waiting for a click or for the sweeper.
    pub pending: usize,
    /// Default registry entry lifetime.
    pub default_ttl_seconds: i64,
}

/// Shared state of the health routes.
#[derive(Clone)]
pub struct AppState {
    /// Registry the health check reports on.
    pub registry: Arc<CallbackRegistry>,
    /// Start of the uptime count.
    pub start_time: DateTime<Utc>,
}

/// Health server routes, ready for `axum::serve`.
pub struct HealthService {
    /// The `/health` routes.
    pub router: Router,
}

impl HealthService {
    /// Build the routes over `registry`.
    pub fn new(registry: Arc<CallbackRegistry>) -> Self {
        let state = AppState {
            registry,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        callbacks: CallbackHealth {
            pending: state.registry.len(),
            default_ttl_seconds: state.registry.default_ttl().num_seconds(),
        },
        uptime_seconds: uptime,
    })
}

async fn liveness_check() -> Json<&'static str> {
    // Simple liveness check - if this endpoint responds, the service is alive
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::continuation::ActionCall;
    use crate::inline::registry::Registration;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_endpoint_reports_pending_callbacks() {
        let registry = Arc::new(CallbackRegistry::default());
        registry.register(Registration::new("confirm", ActionCall::new("confirm")));
        registry.register(Registration::new("cancel", ActionCall::new("cancel")));

        let health_service = HealthService::new(registry);
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.callbacks.pending, 2);
        assert_eq!(health_response.callbacks.default_ttl_seconds, 20 * 60);
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let health_service = HealthService::new(Arc::new(CallbackRegistry::default()));
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
