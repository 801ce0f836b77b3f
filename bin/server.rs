// Zengin Validator - Web Server
// REST API with Axum: upload a file body, get the validation report back

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use zengin_validator::{AppConfig, ValidationEngine, ValidationReport};

#[derive(Debug, Parser)]
#[command(
    name = "zengin-server",
    version,
    about = "HTTP API for validating Zengin batch files"
)]
struct ServerArgs {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    engine: Arc<ValidationEngine>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/validate - Validate the raw file text in the request body
async fn validate_file(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let content = match std::str::from_utf8(&body) {
        Ok(content) => content,
        Err(e) => {
            warn!("Rejected non-UTF-8 upload: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ValidationReport>::err(
                    "file content must be UTF-8 text",
                )),
            )
                .into_response();
        }
    };

    let report = state.engine.validate(content);
    info!(
        bytes = body.len(),
        valid = report.valid,
        diagnostics = report.diagnostics.len(),
        "validated upload"
    );

    (StatusCode::OK, Json(ApiResponse::ok(report))).into_response()
}

fn build_router(config: &AppConfig) -> Router {
    let state = AppState {
        engine: Arc::new(ValidationEngine::with_config(config.validator.clone())),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/validate", post(validate_file))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(config.max_input_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Main Server
// ============================================================================

fn init_logging() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("zengin_server=info,zengin_validator=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_logging();

    let config = AppConfig::load(args.config.as_deref())?;

    let app = build_router(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API: POST http://{}/api/validate", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const VALID_FILE: &str = "1,21,0,1234567890,ACME,0601,0036,MIZUHO,001,HONTEN,1,1234567,\n\
                              2,0001,MIZUHO,001,HONTEN,,1,7654321,YAMADA,1000,1,,,,\n\
                              8,1,1000,\n\
                              9,\n";

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_validate(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/validate")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(&AppConfig::default());
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], "OK");
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let app = build_router(&AppConfig::default());
        let response = app.oneshot(post_validate(VALID_FILE)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["valid"], true);
        assert_eq!(json["data"]["summary"]["total_data_amount"], 1000);
    }

    #[tokio::test]
    async fn test_validate_reports_diagnostics() {
        let app = build_router(&AppConfig::default());
        let response = app.oneshot(post_validate("5,x")).await.unwrap();

        let json = body_json(response).await;
        assert_eq!(json["data"]["valid"], false);
        assert_eq!(json["data"]["diagnostics"][1]["message"], "invalid record kind: 5");
    }

    #[tokio::test]
    async fn test_validate_rejects_non_utf8() {
        let app = build_router(&AppConfig::default());
        let response = app
            .oneshot(post_validate(vec![0x82u8, 0xa0]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = AppConfig {
            max_input_bytes: 16,
            ..AppConfig::default()
        };
        let app = build_router(&config);
        let response = app.oneshot(post_validate(VALID_FILE)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_server_args() {
        let args = ServerArgs::try_parse_from(["zengin-server", "--config", "server.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("server.json")));

        let args = ServerArgs::try_parse_from(["zengin-server"]).unwrap();
        assert_eq!(args.config, None);

        // A bare path is not taken as the config file
        assert!(ServerArgs::try_parse_from(["zengin-server", "server.json"]).is_err());
    }
}
