//! API Gateway Library
//!
//! HTTP surface of the identity service: routes, the header authentication
//! gate and OpenAPI docs. The identity service runs in-process.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use user_service_lib::{build_user_service, init_storage};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = init_storage(&config.identity).await?;
    let user_service = build_user_service(storage.repository);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = AppState::new(user_service, storage.database, config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
