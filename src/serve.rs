//! HTTP serving of the running order.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::jsend::{self, Jsend};

#[derive(Clone)]
struct ServeConfig {
    url: String,
    year: i32,
}

/// Serve `GET /runningorder.json`, fetching and extracting the running order
/// on every request. With `cors`, answers carry a permissive
/// `Access-Control-Allow-Origin` header.
pub async fn serve(listen: SocketAddr, url: String, year: i32, cors: bool) -> Result<()> {
    let config = Arc::new(ServeConfig { url, year });

    let mut app = Router::new()
        .route("/runningorder.json", get(running_order))
        .with_state(config);

    if cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("listening on http://{}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn running_order(State(config): State<Arc<ServeConfig>>) -> (StatusCode, Json<Jsend>) {
    let (status, body) = jsend::running_order_response(&config.url, config.year).await;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body))
}
