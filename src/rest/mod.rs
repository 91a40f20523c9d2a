// rest/mod.rs — Public REST API server.
//
// Axum HTTP server bridging HTTP verbs to task operations.
//
// Endpoints:
//   GET    /api/v1/tasks
//   POST   /api/v1/tasks
//   GET    /api/v1/tasks/{id}
//   PUT    /api/v1/tasks/{id}
//   PATCH  /api/v1/tasks/{id}/toggle
//   DELETE /api/v1/tasks/{id}
//   GET    /api/v1/health

pub mod routes;

use anyhow::Result;
use axum::{
    body::Bytes,
    http::{header, Response, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use http_body_util::Full;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health
        .route("/api/v1/health", get(routes::health::health))
        // Tasks
        .route(
            "/api/v1/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/v1/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/api/v1/tasks/{id}/toggle", patch(routes::tasks::toggle_task))
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(ctx)
}

/// Catch-all for any path/method not in the table above.
async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}

/// Last-resort conversion of a panicking handler into a 500 response, so a
/// single bad request cannot take the connection down without a reply.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(err = %detail, "request handler panicked");

    let body = json!({ "message": "Something went wrong!", "error": detail }).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("static 500 response")
}
