pub mod config;
pub mod observability;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::ServerConfig;
use storage::Storage;
use tasks::TaskService;

/// Shared application state passed to every request handler.
///
/// The storage handle is injected here once at startup instead of living in
/// module-level state; handlers receive the context through axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub storage: Arc<Storage>,
    /// Task domain operations — validation, normalization, persistence.
    pub tasks: TaskService,
    pub started_at: std::time::Instant,
}
