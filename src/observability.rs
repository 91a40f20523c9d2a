// SPDX-License-Identifier: MIT
//! Observability utilities — health check payload.

/// Health check status.
#[derive(Debug, serde::Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub db_ok: bool,
}

impl HealthStatus {
    pub fn ok(uptime_secs: u64, db_ok: bool) -> Self {
        Self {
            status: if db_ok { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs,
            db_ok,
        }
    }
}
