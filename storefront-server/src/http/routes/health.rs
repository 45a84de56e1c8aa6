//! Liveness probe
//!
//! Answers without touching the product store, so a slow or unreachable
//! database never fails the probe.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Name reported by `/health`
pub const SERVICE_NAME: &str = "storefront";

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        service: SERVICE_NAME,
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /health`, mountable on any router state
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(liveness))
}
