use std::sync::Arc;

use axum::{Router, body::Bytes, routing::get};

use crate::error::LensError;
use crate::handlers::summary::{healthz_handler, summary_handler, view_handler};
use crate::report::Report;

/// Shared, read-only state: the report is computed once before serving and
/// `/api/summary` is rendered once with it.
#[derive(Clone)]
pub struct LensState {
    pub report: Arc<Report>,
    pub summary_json: Bytes,
}

impl LensState {
    pub fn new(report: Report) -> Result<Self, LensError> {
        let summary_json = Bytes::from(serde_json::to_vec(&report)?);
        Ok(Self {
            report: Arc::new(report),
            summary_json,
        })
    }
}

pub fn lens_router(state: LensState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/views/{view}", get(view_handler))
        .with_state(state)
}
