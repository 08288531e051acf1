use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::report::ViewName;
use crate::{LensError, router::LensState};

/// GET /api/summary -> every view with its caption.
pub async fn summary_handler(State(state): State<LensState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.summary_json.clone(),
    )
}

/// GET /api/views/{view} -> rows, title and caption of one view.
pub async fn view_handler(
    State(state): State<LensState>,
    Path(view): Path<String>,
) -> Result<Json<Value>, LensError> {
    let view: ViewName = view.parse()?;
    Ok(Json(state.report.view(view)?))
}

pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
