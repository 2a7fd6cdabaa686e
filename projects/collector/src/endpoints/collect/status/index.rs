use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::collector::jobs::JobRegistry;

/// Axum handler: GET /fetch-data/jobs/{id}
pub async fn handler(
    Extension(jobs): Extension<Arc<JobRegistry>>,
    Path(job_id): Path<Uuid>,
) -> impl IntoResponse {
    match jobs.status(job_id) {
        Some(status) => (StatusCode::OK, Json(status)).into_response(),
        None => (StatusCode::NOT_FOUND, format!("Job {job_id} not found")).into_response(),
    }
}
