use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{
    submission::{
        models::NewSubmission,
        queries::{insert_submission, InsertSubmissionError},
    },
    PgPool,
};

/// JSON payload expected by the endpoint.
#[derive(Debug, Deserialize)]
pub struct StoreDataRequestBody {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("MalformedBody: {source}")]
    MalformedBody {
        source: JsonRejection,
    },

    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error("InsertSubmission: {source}")]
    InsertSubmission {
        #[from]
        source: InsertSubmissionError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::MalformedBody { source } => {
                (StatusCode::BAD_REQUEST, source.body_text()).into_response()
            }
            HandlerError::GetConnectionFromPool { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::InsertSubmission { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
        }
    }
}

/// Axum handler: POST /store-data
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    body: Result<Json<StoreDataRequestBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match body {
        Ok(json) => json,
        Err(source) => return HandlerError::MalformedBody { source }.into_response(),
    };

    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(source) => return HandlerError::GetConnectionFromPool { source }.into_response(),
    };

    let new = NewSubmission {
        id: Uuid::new_v4(),
        title: input.title,
        content: input.content,
        tags: input.tags,
    };

    match insert_submission(&mut conn, new) {
        Ok(_) => (StatusCode::OK, "Data stored successfully").into_response(),
        Err(source) => HandlerError::InsertSubmission { source }.into_response(),
    }
}
