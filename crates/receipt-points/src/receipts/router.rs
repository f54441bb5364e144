use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use super::domain::{ReceiptId, ReceiptSubmission};
use super::repository::{ReceiptRepository, RepositoryError};
use super::service::{ReceiptService, ReceiptServiceError};

pub const INVALID_RECEIPT_MESSAGE: &str = "The receipt is invalid.";
pub const RECEIPT_NOT_FOUND_MESSAGE: &str = "No receipt found for that ID.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Router builder exposing the receipt processing and lookup endpoints.
pub fn receipt_router<R>(service: ReceiptService<R>) -> Router
where
    R: ReceiptRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .route("/receipts/:id", delete(delete_handler::<R>))
        .with_state(service)
}

pub(crate) async fn process_handler<R>(
    State(service): State<ReceiptService<R>>,
    payload: Result<Json<ReceiptSubmission>, JsonRejection>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "rejected undecodable receipt payload");
            let payload = json!({ "error": INVALID_RECEIPT_MESSAGE });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match service.process(submission) {
        Ok(receipt) => {
            let body = IdResponse {
                id: receipt.id.0,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(ReceiptServiceError::Validation(errors)) => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<ReceiptService<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    let id = ReceiptId(id);
    match service.points(&id) {
        Ok(points) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        Err(ReceiptServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<ReceiptService<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    let id = ReceiptId(id);
    match service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ReceiptServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

fn not_found(id: &ReceiptId) -> Response {
    warn!(receipt_id = %id, "receipt lookup missed");
    let payload = json!({ "error": RECEIPT_NOT_FOUND_MESSAGE });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn internal_error(err: ReceiptServiceError) -> Response {
    error!(error = %err, "receipt request failed");
    let payload = json!({ "error": INTERNAL_ERROR_MESSAGE });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
