use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;

use super::directory::UserDirectory;
use super::domain::{CreateRequestInput, RequestId, RequestQuery, TransitionInput};
use super::repository::RequestRepository;
use super::service::{RequestServiceError, VacationRequestService};

/// Router builder exposing the HTTP surface of the lifecycle service.
pub fn request_router<D, R>(service: Arc<VacationRequestService<D, R>>) -> Router
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    Router::new()
        .route(
            "/requests",
            post(create_handler::<D, R>).get(list_handler::<D, R>),
        )
        .route(
            "/requests/handle-request",
            post(transition_handler::<D, R>),
        )
        .route("/requests/:request_id", delete(delete_handler::<D, R>))
        .route("/users/requesters", get(requesters_handler::<D, R>))
        .with_state(service)
}

pub(crate) async fn create_handler<D, R>(
    State(service): State<Arc<VacationRequestService<D, R>>>,
    axum::Json(input): axum::Json<CreateRequestInput>,
) -> Response
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    match service.create(input) {
        Ok(request) => {
            let payload = json!({
                "success": true,
                "data": request,
                "message": "Vacation request created successfully",
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response("Failed to create vacation request", error),
    }
}

pub(crate) async fn list_handler<D, R>(
    State(service): State<Arc<VacationRequestService<D, R>>>,
    Query(query): Query<RequestQuery>,
) -> Response
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    match service.list(query) {
        Ok(requests) => {
            let payload = json!({
                "success": true,
                "data": requests,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response("Failed to retrieve vacation requests", error),
    }
}

pub(crate) async fn transition_handler<D, R>(
    State(service): State<Arc<VacationRequestService<D, R>>>,
    axum::Json(input): axum::Json<TransitionInput>,
) -> Response
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    match service.transition(input) {
        Ok(request) => {
            let payload = json!({
                "success": true,
                "data": request,
                "message": "Vacation request updated successfully",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response("Failed to update vacation request", error),
    }
}

pub(crate) async fn delete_handler<D, R>(
    State(service): State<Arc<VacationRequestService<D, R>>>,
    Path(request_id): Path<String>,
) -> Response
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    match service.delete(&RequestId(request_id)) {
        Ok(true) => {
            let payload = json!({
                "success": true,
                "message": "Vacation request deleted successfully",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(false) => error_response(
            "Failed to delete vacation request",
            RequestServiceError::RequestNotFound,
        ),
        Err(error) => error_response("Failed to delete vacation request", error),
    }
}

pub(crate) async fn requesters_handler<D, R>(
    State(service): State<Arc<VacationRequestService<D, R>>>,
) -> Response
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    match service.requesters() {
        Ok(users) => {
            let payload = json!({
                "success": true,
                "data": users,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response("Failed to fetch requesters", error),
    }
}

/// Map the service error kind to a transport status and wrap the message in
/// the response envelope with the failed operation as prefix.
fn error_response(prefix: &str, error: RequestServiceError) -> Response {
    let status = match &error {
        RequestServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        RequestServiceError::UserNotFound | RequestServiceError::RequestNotFound => {
            StatusCode::NOT_FOUND
        }
        RequestServiceError::DuplicateRequest => StatusCode::CONFLICT,
        RequestServiceError::Directory(_) | RequestServiceError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "success": false,
        "error": format!("{prefix} - {error}"),
    });
    (status, axum::Json(payload)).into_response()
}
