use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::system::users::{Actor, ActorDto};
use contracts::usecases::common::BulkOperationResult;
use contracts::usecases::u101_sale_transition::TransitionRequest;
use contracts::usecases::u102_bulk_status_update::BulkStatusUpdateRequest;
use contracts::usecases::u103_bulk_delete::{BulkDeleteRequest, DeleteSaleRequest};
use contracts::workflow::{TransitionError, TransitionEvent};
use serde_json::json;

use crate::workflow;

/// POST /api/product_sales/:id/transition
pub async fn transition(
    Path(id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<TransitionEvent>, (StatusCode, Json<serde_json::Value>)> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| bad_request(format!("Invalid sale id: {}", id)))?;
    let actor = resolve_actor(req.actor)?;

    workflow::engine()
        .transition(uuid, req.new_status, req.reason, &actor)
        .await
        .map(Json)
        .map_err(transition_error_response)
}

/// DELETE /api/product_sales/:id
///
/// Удаление гейтится так же, как массовое: обойти ролевую матрицу
/// поштучным удалением нельзя.
pub async fn delete_sale(
    Path(id): Path<String>,
    body: Option<Json<DeleteSaleRequest>>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| bad_request(format!("Invalid sale id: {}", id)))?;
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let actor = resolve_actor(req.actor)?;

    workflow::coordinator()
        .delete_sale(uuid, req.reason.as_deref(), &actor)
        .await
        .map(|_| StatusCode::OK)
        .map_err(transition_error_response)
}

/// POST /api/product_sales/bulk-status
pub async fn bulk_status_update(
    Json(req): Json<BulkStatusUpdateRequest>,
) -> Result<Json<BulkOperationResult>, (StatusCode, Json<serde_json::Value>)> {
    let actor = resolve_actor(req.actor)?;
    let result = workflow::coordinator()
        .bulk_transition(&req.sale_ids, req.new_status, req.reason, &actor)
        .await;
    Ok(Json(result))
}

/// POST /api/product_sales/bulk-delete
pub async fn bulk_delete(
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<BulkOperationResult>, (StatusCode, Json<serde_json::Value>)> {
    let actor = resolve_actor(req.actor)?;
    let result = workflow::coordinator()
        .bulk_delete(&req.sale_ids, req.reason, &actor)
        .await;
    Ok(Json(result))
}

/// Инициатор из запроса; без него запрос считается системным
fn resolve_actor(
    dto: Option<ActorDto>,
) -> Result<Actor, (StatusCode, Json<serde_json::Value>)> {
    match dto {
        Some(dto) => dto.into_actor().map_err(bad_request),
        None => Ok(Actor::system()),
    }
}

fn bad_request(message: String) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "BadRequest", "message": message})),
    )
}

fn transition_error_response(err: TransitionError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        TransitionError::NoOp { .. } | TransitionError::Invalid { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TransitionError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
        TransitionError::GateUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        TransitionError::ConcurrentModification => StatusCode::CONFLICT,
        TransitionError::SaleNotFound { .. } => StatusCode::NOT_FOUND,
        TransitionError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(json!({"error": err.kind(), "message": err.to_string()})),
    )
}
