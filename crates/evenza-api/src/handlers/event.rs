//! Event handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use evenza_core::error::AppError;
use evenza_entity::event::model::UpdateEvent;
use evenza_service::event::service::CreateEventInput;

use crate::dto::request::{CreateEventRequest, RegisterRequest, UpdateEventRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .event_service
        .list(params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let event = state
        .event_service
        .create(
            &auth,
            CreateEventInput {
                title: req.title,
                description: req.description,
                location: req.location,
                starts_at: req.starts_at,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": event })))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let event = state.event_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": event })))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let event = state
        .event_service
        .update(
            &auth,
            id,
            UpdateEvent {
                title: req.title,
                description: req.description,
                location: req.location,
                starts_at: req.starts_at,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": event })))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Event deleted".to_string(),
    })))
}

/// POST /api/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    req: Option<Json<RegisterRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let waitlisted = req.map(|Json(r)| r.waitlisted).unwrap_or(false);
    let registration = state.event_service.register(&auth, id, waitlisted).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": registration }),
    ))
}

/// DELETE /api/events/{id}/register
pub async fn unregister(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.unregister(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Registration removed".to_string(),
    })))
}
