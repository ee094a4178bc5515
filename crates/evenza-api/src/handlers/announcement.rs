//! Announcement handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use evenza_service::announcement::service::{
    CreateAnnouncementInput, SendAnnouncementInput, UpdateAnnouncementInput,
};
use evenza_service::announcement::EventRef;

use crate::dto::request::{
    CreateAnnouncementRequest, SendAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::dto::response::{
    AnnouncementCreatedResponse, AnnouncementUpdatedResponse, ApiResponse, DeletedResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/announcements
///
/// Public: the derived listing over historical dispatches.
pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let views = state.announcement_service.list_views().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": views })))
}

/// POST /api/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<Json<ApiResponse<AnnouncementCreatedResponse>>, ApiError> {
    let created = state
        .announcement_service
        .create(
            &auth,
            CreateAnnouncementInput {
                event: EventRef {
                    id: req.event_id,
                    title: req.event_title,
                },
                title: req.title,
                message: req.message,
                status: req.status,
                scheduled_at: req.scheduled_at,
                send_now: req.send_now,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(AnnouncementCreatedResponse {
        announcement_id: created.announcement_id,
        sent: created.sent,
    })))
}

/// PUT /api/announcements/{id}
pub async fn update_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAnnouncementRequest>,
) -> Result<Json<ApiResponse<AnnouncementUpdatedResponse>>, ApiError> {
    let updated = state
        .announcement_service
        .update(
            &auth,
            id,
            UpdateAnnouncementInput {
                event_id: req.event_id,
                title: req.title,
                message: req.message,
                status: req.status,
                scheduled_at: req.scheduled_at,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(AnnouncementUpdatedResponse {
        ok: true,
        sent: updated.sent,
    })))
}

/// POST /api/announcements/send
pub async fn send_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendAnnouncementRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let report = state
        .announcement_service
        .send_direct(
            &auth,
            SendAnnouncementInput {
                event: EventRef {
                    id: req.event_id,
                    title: req.event_title,
                },
                title: req.title,
                message: req.message,
                mark_sent: req.mark_sent,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": report })))
}

/// DELETE /api/announcements
pub async fn clear_announcements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let deleted = state.announcement_service.clear_all(&auth).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { deleted })))
}
