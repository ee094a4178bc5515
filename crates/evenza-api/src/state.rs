//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use evenza_auth::jwt::decoder::JwtDecoder;
use evenza_core::config::AppConfig;
use evenza_service::announcement::AnnouncementService;
use evenza_service::auth::AuthService;
use evenza_service::event::EventService;
use evenza_service::notification::NotificationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Auth service.
    pub auth_service: Arc<AuthService>,
    /// Event service.
    pub event_service: Arc<EventService>,
    /// Announcement lifecycle service.
    pub announcement_service: Arc<AnnouncementService>,
    /// Notification service.
    pub notification_service: Arc<NotificationService>,
}
