//! Notification service.

use std::sync::Arc;

use uuid::Uuid;

use evenza_core::error::AppError;
use evenza_core::result::AppResult;
use evenza_core::types::pagination::{PageRequest, PageResponse};
use evenza_database::repositories::notification::NotificationRepository;
use evenza_entity::notification::Notification;

use crate::context::RequestContext;

/// Manages a user's notification inbox.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.notification_repo.find_by_user(ctx.user_id, &page).await
    }

    /// Counts the caller's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notification_repo.count_unread(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// Only the owning recipient may mark a row; marking an already-read
    /// notification is a no-op that still succeeds.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let notification = self
            .notification_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if notification.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Notification belongs to another user",
            ));
        }

        if notification.is_read {
            return Ok(());
        }

        self.notification_repo.mark_read(id).await
    }

    /// Marks all of the caller's notifications as read. Returns the
    /// number of rows changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notification_repo.mark_all_read(ctx.user_id).await
    }
}
