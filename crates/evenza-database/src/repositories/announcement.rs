//! Announcement repository implementation.
//!
//! Owns the lifecycle-sensitive statements: guarded promotion to `Sent`
//! with its delivery rows in one transaction, due-item selection for the
//! sweep, and the legacy-notification materialization path.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use evenza_core::error::{AppError, ErrorKind};
use evenza_core::result::AppResult;
use evenza_entity::announcement::model::{CreateAnnouncement, UpdateAnnouncement};
use evenza_entity::announcement::{Announcement, AnnouncementStatus};
use evenza_entity::notification::model::NewNotification;
use evenza_entity::notification::Notification;

/// Result of resolving an announcement id that may refer to a legacy
/// notification row instead of an announcement.
#[derive(Debug, Clone)]
pub enum AnnouncementLookup {
    /// The id matched an announcement row.
    Found(Announcement),
    /// No announcement row existed, but the id matched a notification;
    /// an announcement was materialized from it under the same id.
    Materialized(Announcement),
    /// The id matched neither table.
    NotFound,
}

/// Repository for announcement lifecycle operations.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    /// Create a new announcement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an announcement.
    pub async fn create(&self, announcement: &CreateAnnouncement) -> AppResult<Announcement> {
        sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (event_id, title, message, status, scheduled_at, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(announcement.event_id)
        .bind(&announcement.title)
        .bind(&announcement.message)
        .bind(announcement.status)
        .bind(announcement.scheduled_at)
        .bind(announcement.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create announcement", e))
    }

    /// Find an announcement by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>> {
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find announcement", e)
            })
    }

    /// Resolve an id against the announcements table, falling back to the
    /// one-time upgrade path: an id that matches a legacy notification row
    /// materializes a new announcement seeded from that notification's
    /// fields, under the same id.
    pub async fn find_or_materialize(&self, id: Uuid) -> AppResult<AnnouncementLookup> {
        if let Some(found) = self.find_by_id(id).await? {
            return Ok(AnnouncementLookup::Found(found));
        }

        let legacy = sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find legacy notification", e)
            })?;

        let Some(legacy) = legacy else {
            return Ok(AnnouncementLookup::NotFound);
        };

        let seeded = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements \
             (id, event_id, title, message, status, scheduled_at, created_by, created_at, sent_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(legacy.id)
        .bind(legacy.event_id)
        .bind(&legacy.title)
        .bind(&legacy.message)
        .bind(legacy.status.lifecycle_status())
        .bind(legacy.scheduled_at)
        .bind(legacy.created_by)
        .bind(legacy.created_at)
        .bind(legacy.sent_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to materialize announcement from notification",
                e,
            )
        })?;

        Ok(AnnouncementLookup::Materialized(seeded))
    }

    /// Apply a partial update. Returns `None` when the announcement does
    /// not exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: &UpdateAnnouncement,
    ) -> AppResult<Option<Announcement>> {
        sqlx::query_as::<_, Announcement>(
            "UPDATE announcements SET \
                event_id = COALESCE($2, event_id), \
                title = COALESCE($3, title), \
                message = COALESCE($4, message), \
                status = COALESCE($5, status), \
                scheduled_at = COALESCE($6, scheduled_at), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.event_id)
        .bind(&update.title)
        .bind(&update.message)
        .bind(update.status)
        .bind(update.scheduled_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update announcement", e))
    }

    /// Select all scheduled announcements whose dispatch time has elapsed.
    pub async fn find_due(&self, now: DateTime<Utc>) -> AppResult<Vec<Announcement>> {
        sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements \
             WHERE status = $1 AND scheduled_at IS NOT NULL AND scheduled_at <= $2 \
             ORDER BY scheduled_at",
        )
        .bind(AnnouncementStatus::Scheduled)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to select due announcements", e)
        })
    }

    /// Promote an announcement to `Sent` and insert its delivery rows in a
    /// single transaction.
    ///
    /// The promotion is guarded: if the row is already `Sent` (a
    /// concurrent update or sweep won the race) nothing is inserted and
    /// `None` is returned. On success, returns the number of delivery rows
    /// created.
    pub async fn dispatch(
        &self,
        id: Uuid,
        rows: &[NewNotification],
        sent_at: DateTime<Utc>,
    ) -> AppResult<Option<u64>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin dispatch transaction", e)
        })?;

        let promoted = sqlx::query_scalar::<_, Uuid>(
            "UPDATE announcements \
             SET status = $2, sent_at = $3, updated_at = NOW() \
             WHERE id = $1 AND status <> $2 \
             RETURNING id",
        )
        .bind(id)
        .bind(AnnouncementStatus::Sent)
        .bind(sent_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to promote announcement", e)
        })?;

        if promoted.is_none() {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back dispatch", e)
            })?;
            return Ok(None);
        }

        for row in rows {
            sqlx::query(
                "INSERT INTO notifications \
                 (user_id, event_id, channel, title, message, status, is_read, scheduled_at, created_by, attempts, sent_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8, 0, $9)",
            )
            .bind(row.user_id)
            .bind(row.event_id)
            .bind(&row.channel)
            .bind(&row.title)
            .bind(&row.message)
            .bind(row.status)
            .bind(row.scheduled_at)
            .bind(row.created_by)
            .bind(row.sent_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert delivery row", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit dispatch", e)
        })?;

        Ok(Some(rows.len() as u64))
    }

    /// Remove every announcement row and every in-app delivery row in one
    /// transaction. Returns the total number of rows removed.
    pub async fn clear_all(&self) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin clear transaction", e)
        })?;

        let announcements = sqlx::query("DELETE FROM announcements")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear announcements", e)
            })?
            .rows_affected();

        let notifications = sqlx::query("DELETE FROM notifications WHERE channel = 'in-app'")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear notifications", e)
            })?
            .rows_affected();

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit clear", e)
        })?;

        Ok(announcements + notifications)
    }
}
