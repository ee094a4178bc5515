//! Registration repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use evenza_core::error::{AppError, ErrorKind};
use evenza_core::result::AppResult;
use evenza_entity::registration::{Registration, RegistrationStatus};

/// Repository for event registrations and recipient resolution.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a user for an event. Returns `None` when the user is
    /// already registered.
    pub async fn create(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: RegistrationStatus,
    ) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (event_id, user_id, status) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (event_id, user_id) DO NOTHING \
             RETURNING *",
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create registration", e))
    }

    /// Remove a user's registration. Returns whether a row was removed.
    pub async fn delete(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM registrations WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete registration", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve the recipient set for an event: the distinct users with any
    /// registration row, regardless of status. Recomputed per dispatch;
    /// never cached.
    pub async fn recipient_ids(&self, event_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT user_id FROM registrations WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve recipients", e))
    }
}
