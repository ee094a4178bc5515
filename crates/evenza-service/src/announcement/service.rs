//! Announcement lifecycle service.
//!
//! Owns the draft → scheduled → sent state machine, fan-out to
//! per-recipient delivery rows, and the due-announcement sweep invoked by
//! the background worker.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use evenza_core::error::AppError;
use evenza_core::result::AppResult;
use evenza_database::repositories::announcement::{AnnouncementLookup, AnnouncementRepository};
use evenza_database::repositories::event::EventRepository;
use evenza_database::repositories::notification::NotificationRepository;
use evenza_database::repositories::registration::RegistrationRepository;
use evenza_entity::announcement::model::{CreateAnnouncement, UpdateAnnouncement};
use evenza_entity::announcement::{Announcement, AnnouncementStatus, AnnouncementView};

use crate::context::RequestContext;

use super::dispatch::{DispatchReport, build_deliveries};
use super::resolve::{EventRef, resolve_event};
use super::view::derive_views;

/// Input for creating an announcement. Status and schedule arrive as raw
/// strings so that normalization and validation happen here, before any
/// row is written.
#[derive(Debug, Clone, Default)]
pub struct CreateAnnouncementInput {
    /// Target event reference.
    pub event: EventRef,
    /// Announcement title.
    pub title: String,
    /// Announcement body text.
    pub message: String,
    /// Requested status label (`"draft"`, `"Scheduled"`, ...); absent
    /// means draft.
    pub status: Option<String>,
    /// Requested dispatch instant, RFC 3339.
    pub scheduled_at: Option<String>,
    /// Dispatch immediately regardless of the status label.
    pub send_now: bool,
}

/// Input for partially updating an announcement.
#[derive(Debug, Clone, Default)]
pub struct UpdateAnnouncementInput {
    /// New target event.
    pub event_id: Option<Uuid>,
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub message: Option<String>,
    /// New status label.
    pub status: Option<String>,
    /// New dispatch instant, RFC 3339.
    pub scheduled_at: Option<String>,
}

/// Input for dispatching a message without a pre-existing announcement.
#[derive(Debug, Clone, Default)]
pub struct SendAnnouncementInput {
    /// Target event reference.
    pub event: EventRef,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Insert rows as `sent` (true) or leave them `pending` (false).
    pub mark_sent: bool,
}

/// Result of creating an announcement.
#[derive(Debug, Clone)]
pub struct AnnouncementCreated {
    /// The new announcement's id.
    pub announcement_id: Uuid,
    /// Delivery report when the creation dispatched immediately.
    pub sent: Option<DispatchReport>,
}

/// Result of updating an announcement.
#[derive(Debug, Clone)]
pub struct AnnouncementUpdated {
    /// The announcement after the update.
    pub announcement: Announcement,
    /// Delivery report when the update triggered fan-out.
    pub sent: Option<DispatchReport>,
}

/// Tally of one sweep tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOutcome {
    /// Due announcements selected.
    pub due: u64,
    /// Announcements promoted to sent.
    pub promoted: u64,
    /// Delivery rows inserted across all promotions.
    pub delivered: u64,
    /// Announcements whose dispatch failed; they stay scheduled and are
    /// retried on the next tick.
    pub failed: u64,
}

/// Manages the announcement lifecycle and its fan-out.
#[derive(Debug, Clone)]
pub struct AnnouncementService {
    announcement_repo: Arc<AnnouncementRepository>,
    notification_repo: Arc<NotificationRepository>,
    event_repo: Arc<EventRepository>,
    registration_repo: Arc<RegistrationRepository>,
}

impl AnnouncementService {
    /// Creates a new announcement service.
    pub fn new(
        announcement_repo: Arc<AnnouncementRepository>,
        notification_repo: Arc<NotificationRepository>,
        event_repo: Arc<EventRepository>,
        registration_repo: Arc<RegistrationRepository>,
    ) -> Self {
        Self {
            announcement_repo,
            notification_repo,
            event_repo,
            registration_repo,
        }
    }

    /// Creates an announcement. An effective status of sent (explicit
    /// label or the send-now flag) resolves recipients and fans out
    /// synchronously before returning.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateAnnouncementInput,
    ) -> AppResult<AnnouncementCreated> {
        require_organizer(ctx)?;
        require_text("title", &input.title)?;
        require_text("message", &input.message)?;

        let mut status = parse_status_label(input.status.as_deref())?;
        if input.send_now {
            status = AnnouncementStatus::Sent;
        }

        let scheduled_at = parse_schedule(input.scheduled_at.as_deref())?;
        if status == AnnouncementStatus::Scheduled && scheduled_at.is_none() {
            return Err(AppError::validation(
                "scheduled_at is required for a scheduled announcement",
            ));
        }

        let event_id = resolve_event(&self.event_repo, &input.event).await?;

        // A sent announcement is inserted as a draft and promoted inside
        // the dispatch transaction, so the status flip and its delivery
        // rows commit together.
        let stored_status = if status == AnnouncementStatus::Sent {
            AnnouncementStatus::Draft
        } else {
            status
        };

        let announcement = self
            .announcement_repo
            .create(&CreateAnnouncement {
                event_id,
                title: input.title.clone(),
                message: input.message.clone(),
                status: stored_status,
                scheduled_at,
                created_by: Some(ctx.user_id),
            })
            .await?;

        let sent = if status == AnnouncementStatus::Sent {
            Some(self.dispatch_announcement(&announcement).await?)
        } else {
            None
        };

        Ok(AnnouncementCreated {
            announcement_id: announcement.id,
            sent,
        })
    }

    /// Applies a partial update. An id that matches no announcement but
    /// matches a legacy notification materializes an announcement from it
    /// first. A resulting transition into sent fans out exactly once.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateAnnouncementInput,
    ) -> AppResult<AnnouncementUpdated> {
        require_organizer(ctx)?;

        let current = match self.announcement_repo.find_or_materialize(id).await? {
            AnnouncementLookup::Found(a) => a,
            AnnouncementLookup::Materialized(a) => {
                info!(announcement_id = %a.id, "Materialized announcement from legacy notification");
                a
            }
            AnnouncementLookup::NotFound => {
                return Err(AppError::not_found("Announcement not found"));
            }
        };

        if current
            .created_by
            .is_some_and(|creator| creator != ctx.user_id)
        {
            return Err(AppError::authorization(
                "Announcement belongs to another organizer",
            ));
        }

        let new_status = match input.status.as_deref() {
            Some(label) => Some(
                AnnouncementStatus::parse_label(label).ok_or_else(|| {
                    AppError::validation(format!("Unknown announcement status: '{label}'"))
                })?,
            ),
            None => None,
        };

        if let Some(to) = new_status {
            if !current.status.can_transition(to) {
                return Err(AppError::validation(
                    "A sent announcement cannot return to an earlier status",
                ));
            }
        }

        if let Some(event_id) = input.event_id {
            if self.event_repo.find_by_id(event_id).await?.is_none() {
                return Err(AppError::not_found("Event not found"));
            }
        }

        let scheduled_at = parse_schedule(input.scheduled_at.as_deref())?;
        let resulting_status = new_status.unwrap_or(current.status);
        let resulting_schedule = scheduled_at.or(current.scheduled_at);
        if resulting_status == AnnouncementStatus::Scheduled && resulting_schedule.is_none() {
            return Err(AppError::validation(
                "scheduled_at is required for a scheduled announcement",
            ));
        }

        let transitioning =
            resulting_status == AnnouncementStatus::Sent && !current.status.is_terminal();

        // When transitioning, the status column is flipped by the guarded
        // dispatch transaction rather than this update.
        let patch = UpdateAnnouncement {
            event_id: input.event_id,
            title: input.title,
            message: input.message,
            status: if transitioning { None } else { new_status },
            scheduled_at,
        };

        let updated = self
            .announcement_repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement not found"))?;

        let sent = if transitioning {
            Some(self.dispatch_announcement(&updated).await?)
        } else {
            None
        };

        let announcement = match self.announcement_repo.find_by_id(id).await? {
            Some(a) => a,
            None => updated,
        };

        Ok(AnnouncementUpdated { announcement, sent })
    }

    /// Dispatches a message to an event's registrants without a
    /// pre-existing announcement row.
    pub async fn send_direct(
        &self,
        ctx: &RequestContext,
        input: SendAnnouncementInput,
    ) -> AppResult<DispatchReport> {
        require_organizer(ctx)?;
        require_text("title", &input.title)?;
        require_text("message", &input.message)?;

        let event_id = resolve_event(&self.event_repo, &input.event).await?;
        let recipients = self.recipients_for(event_id).await?;

        let now = Utc::now();
        let (status, sent_at) = if input.mark_sent {
            (AnnouncementStatus::Sent.delivery_status(), Some(now))
        } else {
            (AnnouncementStatus::Draft.delivery_status(), None)
        };

        let rows = build_deliveries(
            &recipients,
            event_id,
            &input.title,
            &input.message,
            Some(ctx.user_id),
            status,
            None,
            sent_at,
        );

        let inserted = self
            .notification_repo
            .insert_many(&rows)
            .await
            .map_err(|e| AppError::dispatch(format!("Announcement delivery failed: {e}")))?;

        Ok(DispatchReport {
            inserted,
            requested: recipients.len() as u64,
        })
    }

    /// The derived announcement listing. No authentication required.
    pub async fn list_views(&self) -> AppResult<Vec<AnnouncementView>> {
        let rows = self.notification_repo.find_in_app().await?;
        Ok(derive_views(&rows))
    }

    /// Removes every announcement and its in-app delivery rows. Returns
    /// the total number of rows removed.
    pub async fn clear_all(&self, ctx: &RequestContext) -> AppResult<u64> {
        require_organizer(ctx)?;
        self.announcement_repo.clear_all().await
    }

    /// One sweep tick: select scheduled announcements whose dispatch time
    /// has elapsed and promote each to sent.
    ///
    /// Each due announcement is processed independently — a failure is
    /// logged and the announcement stays scheduled for the next tick; it
    /// never blocks the rest of the batch.
    pub async fn sweep_due(&self, now: DateTime<Utc>) -> AppResult<SweepOutcome> {
        let due = self.announcement_repo.find_due(now).await?;
        let mut outcome = SweepOutcome {
            due: due.len() as u64,
            ..SweepOutcome::default()
        };

        for announcement in due {
            match self.dispatch_announcement(&announcement).await {
                Ok(report) => {
                    outcome.promoted += 1;
                    outcome.delivered += report.inserted;
                }
                Err(e) => {
                    error!(
                        announcement_id = %announcement.id,
                        error = %e,
                        "Failed to dispatch scheduled announcement; will retry next sweep"
                    );
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }

    /// Resolve recipients and run the guarded fan-out transaction for an
    /// announcement. A lost promotion race (the row is already sent)
    /// inserts nothing and reports zero deliveries.
    async fn dispatch_announcement(&self, announcement: &Announcement) -> AppResult<DispatchReport> {
        let recipients = self.recipients_for(announcement.event_id).await?;
        let now = Utc::now();

        let rows = build_deliveries(
            &recipients,
            announcement.event_id,
            &announcement.title,
            &announcement.message,
            announcement.created_by,
            AnnouncementStatus::Sent.delivery_status(),
            announcement.scheduled_at,
            Some(now),
        );

        let inserted = self
            .announcement_repo
            .dispatch(announcement.id, &rows, now)
            .await
            .map_err(|e| AppError::dispatch(format!("Announcement delivery failed: {e}")))?;

        Ok(DispatchReport {
            inserted: inserted.unwrap_or(0),
            requested: recipients.len() as u64,
        })
    }

    /// The recipient set: distinct registrants of the event at this
    /// moment. No event means nobody to notify.
    async fn recipients_for(&self, event_id: Option<Uuid>) -> AppResult<Vec<Uuid>> {
        match event_id {
            Some(event_id) => self.registration_repo.recipient_ids(event_id).await,
            None => Ok(Vec::new()),
        }
    }
}

fn require_organizer(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_organizer() {
        Ok(())
    } else {
        Err(AppError::authorization(
            "Only organizers may manage announcements",
        ))
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Normalize a status label. Absent or blank means draft; labels are
/// matched case-insensitively; anything else is a validation error.
fn parse_status_label(label: Option<&str>) -> AppResult<AnnouncementStatus> {
    match label {
        None => Ok(AnnouncementStatus::Draft),
        Some(s) if s.trim().is_empty() => Ok(AnnouncementStatus::Draft),
        Some(s) => AnnouncementStatus::parse_label(s)
            .ok_or_else(|| AppError::validation(format!("Unknown announcement status: '{s}'"))),
    }
}

/// Parse an RFC 3339 schedule string. Absent or blank means no schedule;
/// an unparseable value is a validation error and nothing is written.
fn parse_schedule(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| AppError::validation(format!("Invalid scheduled_at timestamp: '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evenza_core::error::ErrorKind;
    use evenza_entity::user::UserRole;

    #[test]
    fn test_parse_status_label_normalizes_case_and_absence() {
        assert_eq!(
            parse_status_label(None).unwrap(),
            AnnouncementStatus::Draft
        );
        assert_eq!(
            parse_status_label(Some("Draft")).unwrap(),
            AnnouncementStatus::Draft
        );
        assert_eq!(
            parse_status_label(Some("draft")).unwrap(),
            AnnouncementStatus::Draft
        );
        assert_eq!(
            parse_status_label(Some("SCHEDULED")).unwrap(),
            AnnouncementStatus::Scheduled
        );
        assert_eq!(
            parse_status_label(Some("")).unwrap(),
            AnnouncementStatus::Draft
        );
    }

    #[test]
    fn test_parse_status_label_rejects_unknown() {
        let err = parse_status_label(Some("published")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_parse_schedule_round_trips_rfc3339() {
        let parsed = parse_schedule(Some("2099-01-01T00:00:00Z")).unwrap().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2099-01-01T00:00:00+00:00");
        assert!(parse_schedule(None).unwrap().is_none());
        assert!(parse_schedule(Some("  ")).unwrap().is_none());
    }

    #[test]
    fn test_parse_schedule_rejects_malformed() {
        let err = parse_schedule(Some("next tuesday")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("title", "Reminder").is_ok());
        let err = require_text("title", "   ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("title"));
    }

    #[test]
    fn test_require_organizer() {
        let organizer =
            RequestContext::new(Uuid::new_v4(), UserRole::Organizer, "ada".to_string());
        let attendee =
            RequestContext::new(Uuid::new_v4(), UserRole::Attendee, "bob".to_string());
        assert!(require_organizer(&organizer).is_ok());
        assert_eq!(
            require_organizer(&attendee).unwrap_err().kind,
            ErrorKind::Authorization
        );
    }
}
