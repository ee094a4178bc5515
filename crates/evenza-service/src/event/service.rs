//! Event service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use evenza_core::error::AppError;
use evenza_core::result::AppResult;
use evenza_core::types::pagination::{PageRequest, PageResponse};
use evenza_database::repositories::event::EventRepository;
use evenza_database::repositories::registration::RegistrationRepository;
use evenza_entity::event::model::{CreateEvent, UpdateEvent};
use evenza_entity::event::Event;
use evenza_entity::registration::{Registration, RegistrationStatus};

use crate::context::RequestContext;

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    /// Event title.
    pub title: String,
    /// Longer description (optional).
    pub description: Option<String>,
    /// Venue or location string (optional).
    pub location: Option<String>,
    /// When the event starts (optional).
    pub starts_at: Option<DateTime<Utc>>,
}

/// Manages events and their registrations.
#[derive(Debug, Clone)]
pub struct EventService {
    event_repo: Arc<EventRepository>,
    registration_repo: Arc<RegistrationRepository>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        registration_repo: Arc<RegistrationRepository>,
    ) -> Self {
        Self {
            event_repo,
            registration_repo,
        }
    }

    /// Creates an event owned by the calling organizer.
    pub async fn create(&self, ctx: &RequestContext, input: CreateEventInput) -> AppResult<Event> {
        if !ctx.is_organizer() {
            return Err(AppError::authorization("Only organizers may create events"));
        }
        if input.title.trim().is_empty() {
            return Err(AppError::validation("title is required"));
        }

        self.event_repo
            .create(&CreateEvent {
                title: input.title.trim().to_string(),
                description: input.description,
                location: input.location,
                starts_at: input.starts_at,
                created_by: ctx.user_id,
            })
            .await
    }

    /// Lists events, newest first.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Event>> {
        self.event_repo.find_all(&page).await
    }

    /// Fetches a single event.
    pub async fn get(&self, id: Uuid) -> AppResult<Event> {
        self.event_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Applies a partial update; only the creating organizer may do so.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: UpdateEvent,
    ) -> AppResult<Event> {
        let event = self.get(id).await?;
        if event.created_by != ctx.user_id {
            return Err(AppError::authorization("Event belongs to another organizer"));
        }

        self.event_repo
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Deletes an event; only the creating organizer may do so.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let event = self.get(id).await?;
        if event.created_by != ctx.user_id {
            return Err(AppError::authorization("Event belongs to another organizer"));
        }

        self.event_repo.delete(id).await?;
        Ok(())
    }

    /// Registers the caller for an event. Registering twice is a
    /// conflict.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        waitlisted: bool,
    ) -> AppResult<Registration> {
        self.get(event_id).await?;

        let status = if waitlisted {
            RegistrationStatus::Waitlisted
        } else {
            RegistrationStatus::Confirmed
        };

        self.registration_repo
            .create(event_id, ctx.user_id, status)
            .await?
            .ok_or_else(|| AppError::conflict("Already registered for this event"))
    }

    /// Removes the caller's registration.
    pub async fn unregister(&self, ctx: &RequestContext, event_id: Uuid) -> AppResult<()> {
        let removed = self.registration_repo.delete(event_id, ctx.user_id).await?;
        if !removed {
            return Err(AppError::not_found("Not registered for this event"));
        }
        Ok(())
    }
}
