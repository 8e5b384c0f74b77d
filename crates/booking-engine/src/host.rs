//! Host-side configuration operations: event types and the weekly schedule.
//!
//! Every operation takes the caller's authenticated session as an
//! `Option<&OwnerId>` — session handling itself lives with the identity
//! collaborator, the engine only enforces that one is present and owns the
//! touched records.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{BookingError, Result};
use crate::ports::{IdentityProvider, RecordStore};
use crate::types::{EventConfig, EventId, NewEvent, OwnerId, WeeklySchedule};

/// Operations available to an authenticated host.
pub struct HostConsole {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn RecordStore>,
}

impl HostConsole {
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self { identity, store }
    }

    /// Publish a new event configuration for the session owner.
    pub async fn create_event(
        &self,
        session: Option<&OwnerId>,
        new_event: NewEvent,
    ) -> Result<EventConfig> {
        let owner = session.ok_or(BookingError::Unauthorized)?;
        new_event.validate()?;

        // The session token may outlive the account it was minted for.
        let host = self.identity.resolve_owner(owner).await?;

        let config = EventConfig {
            id: EventId::new(Uuid::new_v4().to_string()),
            owner_id: host.id,
            title: new_event.title,
            description: new_event.description,
            duration_minutes: new_event.duration_minutes,
            is_private: new_event.is_private,
        };
        self.store.save_event_config(config.clone()).await?;
        debug!(event = %config.id, owner = %config.owner_id, "event configuration created");
        Ok(config)
    }

    /// Remove an event configuration owned by the session owner.
    pub async fn delete_event(&self, session: Option<&OwnerId>, event_id: &EventId) -> Result<()> {
        let owner = session.ok_or(BookingError::Unauthorized)?;
        let config = self
            .store
            .find_event_config(event_id)
            .await?
            .ok_or_else(|| BookingError::EventNotFound(event_id.clone()))?;
        if config.owner_id != *owner {
            return Err(BookingError::Unauthorized);
        }
        self.store.delete_event_config(event_id).await
    }

    /// The session owner's configurations, private ones included.
    pub async fn list_events(&self, session: Option<&OwnerId>) -> Result<Vec<EventConfig>> {
        let owner = session.ok_or(BookingError::Unauthorized)?;
        self.store.list_event_configs(owner).await
    }

    /// Replace the session owner's weekly schedule.
    pub async fn update_schedule(
        &self,
        session: Option<&OwnerId>,
        schedule: WeeklySchedule,
    ) -> Result<()> {
        let owner = session.ok_or(BookingError::Unauthorized)?;
        schedule.validate()?;
        self.store.save_weekly_schedule(owner, schedule).await
    }
}
