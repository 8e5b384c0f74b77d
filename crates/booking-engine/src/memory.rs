//! In-memory [`RecordStore`] reference implementation.
//!
//! One `tokio::sync::Mutex` serializes all writes, so the overlap check and
//! the insert in [`create_booking`] happen under a single lock acquisition —
//! the atomic overlap-guarded insert the store contract requires. Useful as
//! a test fixture and as the model a SQL-backed store must match.
//!
//! [`create_booking`]: RecordStore::create_booking

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::{BookingError, Result};
use crate::overlap::overlaps;
use crate::ports::RecordStore;
use crate::types::{Booking, EventConfig, EventId, OwnerId, WeeklySchedule};

#[derive(Default)]
struct StoreState {
    events: HashMap<EventId, EventConfig>,
    schedules: HashMap<OwnerId, WeeklySchedule>,
    bookings: Vec<Booking>,
}

/// Mutex-serialized in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every booking, in insertion order.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.state.lock().await.bookings.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_event_config(&self, id: &EventId) -> Result<Option<EventConfig>> {
        Ok(self.state.lock().await.events.get(id).cloned())
    }

    async fn save_event_config(&self, config: EventConfig) -> Result<()> {
        self.state
            .lock()
            .await
            .events
            .insert(config.id.clone(), config);
        Ok(())
    }

    async fn delete_event_config(&self, id: &EventId) -> Result<()> {
        self.state.lock().await.events.remove(id);
        Ok(())
    }

    async fn list_event_configs(&self, owner: &OwnerId) -> Result<Vec<EventConfig>> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .values()
            .filter(|config| config.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn find_weekly_schedule(&self, owner: &OwnerId) -> Result<Option<WeeklySchedule>> {
        Ok(self.state.lock().await.schedules.get(owner).cloned())
    }

    async fn save_weekly_schedule(&self, owner: &OwnerId, schedule: WeeklySchedule) -> Result<()> {
        self.state
            .lock()
            .await
            .schedules
            .insert(owner.clone(), schedule);
        Ok(())
    }

    async fn list_bookings(
        &self,
        owner: &OwnerId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.owner_id == *owner && overlaps(b.start_time, b.end_time, from, until))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_time);
        Ok(bookings)
    }

    async fn create_booking(&self, booking: Booking) -> Result<Booking> {
        let mut state = self.state.lock().await;
        // Conflict check and insert under the same lock acquisition.
        let collision = state.bookings.iter().any(|b| {
            b.owner_id == booking.owner_id
                && overlaps(booking.start_time, booking.end_time, b.start_time, b.end_time)
        });
        if collision {
            return Err(BookingError::Conflict);
        }
        state.bookings.push(booking.clone());
        Ok(booking)
    }
}
