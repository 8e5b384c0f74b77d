//! Booking orchestration — the public operations of the engine.
//!
//! `get_availability` is a read-only projection. `submit_booking` is a
//! two-step saga (external meeting creation, then persistence) with a
//! compensating gap: a failed persist after a successful external commit
//! leaves an orphaned artifact that is surfaced to the caller, never
//! silently cleaned up. The provider call strictly precedes the store write
//! so that partial failure yields a phantom external event rather than a
//! booking whose guest never received a meeting link.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{BookingError, Result};
use crate::expander::{expand_availability, HORIZON_DAYS};
use crate::overlap::slot_is_taken;
use crate::ports::{
    CalendarAuthorization, CalendarProvider, IdentityProvider, MeetingRequest, RecordStore,
};
use crate::types::{Booking, BookingRequest, DayAvailability, EventId, Slot};

/// Progress of a single booking attempt through the commit pipeline.
///
/// Legal transitions run `Requested → Validated → ExternalCommitted →
/// Persisted`. An attempt can abort from `Requested` (validation failure)
/// or `Validated` (external-commit failure) with no side effect standing;
/// failure after `ExternalCommitted` is the distinguished orphaned-artifact
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    Requested,
    Validated,
    ExternalCommitted,
    Persisted,
}

impl AttemptPhase {
    /// Whether `next` is the legal successor of this phase.
    pub fn can_advance_to(self, next: AttemptPhase) -> bool {
        matches!(
            (self, next),
            (AttemptPhase::Requested, AttemptPhase::Validated)
                | (AttemptPhase::Validated, AttemptPhase::ExternalCommitted)
                | (AttemptPhase::ExternalCommitted, AttemptPhase::Persisted)
        )
    }
}

/// Phase tracker for one attempt. Transitions are logged; an illegal
/// transition is a programming error in the orchestrator itself.
struct Attempt {
    phase: AttemptPhase,
}

impl Attempt {
    fn new() -> Self {
        Self {
            phase: AttemptPhase::Requested,
        }
    }

    fn advance(&mut self, next: AttemptPhase) {
        debug_assert!(self.phase.can_advance_to(next));
        debug!(from = ?self.phase, to = ?next, "booking attempt advanced");
        self.phase = next;
    }
}

/// Successful outcome of a booking attempt: the persisted record plus the
/// external join link for immediate display.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub join_link: String,
}

/// Coordinates availability reads and booking commits against the injected
/// collaborators. Construct once and share; the orchestrator holds no
/// per-request state.
pub struct BookingOrchestrator {
    identity: Arc<dyn IdentityProvider>,
    calendar: Arc<dyn CalendarProvider>,
    store: Arc<dyn RecordStore>,
}

impl BookingOrchestrator {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        calendar: Arc<dyn CalendarProvider>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            identity,
            calendar,
            store,
        }
    }

    /// The published availability listing for an event configuration.
    ///
    /// An unknown event or a host without a saved schedule yields an empty
    /// listing rather than an error; store failures propagate.
    pub async fn get_availability(
        &self,
        event_id: &EventId,
        now: DateTime<Utc>,
    ) -> Result<Vec<DayAvailability>> {
        let config = match self.store.find_event_config(event_id).await? {
            Some(config) => config,
            None => return Ok(Vec::new()),
        };
        let schedule = match self.store.find_weekly_schedule(&config.owner_id).await? {
            Some(schedule) => schedule,
            None => return Ok(Vec::new()),
        };

        let horizon_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let horizon_end = horizon_start + Duration::days(HORIZON_DAYS + 1);
        let bookings = self
            .store
            .list_bookings(&config.owner_id, horizon_start, horizon_end)
            .await?;

        debug!(event = %event_id, bookings = bookings.len(), "computing availability");
        Ok(expand_availability(
            &schedule,
            config.duration_minutes,
            &bookings,
            now,
        ))
    }

    /// Commit a guest's booking request.
    ///
    /// Re-validates the candidate slot against a fresh booking snapshot,
    /// resolves the host's calendar authorization, creates the external
    /// meeting, then persists the booking. See [`AttemptPhase`] for the
    /// failure edges; no step is retried by the engine itself.
    pub async fn submit_booking(
        &self,
        event_id: &EventId,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation> {
        let mut attempt = Attempt::new();

        request.validate()?;
        let config = self
            .store
            .find_event_config(event_id)
            .await?
            .ok_or_else(|| BookingError::EventNotFound(event_id.clone()))?;
        let slot = request.resolve(config.duration_minutes);

        // Race guard: the listing the guest chose from may be stale. The
        // store's atomic insert guard backs this up at write time.
        let day_start = request.date.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);
        let bookings = self
            .store
            .list_bookings(&config.owner_id, day_start, day_end)
            .await?;
        if slot_is_taken(&slot, &bookings) {
            return Err(BookingError::SlotUnavailable);
        }
        attempt.advance(AttemptPhase::Validated);

        let host = self.identity.resolve_owner(&config.owner_id).await?;
        let token = match self.identity.calendar_authorization(&config.owner_id).await? {
            CalendarAuthorization::Linked(token) if !token.access_token.is_empty() => token,
            CalendarAuthorization::Linked(_) => return Err(BookingError::CredentialUnavailable),
            CalendarAuthorization::NotLinked => return Err(BookingError::CalendarNotLinked),
        };

        let meeting = MeetingRequest {
            title: format!("{} - {}", request.guest_name, config.title),
            description: request.note.clone(),
            start: slot.start,
            end: slot.end,
            attendees: vec![request.guest_email.clone(), host.email.clone()],
            idempotency_key: idempotency_key(event_id, &slot),
        };
        let artifact = self.calendar.create_meeting(&token, &meeting).await?;
        attempt.advance(AttemptPhase::ExternalCommitted);

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            event_id: config.id.clone(),
            owner_id: config.owner_id.clone(),
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            start_time: slot.start,
            end_time: slot.end,
            note: request.note,
            join_link: artifact.join_link.clone(),
            external_event_id: artifact.external_id.clone(),
            created_at: now,
        };

        match self.store.create_booking(booking).await {
            Ok(persisted) => {
                attempt.advance(AttemptPhase::Persisted);
                debug!(booking = %persisted.id, external = %persisted.external_event_id, "booking committed");
                Ok(BookingConfirmation {
                    join_link: persisted.join_link.clone(),
                    booking: persisted,
                })
            }
            // Lost the write race to a concurrent submission. The external
            // meeting already exists; leave it for reconciliation.
            Err(BookingError::Conflict) => {
                warn!(
                    external = %artifact.external_id,
                    "booking lost write race after external commit; artifact orphaned"
                );
                Err(BookingError::SlotUnavailable)
            }
            Err(err) => Err(BookingError::PersistenceFailedAfterExternalCommit {
                external_event_id: artifact.external_id,
                join_link: artifact.join_link,
                detail: err.to_string(),
            }),
        }
    }
}

/// Request key for the external provider, derived from the event identity
/// and the slot's start instant. Retrying the same slot reuses the key.
fn idempotency_key(event_id: &EventId, slot: &Slot) -> String {
    format!("{}-{}", event_id, slot.start.timestamp())
}
