//! Collaborator port interfaces consumed by the orchestrator.
//!
//! The engine owns no transport: identity lookup, the external calendar, and
//! persistence are all reached through these traits, with implementations
//! injected by the caller and shared via `Arc`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{Booking, EventConfig, EventId, OwnerId, WeeklySchedule};

/// A resolved host identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: OwnerId,
    pub name: String,
    pub email: String,
}

/// Bearer credential for the host's external calendar.
#[derive(Debug, Clone)]
pub struct CalendarToken {
    pub access_token: String,
}

/// Outcome of asking the identity provider for calendar access.
#[derive(Debug, Clone)]
pub enum CalendarAuthorization {
    Linked(CalendarToken),
    /// The host has never connected an external calendar.
    NotLinked,
}

/// Parameters for creating the external meeting artifact.
#[derive(Debug, Clone)]
pub struct MeetingRequest {
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Guest and host email addresses.
    pub attendees: Vec<String>,
    /// Request key the provider uses to deduplicate retried calls. Stable
    /// for a given event and slot, so a retry cannot double-book the
    /// external calendar.
    pub idempotency_key: String,
}

/// The provider-side meeting record: a join link plus the provider's own
/// identifier for later reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingArtifact {
    pub join_link: String,
    pub external_id: String,
}

/// Identity lookup and external-calendar authorization.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a host reference into a full identity. Unknown owners fail
    /// with [`BookingError::Identity`].
    ///
    /// [`BookingError::Identity`]: crate::error::BookingError::Identity
    async fn resolve_owner(&self, owner: &OwnerId) -> Result<Identity>;

    /// Obtain the host's external-calendar authorization, or
    /// [`CalendarAuthorization::NotLinked`] when none was ever connected.
    async fn calendar_authorization(&self, owner: &OwnerId) -> Result<CalendarAuthorization>;
}

/// The external calendar service that hosts meetings.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Create a meeting spanning the requested interval. Rejections are
    /// reported as [`BookingError::ExternalProvider`]; implementations must
    /// honor `idempotency_key` so a retried call returns the already-created
    /// artifact instead of minting a second one.
    ///
    /// [`BookingError::ExternalProvider`]: crate::error::BookingError::ExternalProvider
    async fn create_meeting(
        &self,
        token: &CalendarToken,
        request: &MeetingRequest,
    ) -> Result<MeetingArtifact>;
}

/// Persistent records: event configurations, weekly schedules, bookings.
///
/// `create_booking` is the engine's second line of defense against
/// double-booking: implementations must check for an overlapping booking of
/// the same owner and insert atomically (one transaction, or a serialized
/// per-owner write path), raising [`BookingError::Conflict`] on collision.
/// Read-then-write without that guard is not an acceptable implementation.
///
/// [`BookingError::Conflict`]: crate::error::BookingError::Conflict
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_event_config(&self, id: &EventId) -> Result<Option<EventConfig>>;

    async fn save_event_config(&self, config: EventConfig) -> Result<()>;

    async fn delete_event_config(&self, id: &EventId) -> Result<()>;

    /// All of an owner's configurations, private ones included.
    async fn list_event_configs(&self, owner: &OwnerId) -> Result<Vec<EventConfig>>;

    async fn find_weekly_schedule(&self, owner: &OwnerId) -> Result<Option<WeeklySchedule>>;

    async fn save_weekly_schedule(&self, owner: &OwnerId, schedule: WeeklySchedule) -> Result<()>;

    /// Bookings of the given owner intersecting `[from, until)`, ascending
    /// by start time.
    async fn list_bookings(
        &self,
        owner: &OwnerId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;

    /// Atomic overlap-guarded insert. Returns the persisted booking.
    async fn create_booking(&self, booking: Booking) -> Result<Booking>;
}
