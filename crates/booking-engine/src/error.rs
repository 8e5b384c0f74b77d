//! Error types for booking-engine operations.

use thiserror::Error;

use crate::types::EventId;

/// Failures surfaced by the engine's public operations.
///
/// Every variant is returned, never thrown across the boundary; the caller
/// (UI/API layer) decides presentation. Collaborator implementations use the
/// same enum so the orchestrator can propagate their failures untouched.
#[derive(Error, Debug)]
pub enum BookingError {
    /// The request shape is malformed. Reported before any side effect.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No authenticated session, or the session does not own the resource.
    #[error("unauthorized")]
    Unauthorized,

    /// The referenced event configuration does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The candidate slot overlaps an existing booking. Raised by the
    /// pre-commit re-validation and by write-time store conflicts alike.
    #[error("requested slot is no longer available")]
    SlotUnavailable,

    /// The host has never connected an external calendar.
    #[error("host has not linked an external calendar")]
    CalendarNotLinked,

    /// The host's calendar is linked but no usable token could be obtained.
    #[error("calendar credential unavailable for host")]
    CredentialUnavailable,

    /// The external calendar provider rejected the meeting creation. The
    /// triggering condition (quota, auth expiry, network) is carried in the
    /// message but not subdivided further.
    #[error("external calendar provider error: {0}")]
    ExternalProvider(String),

    /// A store write collided with a concurrent booking for an overlapping
    /// interval. Store implementations raise this from their atomic insert
    /// guard; the orchestrator reports it to callers as [`SlotUnavailable`].
    ///
    /// [`SlotUnavailable`]: BookingError::SlotUnavailable
    #[error("booking conflicts with an existing booking")]
    Conflict,

    /// The external meeting was created but the booking record could not be
    /// persisted. The external artifact is orphaned and must be reconciled
    /// by an operator; the engine does not delete it or retry.
    #[error(
        "booking persistence failed after external commit \
         (external event {external_event_id}): {detail}"
    )]
    PersistenceFailedAfterExternalCommit {
        external_event_id: String,
        join_link: String,
        detail: String,
    },

    /// The identity provider could not resolve the referenced owner.
    #[error("identity provider error: {0}")]
    Identity(String),

    /// Infrastructure failure in the record store.
    #[error("record store error: {0}")]
    Store(String),
}

/// Convenience alias used throughout booking-engine.
pub type Result<T> = std::result::Result<T, BookingError>;
