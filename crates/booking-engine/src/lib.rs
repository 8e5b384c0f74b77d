//! # booking-engine
//!
//! Deterministic availability expansion and conflict-free booking
//! orchestration for scheduling hosts.
//!
//! A host publishes a weekly recurrence table for a bookable event type;
//! guests see concrete open slots over a rolling horizon and reserve one,
//! producing a confirmed booking plus an externally hosted meeting artifact
//! with a join link. All instants are compared in a single resolved time
//! reference (`DateTime<Utc>`).
//!
//! ## Modules
//!
//! - [`overlap`] — the single half-open interval intersection predicate
//! - [`slots`] — one day's working window → fixed-duration candidate slots
//! - [`expander`] — weekly recurrence table → rolling-horizon listing
//! - [`ports`] — collaborator traits (identity, external calendar, store)
//! - [`orchestrator`] — the availability/booking operations and the
//!   external-commit-then-persist saga
//! - [`host`] — host-side configuration operations
//! - [`memory`] — in-memory store with the atomic overlap-guarded insert
//! - [`types`] — domain model
//! - [`error`] — error types

pub mod error;
pub mod expander;
pub mod host;
pub mod memory;
pub mod orchestrator;
pub mod overlap;
pub mod ports;
pub mod slots;
pub mod types;

pub use error::{BookingError, Result};
pub use expander::{expand_availability, HORIZON_DAYS};
pub use orchestrator::{AttemptPhase, BookingConfirmation, BookingOrchestrator};
pub use overlap::{overlaps, slot_is_taken};
pub use slots::generate_day_slots;
pub use types::{
    Booking, BookingRequest, DayAvailability, DayRule, EventConfig, EventId, NewEvent, OwnerId,
    Slot, WeeklySchedule,
};
