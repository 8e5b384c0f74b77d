//! Domain model: event configurations, weekly schedules, bookings, and the
//! transient slot/request types that flow through an availability query or a
//! booking attempt.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Opaque identifier of a host (the owner of event configurations,
/// a weekly schedule, and bookings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of an event configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bookable event type published by a host.
///
/// Duration and owner are invariant for the lifetime of any booking that
/// references the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub id: EventId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: String,
    /// Length of every booked slot, in minutes. Always positive.
    pub duration_minutes: u32,
    /// Private configurations are excluded from public listings.
    pub is_private: bool,
}

/// Host-supplied fields for a new event configuration, before an id is
/// minted and an owner attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub is_private: bool,
}

impl NewEvent {
    /// Bounds match the host-facing form: title 3-100 characters,
    /// description 1-500, duration at least one minute.
    pub fn validate(&self) -> Result<()> {
        if self.title.chars().count() < 3 || self.title.chars().count() > 100 {
            return Err(BookingError::Validation(
                "title must be 3-100 characters".into(),
            ));
        }
        if self.description.is_empty() || self.description.chars().count() > 500 {
            return Err(BookingError::Validation(
                "description must be 1-500 characters".into(),
            ));
        }
        if self.duration_minutes == 0 {
            return Err(BookingError::Validation(
                "duration must be a positive number of minutes".into(),
            ));
        }
        Ok(())
    }
}

/// One weekday's working window.
///
/// `Closed` days carry no times at all, so "start/end are unused when the
/// day is unavailable" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayRule {
    Closed,
    Open { start: NaiveTime, end: NaiveTime },
}

/// A host's recurring weekly availability: exactly one [`DayRule`] per
/// weekday (Monday-first) and a single buffer gap shared across all days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: [DayRule; 7],
    /// Minimum minutes between "now" and the earliest offerable slot today.
    pub time_gap_minutes: u32,
}

impl WeeklySchedule {
    /// A schedule with every day closed and no buffer gap.
    pub fn closed() -> Self {
        Self {
            days: [DayRule::Closed; 7],
            time_gap_minutes: 0,
        }
    }

    /// Open one weekday with the given working window.
    pub fn with_day(mut self, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        self.days[weekday.num_days_from_monday() as usize] = DayRule::Open { start, end };
        self
    }

    pub fn with_time_gap(mut self, minutes: u32) -> Self {
        self.time_gap_minutes = minutes;
        self
    }

    /// The rule governing the given weekday.
    pub fn rule_for(&self, weekday: Weekday) -> DayRule {
        self.days[weekday.num_days_from_monday() as usize]
    }

    /// Every open day must have its window start strictly before its end.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.days {
            if let DayRule::Open { start, end } = rule {
                if start >= end {
                    return Err(BookingError::Validation(
                        "day window must end after it starts".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A committed reservation of one slot against an event configuration.
///
/// Created exactly once by the orchestrator after the external meeting
/// artifact exists, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub event_id: EventId,
    pub owner_id: OwnerId,
    pub guest_name: String,
    pub guest_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub note: Option<String>,
    /// Join link of the external meeting artifact.
    pub join_link: String,
    /// Provider-side identifier of the external meeting artifact.
    pub external_event_id: String,
    pub created_at: DateTime<Utc>,
}

/// A candidate bookable `[start, end)` interval. Not persisted — slots are a
/// projection rendered to guests and re-validated at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One horizon date with at least one open slot. Dates with no remaining
/// slots are never published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

/// Guest-supplied booking submission, scoped to a single attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub note: Option<String>,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<()> {
        if self.guest_name.trim().is_empty() {
            return Err(BookingError::Validation("name is required".into()));
        }
        if !looks_like_email(&self.guest_email) {
            return Err(BookingError::Validation("invalid email".into()));
        }
        Ok(())
    }

    /// Resolve the request into the candidate slot it is asking for.
    pub fn resolve(&self, duration_minutes: u32) -> Slot {
        let start = self.date.and_time(self.start_time).and_utc();
        Slot {
            start,
            end: start + Duration::minutes(duration_minutes as i64),
        }
    }
}

fn looks_like_email(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
