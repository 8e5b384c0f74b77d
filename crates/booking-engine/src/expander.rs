//! Availability expansion — drives slot generation across a rolling horizon
//! using the host's per-weekday recurrence table.

use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::debug;

use crate::slots::generate_day_slots;
use crate::types::{Booking, DayAvailability, DayRule, WeeklySchedule};

/// Days beyond today covered by an availability listing. The horizon is
/// inclusive of today, so a listing spans `HORIZON_DAYS + 1` calendar dates.
pub const HORIZON_DAYS: i64 = 30;

/// Expand a weekly schedule into the published availability listing.
///
/// Walks every date from today through the horizon. Dates whose weekday rule
/// is [`DayRule::Closed`] are skipped outright, and dates where filtering
/// leaves no slots are omitted rather than published empty — a day becomes
/// invisible once fully booked or fully in the past.
///
/// The result is ascending by date; slots within a date are chronological by
/// construction.
pub fn expand_availability(
    schedule: &WeeklySchedule,
    duration_minutes: u32,
    bookings: &[Booking],
    now: DateTime<Utc>,
) -> Vec<DayAvailability> {
    let today = now.date_naive();
    let mut days = Vec::new();

    for offset in 0..=HORIZON_DAYS {
        let date = today + Duration::days(offset);
        let (start, end) = match schedule.rule_for(date.weekday()) {
            DayRule::Open { start, end } => (start, end),
            DayRule::Closed => continue,
        };

        let slots = generate_day_slots(
            date,
            start,
            end,
            duration_minutes,
            bookings,
            schedule.time_gap_minutes,
            now,
        );
        if slots.is_empty() {
            continue;
        }
        days.push(DayAvailability { date, slots });
    }

    debug!(days = days.len(), "expanded availability horizon");
    days
}
