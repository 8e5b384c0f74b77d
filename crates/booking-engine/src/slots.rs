//! Slot generation — expands one day's working window into fixed-duration
//! candidate slots, filtered by the buffer gap and by existing bookings.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::overlap::slot_is_taken;
use crate::types::{Booking, Slot};

/// Generate the open slots for one calendar date.
///
/// The cursor starts at `date` + `start` and advances in `duration_minutes`
/// steps. Slots are back-to-back: a slot rejected for overlapping a booking
/// still consumes its full duration, the window is not resampled at a finer
/// granularity. Generation stops once a candidate would end past
/// `date` + `end`.
///
/// When `date` is today, the cursor is first advanced to `now` plus the
/// buffer gap if it would otherwise precede that bound — a slot is never
/// offered starting before "now plus buffer".
///
/// An inverted or empty window (`end <= start`) yields no slots. The result
/// is chronological and possibly empty.
pub fn generate_day_slots(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    duration_minutes: u32,
    bookings: &[Booking],
    time_gap_minutes: u32,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    // A zero duration would never advance the cursor.
    if duration_minutes == 0 {
        return Vec::new();
    }

    let mut cursor = date.and_time(start).and_utc();
    let limit = date.and_time(end).and_utc();

    if date == now.date_naive() {
        let earliest = now + Duration::minutes(time_gap_minutes as i64);
        if cursor < earliest {
            cursor = earliest;
        }
    }

    let duration = Duration::minutes(duration_minutes as i64);
    let mut slots = Vec::new();

    loop {
        let candidate_end = cursor + duration;
        if candidate_end > limit {
            break;
        }
        let candidate = Slot {
            start: cursor,
            end: candidate_end,
        };
        if !slot_is_taken(&candidate, bookings) {
            slots.push(candidate);
        }
        cursor = candidate_end;
    }

    slots
}
