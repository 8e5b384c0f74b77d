//! The single interval-overlap predicate shared by slot generation, booking
//! re-validation, and the store's write guard.
//!
//! Intervals are half-open: an interval ending exactly when another begins
//! does NOT conflict.

use chrono::{DateTime, Utc};

use crate::types::{Booking, Slot};

/// True iff the half-open intervals `[a_start, a_end)` and `[b_start, b_end)`
/// intersect.
///
/// Two intervals overlap when `a_start < b_end && b_start < a_end`. This
/// excludes the adjacent case where one ends exactly as the other starts.
/// Every overlap comparison in the crate goes through this function —
/// restating the comparison elsewhere is how boundary off-by-ones creep in.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// True iff the candidate slot intersects any of the given bookings.
pub fn slot_is_taken(slot: &Slot, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|b| overlaps(slot.start, slot.end, b.start_time, b.end_time))
}
