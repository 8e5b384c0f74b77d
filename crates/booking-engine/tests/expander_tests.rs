//! Tests for rolling-horizon availability expansion.

use booking_engine::expander::{expand_availability, HORIZON_DAYS};
use booking_engine::types::{Booking, EventId, OwnerId, WeeklySchedule};
use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc, Weekday};

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Monday 2026-03-16, mid-morning.
fn monday_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap()
}

/// Open every day of the week with the same window.
fn open_all_week(start: NaiveTime, end: NaiveTime) -> WeeklySchedule {
    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    weekdays
        .into_iter()
        .fold(WeeklySchedule::closed(), |schedule, day| {
            schedule.with_day(day, start, end)
        })
}

fn booking(start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
    Booking {
        id: "bkg-1".into(),
        event_id: EventId::new("evt-1"),
        owner_id: OwnerId::new("owner-1"),
        guest_name: "Ada Lovelace".into(),
        guest_email: "ada@example.com".into(),
        start_time: start,
        end_time: end,
        note: None,
        join_link: "https://meet.example/abc".into(),
        external_event_id: "ext-1".into(),
        created_at: start,
    }
}

#[test]
fn fully_open_schedule_covers_the_whole_horizon() {
    let schedule = open_all_week(t(9, 0), t(17, 0));
    let days = expand_availability(&schedule, 30, &[], monday_now());

    // Today plus HORIZON_DAYS further dates.
    assert_eq!(days.len(), (HORIZON_DAYS + 1) as usize);
    assert_eq!(days[0].date, monday_now().date_naive());
    for day in &days {
        assert_eq!(day.slots.len(), 16);
    }
}

#[test]
fn closed_weekdays_are_omitted_not_empty() {
    // Monday-Friday only; weekends stay closed.
    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];
    let schedule = weekdays
        .into_iter()
        .fold(WeeklySchedule::closed(), |schedule, day| {
            schedule.with_day(day, t(9, 0), t(17, 0))
        });

    let days = expand_availability(&schedule, 30, &[], monday_now());

    assert!(days
        .iter()
        .all(|d| d.date.weekday() != Weekday::Sat && d.date.weekday() != Weekday::Sun));
    // 31 dates minus 4 Saturdays and 4 Sundays in the horizon window.
    assert_eq!(days.len(), 23);
}

#[test]
fn fully_booked_date_disappears_from_the_listing() {
    let schedule = open_all_week(t(9, 0), t(17, 0));
    // Blanket booking covering all of Wednesday 2026-03-18.
    let wed_start = Utc.with_ymd_and_hms(2026, 3, 18, 9, 0, 0).unwrap();
    let wed_end = Utc.with_ymd_and_hms(2026, 3, 18, 17, 0, 0).unwrap();
    let bookings = vec![booking(wed_start, wed_end)];

    let days = expand_availability(&schedule, 30, &bookings, monday_now());

    assert!(
        !days.iter().any(|d| d.date == wed_start.date_naive()),
        "a fully booked date must be omitted, not published empty"
    );
    assert_eq!(days.len(), (HORIZON_DAYS + 1) as usize - 1);
}

#[test]
fn partially_booked_date_keeps_its_remaining_slots() {
    let schedule = open_all_week(t(9, 0), t(17, 0));
    let busy_start = Utc.with_ymd_and_hms(2026, 3, 17, 9, 0, 0).unwrap();
    let busy_end = Utc.with_ymd_and_hms(2026, 3, 17, 13, 0, 0).unwrap();
    let bookings = vec![booking(busy_start, busy_end)];

    let days = expand_availability(&schedule, 30, &bookings, monday_now());

    let tuesday = days
        .iter()
        .find(|d| d.date == busy_start.date_naive())
        .expect("partially booked date stays listed");
    assert_eq!(tuesday.slots.len(), 8); // 13:00-17:00 in 30-minute steps
    assert_eq!(tuesday.slots[0].start, busy_end);
}

#[test]
fn today_vanishes_once_its_window_has_passed() {
    let schedule = open_all_week(t(9, 0), t(17, 0));
    // 16:45 — not enough room left today for a 30-minute slot.
    let late_now = Utc.with_ymd_and_hms(2026, 3, 16, 16, 45, 0).unwrap();

    let days = expand_availability(&schedule, 30, &[], late_now);

    assert_eq!(days[0].date, late_now.date_naive().succ_opt().unwrap());
    assert_eq!(days.len(), (HORIZON_DAYS + 1) as usize - 1);
}

#[test]
fn listing_is_ascending_by_date_and_time() {
    let schedule = open_all_week(t(9, 0), t(12, 0));
    let days = expand_availability(&schedule, 45, &[], monday_now());

    for window in days.windows(2) {
        assert!(window[0].date < window[1].date);
    }
    for day in &days {
        for window in day.slots.windows(2) {
            assert!(window[0].start < window[1].start);
        }
    }
}

#[test]
fn all_closed_schedule_produces_nothing() {
    let days = expand_availability(&WeeklySchedule::closed(), 30, &[], monday_now());
    assert!(days.is_empty());
}
