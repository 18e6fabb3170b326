//! Tests for the remote source contract and loading-state handling.

use std::cell::RefCell;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use room_layout::error::Result;
use room_layout::source::{load_events, EventSource, LoadingIndicator, QueryRange};
use room_layout::{LayoutError, RoomEvent};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).unwrap()
}

/// Records every state change it is given.
#[derive(Default)]
struct Recorder {
    states: Vec<bool>,
}

impl LoadingIndicator for Recorder {
    fn set_loading(&mut self, loading: bool) {
        self.states.push(loading);
    }
}

// ── Query range ─────────────────────────────────────────────────────────────

#[test]
fn full_week_starting_sunday() {
    // 2026-03-04 is a Wednesday.
    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Sun, &[0, 1, 2, 3, 4, 5, 6]);

    assert_eq!(range.start, dt(2026, 3, 1, 0, 0, 0));
    assert_eq!(range.end, dt(2026, 3, 7, 23, 59, 59));
}

#[test]
fn work_week_starting_monday() {
    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Mon, &[0, 1, 2, 3, 4]);

    assert_eq!(range.start, dt(2026, 3, 2, 0, 0, 0));
    assert_eq!(range.end, dt(2026, 3, 6, 23, 59, 59));
}

#[test]
fn selected_day_on_week_start() {
    let range = QueryRange::for_week(date(2026, 3, 2), Weekday::Mon, &[]);

    assert_eq!(range.start, dt(2026, 3, 2, 0, 0, 0));
    assert_eq!(range.end, dt(2026, 3, 8, 23, 59, 59));
}

#[test]
fn query_string_uses_wall_clock() {
    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Mon, &[2]);

    assert_eq!(
        range.to_query_string(),
        "?start=2026-03-04T00:00:00&end=2026-03-04T23:59:59"
    );
}

// ── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn successful_fetch_toggles_loading() {
    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Mon, &[0]);
    let seen = RefCell::new(None);
    let source = |r: &QueryRange| -> Result<Vec<RoomEvent>> {
        *seen.borrow_mut() = Some(*r);
        Ok(vec![RoomEvent::new(
            1,
            dt(2026, 3, 2, 9, 0, 0),
            dt(2026, 3, 2, 10, 0, 0),
            0,
        )])
    };
    let mut recorder = Recorder::default();

    let events = load_events(&source, &mut recorder, &range).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(*seen.borrow(), Some(range));
    assert_eq!(recorder.states, vec![true, false]);
}

#[test]
fn failed_fetch_clears_loading_and_propagates() {
    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Mon, &[0]);
    let source = |_: &QueryRange| -> Result<Vec<RoomEvent>> {
        Err(LayoutError::Fetch("connection refused".into()))
    };
    let mut loading = false;

    let err = load_events(&source, &mut loading, &range).unwrap_err();

    assert!(!loading);
    assert_eq!(err.to_string(), "Fetch error: connection refused");
}

#[test]
fn empty_fetch_clears_loading() {
    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Mon, &[0]);
    let source = |_: &QueryRange| -> Result<Vec<RoomEvent>> { Ok(Vec::new()) };
    let mut recorder = Recorder::default();

    let events = load_events(&source, &mut recorder, &range).unwrap();

    assert!(events.is_empty());
    assert_eq!(recorder.states, vec![true, false]);
}

#[test]
fn panicking_source_still_clears_loading() {
    struct Broken;

    impl EventSource for Broken {
        fn fetch(&self, _: &QueryRange) -> Result<Vec<RoomEvent>> {
            panic!("source exploded");
        }
    }

    let range = QueryRange::for_week(date(2026, 3, 4), Weekday::Mon, &[0]);
    let mut loading = false;

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = load_events(&Broken, &mut loading, &range);
    }));

    assert!(outcome.is_err());
    assert!(!loading);
}
