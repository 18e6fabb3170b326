//! Tests for crossing-event detection.

use chrono::{NaiveDate, NaiveDateTime};
use room_layout::crossing::overlap_minutes;
use room_layout::{crossing_sets, find_crossing_events, overlaps, EventId, RoomEvent};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

/// Helper to create an event from hour/minute pairs in room 0.
fn event(id: i64, start: (u32, u32), end: (u32, u32)) -> RoomEvent {
    RoomEvent::new(id, at(start.0, start.1), at(end.0, end.1), 0)
}

fn ids(events: &[&RoomEvent]) -> Vec<EventId> {
    events.iter().map(|e| e.event_id.clone()).collect()
}

// ── Pairwise overlap ────────────────────────────────────────────────────────

#[test]
fn partially_overlapping_events_cross() {
    let a = event(1, (9, 0), (9, 30));
    let b = event(2, (9, 15), (9, 45));

    assert!(overlaps(&a, &b));
    assert!(overlaps(&b, &a));
    assert_eq!(overlap_minutes(&a, &b), 15);
}

#[test]
fn back_to_back_events_do_not_cross() {
    let a = event(1, (9, 0), (10, 0));
    let b = event(2, (10, 0), (11, 0));

    assert!(!overlaps(&a, &b));
    assert!(!overlaps(&b, &a));
    assert_eq!(overlap_minutes(&a, &b), 0);
}

#[test]
fn contained_event_crosses_its_container() {
    let outer = event(1, (9, 0), (12, 0));
    let inner = event(2, (10, 0), (11, 0));

    assert!(overlaps(&outer, &inner));
    assert_eq!(overlap_minutes(&outer, &inner), 60);
}

#[test]
fn zero_length_event_crosses_only_strict_containers() {
    let point = event(1, (10, 0), (10, 0));

    assert!(overlaps(&point, &event(2, (9, 0), (11, 0))));
    // Touching either edge is not enough.
    assert!(!overlaps(&point, &event(3, (10, 0), (11, 0))));
    assert!(!overlaps(&point, &event(4, (9, 0), (10, 0))));
    // Two points at the same instant do not cross.
    assert!(!overlaps(&point, &event(5, (10, 0), (10, 0))));
}

// ── Per-event crossing sets ─────────────────────────────────────────────────

#[test]
fn crossing_set_keeps_input_order() {
    let events = vec![
        event(1, (10, 0), (11, 0)),
        event(2, (9, 0), (9, 30)),
        event(3, (9, 45), (10, 15)),
        event(4, (9, 0), (12, 0)),
    ];

    let crossing = find_crossing_events(&events, &events[0]);

    assert_eq!(ids(&crossing), vec![EventId::Int(3), EventId::Int(4)]);
}

#[test]
fn event_is_never_in_its_own_crossing_set() {
    let events = vec![event(1, (9, 0), (10, 0)), event(2, (9, 30), (10, 30))];

    for target in &events {
        let crossing = find_crossing_events(&events, target);
        assert!(crossing.iter().all(|e| e.event_id != target.event_id));
        assert_eq!(crossing.len(), 1);
    }
}

#[test]
fn membership_is_decided_by_id() {
    // A copy of the target with the same id is treated as the target itself.
    let target = event(1, (9, 0), (10, 0));
    let events = vec![target.clone(), target.clone(), event(2, (9, 30), (10, 30))];

    assert_eq!(ids(&find_crossing_events(&events, &target)), vec![EventId::Int(2)]);
}

#[test]
fn empty_event_list_has_no_crossings() {
    let target = event(1, (9, 0), (10, 0));
    assert!(find_crossing_events(&[], &target).is_empty());
    assert!(crossing_sets(&[]).is_empty());
}

// ── All crossing sets at once ───────────────────────────────────────────────

#[test]
fn crossing_sets_match_per_event_scan() {
    let events = vec![
        event(1, (9, 0), (9, 30)),
        event(2, (9, 15), (9, 45)),
        event(3, (9, 30), (10, 0)),
        event(4, (8, 0), (12, 0)),
        event(5, (9, 40), (9, 40)),
        event(6, (11, 0), (11, 30)),
    ];

    let sets = crossing_sets(&events);

    for (i, target) in events.iter().enumerate() {
        let expected: Vec<EventId> = ids(&find_crossing_events(&events, target));
        let actual: Vec<EventId> = sets[i].iter().map(|&j| events[j].event_id.clone()).collect();
        assert_eq!(actual, expected, "crossing set of event {}", target.event_id);
    }
}

#[test]
fn crossing_sets_are_symmetric() {
    let events = vec![
        event(1, (9, 0), (9, 30)),
        event(2, (9, 15), (9, 45)),
        event(3, (9, 30), (10, 0)),
    ];

    let sets = crossing_sets(&events);

    assert_eq!(sets[0], vec![1]);
    assert_eq!(sets[1], vec![0, 2]);
    assert_eq!(sets[2], vec![1]);
}

#[test]
fn identical_intervals_cross_each_other() {
    let events = vec![event(1, (9, 0), (10, 0)), event(2, (9, 0), (10, 0))];

    let sets = crossing_sets(&events);

    assert_eq!(sets, vec![vec![1], vec![0]]);
}
