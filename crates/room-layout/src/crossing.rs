//! Detect crossing (time-overlapping) events within a day.
//!
//! Intervals are half-open: back-to-back events, where one ends exactly when
//! another starts, do NOT cross. An event never crosses itself, and membership
//! is decided by `event_id`.

use crate::event::RoomEvent;

/// Whether two events overlap: `a.start < b.end && b.start < a.end`.
pub fn overlaps(a: &RoomEvent, b: &RoomEvent) -> bool {
    a.start < b.end && b.start < a.end
}

/// Minutes shared by two events, zero when they do not overlap.
pub fn overlap_minutes(a: &RoomEvent, b: &RoomEvent) -> i64 {
    if !overlaps(a, b) {
        return 0;
    }
    let overlap_start = a.start.max(b.start);
    let overlap_end = a.end.min(b.end);
    (overlap_end - overlap_start).num_minutes()
}

/// Find every event in `events` that crosses `target`.
///
/// Scans the list once and keeps its order. Events sharing the target's
/// `event_id` (including the target itself) are excluded.
pub fn find_crossing_events<'a>(events: &'a [RoomEvent], target: &RoomEvent) -> Vec<&'a RoomEvent> {
    events
        .iter()
        .filter(|e| e.event_id != target.event_id && overlaps(e, target))
        .collect()
}

/// Compute the crossing set of every event at once.
///
/// Returns, for each input position, the indices of the events crossing it in
/// ascending (input) order. Agrees with calling [`find_crossing_events`] for
/// each event, but sweeps the events in start order and only compares against
/// intervals still open at each start, instead of comparing all pairs.
pub fn crossing_sets(events: &[RoomEvent]) -> Vec<Vec<usize>> {
    let mut sets: Vec<Vec<usize>> = vec![Vec::new(); events.len()];

    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| (events[i].start, events[i].end));

    // Intervals that may still cross a later start.
    let mut active: Vec<usize> = Vec::new();
    for &i in &order {
        let current = &events[i];
        // Anything ending at or before this start cannot cross it or any
        // event sorted after it.
        active.retain(|&j| events[j].end > current.start);

        for &j in &active {
            let other = &events[j];
            if other.event_id != current.event_id && overlaps(current, other) {
                sets[i].push(j);
                sets[j].push(i);
            }
        }
        active.push(i);
    }

    for set in &mut sets {
        set.sort_unstable();
    }
    sets
}
