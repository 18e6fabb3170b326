//! Events laid out on the room grid.
//!
//! Events are owned by the caller (usually fetched from a remote source) and
//! are only ever read by the layout code.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Identifier of an event. Remote sources use either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(n) => write!(f, "{}", n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        EventId::Int(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        EventId::Text(s)
    }
}

/// A single time-bound event booked against a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEvent {
    #[serde(alias = "eventId")]
    pub event_id: EventId,
    #[serde(with = "wall_clock")]
    pub start: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub end: NaiveDateTime,
    #[serde(alias = "roomId")]
    pub room_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RoomEvent {
    pub fn new(
        event_id: impl Into<EventId>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        room_id: i64,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            start,
            end,
            room_id,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Length of the event in whole minutes. Negative for malformed events.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Check the invariants the layout code relies on but does not enforce.
///
/// Reports the first event whose end precedes its start, or the first
/// repeated `event_id`.
pub fn validate_events(events: &[RoomEvent]) -> Result<()> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if event.end < event.start {
            return Err(LayoutError::MalformedEvent {
                event_id: event.event_id.clone(),
                start: event.start,
                end: event.end,
            });
        }
        if !seen.insert(&event.event_id) {
            return Err(LayoutError::DuplicateEventId(event.event_id.clone()));
        }
    }
    Ok(())
}

/// Serde adapter for wall-clock datetimes.
///
/// Accepts naive ISO 8601 (`2026-03-02T09:00:00`, seconds optional) and
/// RFC 3339. For RFC 3339 input the local wall-clock part is kept as-is and
/// the offset is dropped. Always serializes as naive ISO 8601.
pub mod wall_clock {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
            .ok()
    }

    pub fn format(dt: &NaiveDateTime) -> String {
        dt.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime '{}'", raw)))
    }
}
