//! Error types for room-layout operations.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::event::EventId;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid hour range: start hour {start} must be before end hour {end} (max 24)")]
    InvalidHourRange { start: u32, end: u32 },

    #[error("Invalid step: {0} minutes (must be positive)")]
    InvalidStep(u32),

    #[error("Malformed event {event_id}: end {end} is before start {start}")]
    MalformedEvent {
        event_id: EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Duplicate event id: {0}")]
    DuplicateEventId(EventId),

    #[error("Fetch error: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
