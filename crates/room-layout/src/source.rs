//! Remote event source contract.
//!
//! The view around the layout engine loads the visible week's events through
//! an [`EventSource`] and toggles a loading indicator while doing so. The
//! layout path itself never calls a source.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use crate::error::Result;
use crate::event::{wall_clock, RoomEvent};

/// The time range a source is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryRange {
    #[serde(with = "wall_clock")]
    pub start: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub end: NaiveDateTime,
}

impl QueryRange {
    /// The visible week around `selected`.
    ///
    /// The week starts on `week_start_on`; `week_days` are offsets (0-6) from
    /// that day of the days shown. The range runs from the start of the first
    /// listed day to the last second of the last listed day. An empty
    /// `week_days` covers the whole week.
    pub fn for_week(selected: NaiveDate, week_start_on: Weekday, week_days: &[u32]) -> Self {
        let back = (7 + selected.weekday().num_days_from_monday()
            - week_start_on.num_days_from_monday())
            % 7;
        let week_start = selected - Duration::days(back as i64);

        let first = week_days.first().copied().unwrap_or(0);
        let last = week_days.last().copied().unwrap_or(6);

        let start = (week_start + Duration::days(first as i64)).and_time(NaiveTime::MIN);
        let end = (week_start + Duration::days(last as i64)).and_time(NaiveTime::MIN)
            + Duration::days(1)
            - Duration::seconds(1);
        Self { start, end }
    }

    /// `?start=..&end=..` as appended to a remote endpoint.
    pub fn to_query_string(&self) -> String {
        format!(
            "?start={}&end={}",
            wall_clock::format(&self.start),
            wall_clock::format(&self.end)
        )
    }
}

/// Something that can produce the events of a range.
pub trait EventSource {
    fn fetch(&self, range: &QueryRange) -> Result<Vec<RoomEvent>>;
}

impl<F> EventSource for F
where
    F: Fn(&QueryRange) -> Result<Vec<RoomEvent>>,
{
    fn fetch(&self, range: &QueryRange) -> Result<Vec<RoomEvent>> {
        self(range)
    }
}

/// A loading flag owned by the surrounding view.
pub trait LoadingIndicator {
    fn set_loading(&mut self, loading: bool);
}

impl LoadingIndicator for bool {
    fn set_loading(&mut self, loading: bool) {
        *self = loading;
    }
}

/// Clears the indicator when dropped.
struct LoadingGuard<'a, L: LoadingIndicator + ?Sized> {
    indicator: &'a mut L,
}

impl<'a, L: LoadingIndicator + ?Sized> LoadingGuard<'a, L> {
    fn start(indicator: &'a mut L) -> Self {
        indicator.set_loading(true);
        Self { indicator }
    }
}

impl<L: LoadingIndicator + ?Sized> Drop for LoadingGuard<'_, L> {
    fn drop(&mut self) {
        self.indicator.set_loading(false);
    }
}

/// Fetch a range from `source` with the indicator raised for the duration.
///
/// The indicator is lowered on every exit path, including errors and panics
/// inside the source.
///
/// # Errors
/// Whatever the source returns; sources should report transport failures as
/// `LayoutError::Fetch`.
pub fn load_events<S, L>(source: &S, indicator: &mut L, range: &QueryRange) -> Result<Vec<RoomEvent>>
where
    S: EventSource + ?Sized,
    L: LoadingIndicator + ?Sized,
{
    let _guard = LoadingGuard::start(indicator);
    log::debug!("fetching events {}", range.to_query_string());
    let events = source.fetch(range).inspect_err(|e| {
        log::warn!("event fetch failed: {}", e);
    })?;
    log::debug!("fetched {} events", events.len());
    Ok(events)
}

