//! Time grid construction -- discretizes a day's hour range into fixed slots.
//!
//! The grid is a pure function of its configuration and is rebuilt on every
//! render; nothing here is cached.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::event::wall_clock;

pub const DEFAULT_START_HOUR: u32 = 9;
pub const DEFAULT_END_HOUR: u32 = 17;
pub const DEFAULT_STEP_MINUTES: u32 = 60;
pub const DEFAULT_AVAILABLE_HEIGHT: f64 = 600.0;

/// Configuration of the day's time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// The day being rendered.
    pub day: NaiveDate,
    /// First hour shown (inclusive), 0-23.
    #[serde(default = "default_start_hour", alias = "startHour")]
    pub start_hour: u32,
    /// Last hour shown (inclusive), 1-24.
    #[serde(default = "default_end_hour", alias = "endHour")]
    pub end_hour: u32,
    /// Slot length in minutes.
    #[serde(default = "default_step")]
    pub step: u32,
    /// Vertical space shared between all slots, in pixels.
    #[serde(default = "default_available_height", alias = "height")]
    pub available_height: f64,
    /// Fixed cell height in pixels; overrides the derived value.
    #[serde(default, alias = "cellHeight", alias = "cellHeightPx", skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<f64>,
    /// Lower bound applied to the derived cell height.
    #[serde(default, alias = "minCellHeight", skip_serializing_if = "Option::is_none")]
    pub min_cell_height: Option<f64>,
}

fn default_start_hour() -> u32 {
    DEFAULT_START_HOUR
}

fn default_end_hour() -> u32 {
    DEFAULT_END_HOUR
}

fn default_step() -> u32 {
    DEFAULT_STEP_MINUTES
}

fn default_available_height() -> f64 {
    DEFAULT_AVAILABLE_HEIGHT
}

impl GridConfig {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            step: DEFAULT_STEP_MINUTES,
            available_height: DEFAULT_AVAILABLE_HEIGHT,
            cell_height: None,
            min_cell_height: None,
        }
    }

    pub fn hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    pub fn step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    pub fn cell_height(mut self, cell_height: f64) -> Self {
        self.cell_height = Some(cell_height);
        self
    }

    pub fn available_height(mut self, available_height: f64) -> Self {
        self.available_height = available_height;
        self
    }

    /// Reject configurations the grid cannot be built from.
    ///
    /// # Errors
    /// Returns `LayoutError::InvalidHourRange` unless `start_hour < end_hour <= 24`.
    /// Returns `LayoutError::InvalidStep` if `step` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(LayoutError::InvalidHourRange {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.step == 0 {
            return Err(LayoutError::InvalidStep(self.step));
        }
        Ok(())
    }

    /// `day@hour:00`. Hour 24 is midnight of the following day.
    fn at_hour(&self, hour: u32) -> NaiveDateTime {
        self.day.and_time(NaiveTime::MIN) + Duration::hours(hour as i64)
    }
}

/// One column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub index: usize,
    #[serde(with = "wall_clock")]
    pub start: NaiveDateTime,
}

/// The discretized time axis of one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    pub slots: Vec<TimeSlot>,
    /// `day@end_hour:00`, the closing instant of the last cell.
    #[serde(with = "wall_clock")]
    pub end: NaiveDateTime,
    /// Slot length in minutes.
    pub step: u32,
    /// Height of one cell in pixels.
    pub cell_height: f64,
}

impl TimeGrid {
    /// Build the slot sequence `day@start_hour:00 ..= day@end_hour:00` every
    /// `step` minutes.
    ///
    /// Slot count is `(end_hour - start_hour) * 60 / step + 1`; a remainder
    /// that does not fill a whole step is truncated, so the last slot is then
    /// earlier than `day@end_hour:00`.
    pub fn build(config: &GridConfig) -> Result<TimeGrid> {
        config.validate()?;

        let first = config.at_hour(config.start_hour);
        let range_minutes = (config.end_hour - config.start_hour) as i64 * 60;
        let count = (range_minutes / config.step as i64) as usize + 1;
        let step = Duration::minutes(config.step as i64);

        let slots: Vec<TimeSlot> = (0..count)
            .map(|index| TimeSlot {
                index,
                start: first + step * index as i32,
            })
            .collect();

        let derived = config
            .cell_height
            .unwrap_or(config.available_height / count as f64);
        let cell_height = match config.min_cell_height {
            Some(min) => derived.max(min),
            None => derived,
        };

        log::debug!(
            "built time grid for {}: {} slots of {} min, cell height {}",
            config.day,
            count,
            config.step,
            cell_height
        );

        Ok(TimeGrid {
            slots,
            end: config.at_hour(config.end_hour),
            step: config.step,
            cell_height,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn first(&self) -> Option<&TimeSlot> {
        self.slots.first()
    }

    pub fn last(&self) -> Option<&TimeSlot> {
        self.slots.last()
    }

    /// Pixel height of one minute, `ceil(cell_height) / step`.
    pub fn minute_height(&self) -> f64 {
        self.cell_height.ceil() / self.step as f64
    }

    /// The half-open interval `[start, start + step)` a cell covers.
    pub fn cell_bounds(&self, slot: &TimeSlot) -> (NaiveDateTime, NaiveDateTime) {
        (slot.start, slot.start + Duration::minutes(self.step as i64))
    }

    /// Index of the slot whose cell contains `instant`, if any.
    ///
    /// Cells are `[start, start + step)` but never reach past [`Self::end`],
    /// so the last slot only takes instants up to and including the end.
    pub fn slot_containing(&self, instant: NaiveDateTime) -> Option<usize> {
        let first = self.first()?;
        if instant < first.start || instant > self.end {
            return None;
        }
        let offset = (instant - first.start).num_minutes();
        let index = (offset / self.step as i64) as usize;
        (index < self.slots.len()).then_some(index)
    }
}
