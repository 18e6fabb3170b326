//! Turn an event and its crossing set into a placement rectangle.
//!
//! Placement is deterministic given the iteration order: events must be
//! placed slot by slot, and within a slot in ascending end order, threading
//! one [`RenderedSet`] through the whole pass.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::event::{EventId, RoomEvent};

/// Text direction of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// The side overlapping events fan out from.
    pub fn offset_side(self) -> Side {
        match self {
            Direction::Ltr => Side::Left,
            Direction::Rtl => Side::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Horizontal shift of `100% / divisor` from `side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HorizontalOffset {
    pub side: Side,
    pub divisor: usize,
}

impl HorizontalOffset {
    pub fn percent(&self) -> f64 {
        100.0 / self.divisor as f64
    }
}

/// Position and size of one event inside its row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementRect {
    /// Offset from the top of the grid body, in pixels.
    pub top: f64,
    /// Width relative to one cell, in percent.
    pub width_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<HorizontalOffset>,
}

/// CSS-style rendering of a [`PlacementRect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventStyle {
    pub top: String,
    pub width: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl PlacementRect {
    pub fn style(&self) -> EventStyle {
        let shift = self
            .offset
            .map(|o| (o.side, format!("calc(100%/{})", o.divisor)));
        let (left, right) = match shift {
            Some((Side::Left, value)) => (Some(value), None),
            Some((Side::Right, value)) => (None, Some(value)),
            None => (None, None),
        };
        EventStyle {
            top: format!("{}px", self.top),
            width: format!("{}%", self.width_pct),
            left,
            right,
        }
    }
}

/// Width of an event in percent of one cell.
///
/// `100 * (duration / step + 1)`: the extra unit keeps zero-length events one
/// cell wide. Malformed events (`end < start`) yield a negative width.
pub fn event_width_pct(event: &RoomEvent, step: u32) -> f64 {
    100.0 * (event.duration_minutes() as f64 / step as f64 + 1.0)
}

/// Ids of the events already placed during the current render pass.
///
/// Grows monotonically and is passed by value from one placement to the next.
/// A fresh set must be used for every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSet {
    ids: HashSet<EventId>,
}

impl RenderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    /// Record `id` as rendered.
    pub fn mark(mut self, id: EventId) -> Self {
        self.ids.insert(id);
        self
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Result of placing a single event.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub rect: PlacementRect,
    /// Members of the crossing set already rendered when this event was placed.
    pub already_rendered: Vec<EventId>,
}

/// Per-render placement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEngine {
    pub step: u32,
    pub cell_height: f64,
    pub direction: Direction,
}

impl PlacementEngine {
    pub fn new(step: u32, cell_height: f64, direction: Direction) -> Self {
        Self {
            step,
            cell_height,
            direction,
        }
    }

    /// Place `event` in `row` given its crossing set.
    ///
    /// The crossing members found in `rendered` decide the horizontal offset;
    /// the event is then marked rendered in the returned set so that later
    /// crossing events offset past it.
    pub fn place(
        &self,
        event: &RoomEvent,
        row: usize,
        crossing: &[&RoomEvent],
        rendered: RenderedSet,
    ) -> (Placement, RenderedSet) {
        let already_rendered: Vec<EventId> = crossing
            .iter()
            .filter(|e| rendered.contains(&e.event_id))
            .map(|e| e.event_id.clone())
            .collect();
        let rendered = rendered.mark(event.event_id.clone());

        let offset = (!already_rendered.is_empty()).then(|| HorizontalOffset {
            side: self.direction.offset_side(),
            divisor: already_rendered.len() + 1,
        });

        let rect = PlacementRect {
            top: row as f64 * self.cell_height,
            width_pct: event_width_pct(event, self.step),
            offset,
        };

        log::trace!(
            "placed event {} in row {}: top {}, width {}%, {} already rendered",
            event.event_id,
            row,
            rect.top,
            rect.width_pct,
            already_rendered.len()
        );

        (
            Placement {
                rect,
                already_rendered,
            },
            rendered,
        )
    }
}
