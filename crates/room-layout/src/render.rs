//! One render pass over a room day.
//!
//! Builds the grid, buckets events into the slot their start falls in, and
//! folds the placement engine over slots in order (events within a slot by
//! ascending end), threading the rendered-id set through the fold.

use serde::{Deserialize, Serialize};

use crate::crossing;
use crate::error::Result;
use crate::event::{EventId, RoomEvent};
use crate::grid::{GridConfig, TimeGrid};
use crate::placement::{Direction, EventStyle, PlacementEngine, PlacementRect, RenderedSet};
use crate::rows::{ResourceRows, Room, RowHeader, RowMapping};

/// Everything a render pass is configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    #[serde(flatten)]
    pub grid: GridConfig,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, alias = "rowMapping")]
    pub row_mapping: RowMapping,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rooms: Vec<Room>,
}

impl RoomConfig {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            direction: Direction::default(),
            row_mapping: RowMapping::default(),
            rooms: Vec::new(),
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn row_mapping(mut self, row_mapping: RowMapping) -> Self {
        self.row_mapping = row_mapping;
        self
    }

    pub fn rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }
}

/// An event positioned on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent {
    pub event_id: EventId,
    pub room_id: i64,
    pub slot_index: usize,
    pub row: usize,
    /// Ids of the events crossing this one, in input order.
    pub crossing: Vec<EventId>,
    /// Crossing events that were placed before this one.
    pub already_rendered: Vec<EventId>,
    pub rect: PlacementRect,
    pub style: EventStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// The event does not start inside any slot of the grid.
    OutsideGrid,
    /// The event's room has no row.
    NoRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnplacedEvent {
    pub event_id: EventId,
    pub reason: UnplacedReason,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomLayout {
    pub grid: TimeGrid,
    pub rows: Vec<RowHeader>,
    /// Placements in render order.
    pub placements: Vec<PlacedEvent>,
    pub unplaced: Vec<UnplacedEvent>,
}

impl RoomLayout {
    /// Lay out a day's events.
    ///
    /// # Errors
    /// Only configuration errors from [`GridConfig::validate`]; events are
    /// assumed valid (see [`crate::event::validate_events`]).
    pub fn compute(config: &RoomConfig, events: &[RoomEvent]) -> Result<RoomLayout> {
        let grid = TimeGrid::build(&config.grid)?;
        let rows = ResourceRows::for_render(&config.rooms, config.row_mapping, events);
        let crossings = crossing::crossing_sets(events);
        let engine = PlacementEngine::new(grid.step, grid.cell_height, config.direction);

        let mut unplaced = Vec::new();
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); grid.len()];
        for (i, event) in events.iter().enumerate() {
            match grid.slot_containing(event.start) {
                Some(slot) => buckets[slot].push(i),
                None => {
                    log::warn!("event {} starts outside the grid, skipping", event.event_id);
                    unplaced.push(UnplacedEvent {
                        event_id: event.event_id.clone(),
                        reason: UnplacedReason::OutsideGrid,
                    });
                }
            }
        }
        // Stable, so equal end times keep input order.
        for bucket in &mut buckets {
            bucket.sort_by_key(|&i| events[i].end);
        }

        let (placements, rendered) = buckets
            .iter()
            .enumerate()
            .flat_map(|(slot, bucket)| bucket.iter().map(move |&i| (slot, i)))
            .fold(
                (Vec::with_capacity(events.len()), RenderedSet::new()),
                |(mut placed, rendered), (slot_index, i)| {
                    let event = &events[i];
                    let Some(row) = rows.row_of(event.room_id) else {
                        log::warn!(
                            "event {} belongs to room {} which has no row, skipping",
                            event.event_id,
                            event.room_id
                        );
                        unplaced.push(UnplacedEvent {
                            event_id: event.event_id.clone(),
                            reason: UnplacedReason::NoRow,
                        });
                        return (placed, rendered);
                    };

                    let crossing: Vec<&RoomEvent> =
                        crossings[i].iter().map(|&j| &events[j]).collect();
                    let (placement, rendered) = engine.place(event, row, &crossing, rendered);

                    placed.push(PlacedEvent {
                        event_id: event.event_id.clone(),
                        room_id: event.room_id,
                        slot_index,
                        row,
                        crossing: crossing.iter().map(|e| e.event_id.clone()).collect(),
                        already_rendered: placement.already_rendered,
                        style: placement.rect.style(),
                        rect: placement.rect,
                    });
                    (placed, rendered)
                },
            );

        log::debug!(
            "laid out {} of {} events over {} slots and {} rows ({} rendered ids)",
            placements.len(),
            events.len(),
            grid.len(),
            rows.len(),
            rendered.len()
        );

        Ok(RoomLayout {
            rows: rows.headers().to_vec(),
            grid,
            placements,
            unplaced,
        })
    }

    /// The placement of a given event, if it was placed.
    pub fn placement(&self, event_id: &EventId) -> Option<&PlacedEvent> {
        self.placements.iter().find(|p| &p.event_id == event_id)
    }
}
