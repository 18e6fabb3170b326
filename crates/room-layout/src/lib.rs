//! # room-layout
//!
//! Deterministic event layout for resource ("room") scheduler grids.
//!
//! A room view shows one day as a grid: rooms are rows, fixed time slots are
//! columns. This crate computes everything the grid needs short of drawing
//! it: the slot sequence and cell height, which events cross each other in
//! time, and where each event sits (row offset, width, fan-out offset).
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use room_layout::{GridConfig, RoomConfig, RoomEvent, RoomLayout};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
//! let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
//! let config = RoomConfig::new(GridConfig::new(day).hours(9, 17).step(30).cell_height(40.0));
//! let events = vec![
//!     RoomEvent::new(1, at(9, 0), at(9, 30), 0),
//!     RoomEvent::new(2, at(9, 15), at(9, 45), 0),
//! ];
//!
//! let layout = RoomLayout::compute(&config, &events).unwrap();
//! assert_eq!(layout.grid.len(), 17);
//! assert_eq!(layout.placements[1].style.left.as_deref(), Some("calc(100%/2)"));
//! ```
//!
//! ## Modules
//!
//! - [`grid`] — day range + step → ordered time slots and cell height
//! - [`crossing`] — half-open overlap detection (per event, or all at once by sweep line)
//! - [`placement`] — event + crossing set → placement rectangle
//! - [`rows`] — room id → row index lookup
//! - [`render`] — a full render pass tying the above together
//! - [`source`] — remote event source contract and loading-state handling
//! - [`event`] — the event model
//! - [`error`] — Error types

pub mod crossing;
pub mod error;
pub mod event;
pub mod grid;
pub mod placement;
pub mod render;
pub mod rows;
pub mod source;

pub use crossing::{crossing_sets, find_crossing_events, overlaps};
pub use error::LayoutError;
pub use event::{validate_events, EventId, RoomEvent};
pub use grid::{GridConfig, TimeGrid, TimeSlot};
pub use placement::{Direction, PlacementEngine, PlacementRect, RenderedSet};
pub use render::{PlacedEvent, RoomConfig, RoomLayout};
pub use rows::{ResourceRows, Room, RowMapping};
pub use source::{load_events, EventSource, LoadingIndicator, QueryRange};
