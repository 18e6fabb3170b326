//! WASM bindings for room-layout.
//!
//! Exposes time grid building, crossing detection and the full room layout to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON strings.
//! The JSON handling lives in [`api`], which returns plain `String` errors so
//! it can run natively; the exports only convert those errors to `JsValue`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p room-layout-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/room_layout_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

pub mod api {
    use room_layout::{find_crossing_events, EventId, GridConfig, RoomConfig, RoomEvent, RoomLayout, TimeGrid};
    use serde::Serialize;

    fn parse_events_json(json: &str) -> Result<Vec<RoomEvent>, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
    }

    fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
    }

    /// `config_json` is a grid configuration object; returns the grid.
    pub fn build_time_grid(config_json: &str) -> Result<String, String> {
        let config: GridConfig = serde_json::from_str(config_json)
            .map_err(|e| format!("Invalid config JSON: {}", e))?;
        let grid = TimeGrid::build(&config).map_err(|e| e.to_string())?;
        to_json(&grid)
    }

    /// Events crossing the event with id `event_id_json` (a JSON number or
    /// string), in input order.
    pub fn find_crossing(events_json: &str, event_id_json: &str) -> Result<String, String> {
        let events = parse_events_json(events_json)?;
        let event_id: EventId = serde_json::from_str(event_id_json)
            .map_err(|e| format!("Invalid event id: {}", e))?;
        let target = events
            .iter()
            .find(|e| e.event_id == event_id)
            .ok_or_else(|| format!("Unknown event id: {}", event_id))?;

        to_json(&find_crossing_events(&events, target))
    }

    /// Full render pass: `config_json` is a room configuration, `events_json`
    /// an array of events.
    pub fn layout_room(config_json: &str, events_json: &str) -> Result<String, String> {
        let config: RoomConfig = serde_json::from_str(config_json)
            .map_err(|e| format!("Invalid config JSON: {}", e))?;
        let events = parse_events_json(events_json)?;
        let layout = RoomLayout::compute(&config, &events).map_err(|e| e.to_string())?;
        to_json(&layout)
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build the time grid for a day.
///
/// `config_json` is `{day, startHour, endHour, step, height?, cellHeight?}`.
/// Returns `{slots: [{index, start}], end, step, cell_height}`.
#[wasm_bindgen(js_name = "buildTimeGrid")]
pub fn build_time_grid(config_json: &str) -> Result<String, JsValue> {
    api::build_time_grid(config_json).map_err(|e| JsValue::from_str(&e))
}

/// Find the events crossing one event of the day.
///
/// `events_json` is an array of `{event_id, start, end, room_id}` objects;
/// `event_id_json` is the target's id as JSON (`3` or `"abc"`).
#[wasm_bindgen(js_name = "findCrossingEvents")]
pub fn find_crossing_events(events_json: &str, event_id_json: &str) -> Result<String, JsValue> {
    api::find_crossing(events_json, event_id_json).map_err(|e| JsValue::from_str(&e))
}

/// Lay out a day's events on the room grid.
///
/// Returns the grid, row headers, placements (with CSS-style `top`, `width`,
/// `left`/`right`) and any events that could not be placed.
#[wasm_bindgen(js_name = "layoutRoom")]
pub fn layout_room(config_json: &str, events_json: &str) -> Result<String, JsValue> {
    api::layout_room(config_json, events_json).map_err(|e| JsValue::from_str(&e))
}
