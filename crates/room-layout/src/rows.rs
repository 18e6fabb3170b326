//! Resource-to-row lookup -- decides which grid row a room's events sit in.
//!
//! Built once per render from the configuration and the day's events.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::event::RoomEvent;

/// How room ids map onto rows when no rooms are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowMapping {
    /// Row index is the room id itself. Sparse ids leave empty rows.
    #[default]
    Identity,
    /// Distinct room ids present in the day, ascending, packed into rows 0..n.
    Compact,
}

/// A declared room, shown as a row header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub label: String,
}

impl Room {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Header of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowHeader {
    pub row: usize,
    pub room_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
enum Lookup {
    Identity,
    Table(HashMap<i64, usize>),
}

/// Lookup table from `room_id` to row index.
#[derive(Debug, Clone)]
pub struct ResourceRows {
    lookup: Lookup,
    headers: Vec<RowHeader>,
}

impl ResourceRows {
    /// `room_id` is used directly as the row index; negative ids have no row.
    ///
    /// Headers are emitted only for the distinct non-negative room ids of
    /// the given events. Rows between them stay empty and get no header.
    pub fn identity(events: &[RoomEvent]) -> Self {
        let ids: BTreeSet<i64> = events
            .iter()
            .map(|e| e.room_id)
            .filter(|&id| id >= 0)
            .collect();
        let headers = ids
            .into_iter()
            .filter_map(|room_id| {
                let row = usize::try_from(room_id).ok()?;
                Some(RowHeader {
                    row,
                    room_id,
                    label: None,
                })
            })
            .collect();
        Self {
            lookup: Lookup::Identity,
            headers,
        }
    }

    /// Distinct room ids of `events`, ascending, mapped to contiguous rows.
    pub fn compact(events: &[RoomEvent]) -> Self {
        let ids: BTreeSet<i64> = events.iter().map(|e| e.room_id).collect();
        Self::from_ordered_ids(ids.into_iter().map(|id| (id, None)))
    }

    /// Rows follow the declared room order. Rooms not declared have no row.
    pub fn declared(rooms: &[Room]) -> Self {
        Self::from_ordered_ids(rooms.iter().map(|r| (r.id, Some(r.label.clone()))))
    }

    fn from_ordered_ids(ids: impl Iterator<Item = (i64, Option<String>)>) -> Self {
        let mut table = HashMap::new();
        let mut headers = Vec::new();
        for (room_id, label) in ids {
            // First declaration wins for repeated ids.
            if table.contains_key(&room_id) {
                continue;
            }
            let row = headers.len();
            table.insert(room_id, row);
            headers.push(RowHeader {
                row,
                room_id,
                label,
            });
        }
        Self {
            lookup: Lookup::Table(table),
            headers,
        }
    }

    /// Build the rows for one render.
    ///
    /// Declared rooms take precedence over `mapping`.
    pub fn for_render(rooms: &[Room], mapping: RowMapping, events: &[RoomEvent]) -> Self {
        if !rooms.is_empty() {
            return Self::declared(rooms);
        }
        match mapping {
            RowMapping::Identity => Self::identity(events),
            RowMapping::Compact => Self::compact(events),
        }
    }

    /// Row index of a room, or `None` if the room has no row.
    pub fn row_of(&self, room_id: i64) -> Option<usize> {
        match &self.lookup {
            Lookup::Identity => usize::try_from(room_id).ok(),
            Lookup::Table(table) => table.get(&room_id).copied(),
        }
    }

    pub fn headers(&self) -> &[RowHeader] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
