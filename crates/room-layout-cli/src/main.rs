//! `room-layout` CLI — build time grids and lay out room events from JSON.
//!
//! ## Usage
//!
//! The input document holds a room configuration and the day's events:
//!
//! ```json
//! {
//!   "config": {"day": "2026-03-02", "startHour": 9, "endHour": 17, "step": 30},
//!   "events": [{"event_id": 1, "start": "2026-03-02T09:00:00", "end": "2026-03-02T09:30:00", "room_id": 0}]
//! }
//! ```
//!
//! ```sh
//! # Slot sequence and cell height
//! room-layout grid -i day.json
//!
//! # Crossing sets of every event, or of one event
//! room-layout crossings -i day.json
//! room-layout crossings -i day.json --event 1
//!
//! # Full layout, overriding the step and direction
//! cat day.json | room-layout layout --step 15 --direction rtl -o layout.json
//! ```
//!
//! Set `RUST_LOG=debug` to see what the layout engine is doing.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use room_layout::{
    crossing_sets, find_crossing_events, validate_events, Direction, EventId, RoomConfig,
    RoomEvent, RoomLayout, TimeGrid,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "room-layout",
    version,
    about = "Room scheduler grid layout CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the day's time slots and cell height
    Grid {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the crossing (overlapping) events of each event
    Crossings {
        #[command(flatten)]
        io: IoArgs,
        /// Only report the events crossing this event id
        #[arg(long)]
        event: Option<String>,
    },
    /// Lay out the day's events on the room grid
    Layout {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        overrides: Overrides,
        /// Reject malformed events and duplicate ids before laying out
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct Overrides {
    /// Slot length in minutes
    #[arg(long)]
    step: Option<u32>,
    /// First hour of the grid
    #[arg(long)]
    start_hour: Option<u32>,
    /// Last hour of the grid
    #[arg(long)]
    end_hour: Option<u32>,
    /// Text direction
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Ltr,
    Rtl,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Ltr => Direction::Ltr,
            DirectionArg::Rtl => Direction::Rtl,
        }
    }
}

impl Overrides {
    fn apply(&self, config: &mut RoomConfig) {
        if let Some(step) = self.step {
            config.grid.step = step;
        }
        if let Some(start_hour) = self.start_hour {
            config.grid.start_hour = start_hour;
        }
        if let Some(end_hour) = self.end_hour {
            config.grid.end_hour = end_hour;
        }
        if let Some(direction) = self.direction {
            config.direction = direction.into();
        }
    }
}

/// The JSON document every subcommand reads.
#[derive(Deserialize)]
struct DayDocument {
    config: RoomConfig,
    #[serde(default)]
    events: Vec<RoomEvent>,
}

#[derive(Serialize)]
struct CrossingEntry<'a> {
    event_id: &'a EventId,
    crossing: Vec<&'a EventId>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Grid { io, overrides } => {
            let mut doc = read_document(io.input.as_deref())?;
            overrides.apply(&mut doc.config);
            let grid = TimeGrid::build(&doc.config.grid).context("Invalid grid configuration")?;
            write_json(io.output.as_deref(), &grid)?;
        }
        Commands::Crossings { io, event } => {
            let doc = read_document(io.input.as_deref())?;
            let json = match event {
                Some(raw) => {
                    let id = parse_event_id(&raw);
                    let target = doc
                        .events
                        .iter()
                        .find(|e| e.event_id == id)
                        .with_context(|| format!("Unknown event id: {}", raw))?;
                    to_pretty(&find_crossing_events(&doc.events, target))?
                }
                None => {
                    let sets = crossing_sets(&doc.events);
                    let entries: Vec<CrossingEntry> = doc
                        .events
                        .iter()
                        .zip(&sets)
                        .map(|(event, set)| CrossingEntry {
                            event_id: &event.event_id,
                            crossing: set.iter().map(|&j| &doc.events[j].event_id).collect(),
                        })
                        .collect();
                    to_pretty(&entries)?
                }
            };
            write_output(io.output.as_deref(), &json)?;
        }
        Commands::Layout {
            io,
            overrides,
            strict,
        } => {
            let mut doc = read_document(io.input.as_deref())?;
            overrides.apply(&mut doc.config);
            if strict {
                validate_events(&doc.events).context("Event validation failed")?;
            }
            let layout =
                RoomLayout::compute(&doc.config, &doc.events).context("Failed to lay out events")?;
            for unplaced in &layout.unplaced {
                log::warn!("event {} not placed: {:?}", unplaced.event_id, unplaced.reason);
            }
            write_json(io.output.as_deref(), &layout)?;
        }
    }

    Ok(())
}

/// Numeric ids are matched as numbers, anything else as a string.
fn parse_event_id(raw: &str) -> EventId {
    raw.parse::<i64>()
        .map(EventId::Int)
        .unwrap_or_else(|_| EventId::Text(raw.to_string()))
}

fn read_document(path: Option<&str>) -> Result<DayDocument> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse input document")
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let json = to_pretty(value)?;
    write_output(path, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
