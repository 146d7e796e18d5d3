//! Extraction of the MetalDays running order from the festival's lineup page.
//!
//! The lineup is published as one loosely-structured HTML document; this crate
//! recognizes its day/stage/event markers, pulls out the labels and links, and
//! resolves the partial date and time labels into absolute timestamps in the
//! festival timezone. The engine is deliberately tied to that page's markup
//! conventions and fails loudly when they change.

pub mod dom;
pub mod error;
pub mod model;
pub mod parser;
pub mod timestamps;

pub use error::{ExtractError, Level};
pub use model::{Day, Event, RunningOrder, Stage, TimeRange};
pub use parser::{extract_running_order, parse_running_order};
pub use timestamps::{resolve_day_range, resolve_day_start, resolve_event_range, FESTIVAL_TZ};
