//! Observers of a running match.
//!
//! - `SnapshotSink`: one `TurnRecord` per turn for data collection,
//!   flushed when the match ends
//! - `RenderSink`: board view after every executed action; best effort
//!
//! Both are optional. The match calls them synchronously and never reads
//! anything back.

pub mod collector;
pub mod render;

pub use collector::{JsonLinesCollector, MemoryCollector, SnapshotSink, TurnRecord};
pub use render::{BoardView, RenderSink, TextRenderer};
