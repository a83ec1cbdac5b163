//! Per-turn data collection.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, MatchSnapshot};
use crate::error::Result;

/// Everything recorded about one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// Name of the acting player.
    pub active_player: String,
    pub match_state_before: MatchSnapshot,
    pub actions_taken: Vec<ActionRecord>,
    pub match_state_after: MatchSnapshot,
}

/// Append-only receiver of turn records.
pub trait SnapshotSink {
    fn record(&mut self, record: TurnRecord) -> Result<()>;

    /// Called once when the match ends.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A collector shared with the caller, who can read it after the match.
impl<S: SnapshotSink + ?Sized> SnapshotSink for Rc<RefCell<S>> {
    fn record(&mut self, record: TurnRecord) -> Result<()> {
        self.borrow_mut().record(record)
    }

    fn flush(&mut self) -> Result<()> {
        self.borrow_mut().flush()
    }
}

/// Keeps every record in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryCollector {
    records: Vec<TurnRecord>,
    flushed: bool,
}

impl MemoryCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TurnRecord> {
        self.records
    }

    #[must_use]
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }
}

impl SnapshotSink for MemoryCollector {
    fn record(&mut self, record: TurnRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushed = true;
        Ok(())
    }
}

/// Buffers records and writes them as JSON lines on flush.
#[derive(Debug)]
pub struct JsonLinesCollector<W: Write> {
    writer: W,
    pending: Vec<TurnRecord>,
}

impl<W: Write> JsonLinesCollector<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::new(),
        }
    }

    /// Records not yet written.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for JsonLinesCollector<W> {
    fn record(&mut self, record: TurnRecord) -> Result<()> {
        self.pending.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        for record in self.pending.drain(..) {
            serde_json::to_writer(&mut self.writer, &record)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
