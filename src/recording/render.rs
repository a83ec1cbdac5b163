//! Board display adapters.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::{CardSnapshot, GameState};
use crate::error::Result;

/// One side of the board as shown to a display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub name: String,
    pub points: u32,
    pub active: Option<CardSnapshot>,
    pub bench: Vec<CardSnapshot>,
}

/// Both players' active and bench cards, first seat first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub turn: u32,
    pub sides: Vec<SideView>,
}

impl BoardView {
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        let sides = state
            .players
            .iter()
            .map(|(_, player)| SideView {
                name: player.name.clone(),
                points: player.points,
                active: player.active.as_ref().map(CardSnapshot::of),
                bench: player.bench.iter().map(CardSnapshot::of).collect(),
            })
            .collect();
        Self {
            turn: state.turn,
            sides,
        }
    }
}

/// Observer notified after every executed action.
///
/// Errors are logged by the caller and otherwise ignored.
pub trait RenderSink {
    fn render(&mut self, view: &BoardView) -> Result<()>;
}

/// Writes a one-line-per-side text board.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn describe(card: &CardSnapshot) -> String {
    format!("{} {}/{}", card.name, card.hp, card.max_hp)
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn render(&mut self, view: &BoardView) -> Result<()> {
        for side in &view.sides {
            let active = side.active.as_ref().map_or_else(|| "-".to_string(), describe);
            let bench: Vec<_> = side.bench.iter().map(describe).collect();
            writeln!(
                self.out,
                "[turn {}] {} ({} pts): {} | bench [{}]",
                view.turn,
                side.name,
                side.points,
                active,
                bench.join(", ")
            )?;
        }
        Ok(())
    }
}
