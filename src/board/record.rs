//! Move-log types.
//!
//! A game record is a chronological list of half-moves. Piece steps are
//! stored with absolute cells already resolved, so consumers never need to
//! re-run the jump simulation.

use serde::Serialize;

use super::cell::{Cell, Orientation, Player, WallAnchor};

/// One half-move from a game record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveLogEntry {
    /// A piece step: `from` and `to` are absolute cells.
    PieceStep { player: Player, from: Cell, to: Cell },

    /// A wall placement.
    WallPlacement {
        player: Player,
        orientation: Orientation,
        anchor: WallAnchor,
    },
}

impl MoveLogEntry {
    /// The player who made this move.
    pub const fn player(&self) -> Player {
        match *self {
            MoveLogEntry::PieceStep { player, .. } => player,
            MoveLogEntry::WallPlacement { player, .. } => player,
        }
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, MoveLogEntry::WallPlacement { .. })
    }
}

/// A decoded game record with its two playback cursors.
///
/// `current` indexes all entries; `current_wall` indexes wall placements
/// only. Both start at 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MoveLog {
    entries: Vec<MoveLogEntry>,
    current: usize,
    current_wall: usize,
}

impl MoveLog {
    /// Creates a log positioned at its start.
    pub fn new(entries: Vec<MoveLogEntry>) -> Self {
        MoveLog {
            entries,
            current: 0,
            current_wall: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MoveLogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&MoveLogEntry> {
        self.entries.get(index)
    }

    /// Wall placements only, in order.
    pub fn walls(&self) -> impl Iterator<Item = &MoveLogEntry> {
        self.entries.iter().filter(|e| e.is_wall())
    }

    pub fn wall_count(&self) -> usize {
        self.walls().count()
    }

    /// Index of the next entry to play.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the next wall placement to play.
    pub fn current_wall(&self) -> usize {
        self.current_wall
    }

    /// Moves both cursors forward past the entry at `current`.
    /// Returns the entry, or `None` at the end of the log.
    pub fn advance(&mut self) -> Option<MoveLogEntry> {
        let entry = *self.entries.get(self.current)?;
        self.current += 1;
        if entry.is_wall() {
            self.current_wall += 1;
        }
        Some(entry)
    }

    /// Moves both cursors back over the previous entry.
    /// Returns that entry, or `None` at the start of the log.
    pub fn retreat(&mut self) -> Option<MoveLogEntry> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        let entry = self.entries[self.current];
        if entry.is_wall() {
            self.current_wall -= 1;
        }
        Some(entry)
    }
}
