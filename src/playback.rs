//! Stepping through a decoded game record.
//!
//! A `Playback` owns its own copy of a decoded code and moves a cursor back
//! and forth over the record, keeping piece cells, walls on the board, wall
//! counts, the turn counter and the side to move in step. Piece steps carry
//! absolute cells, so nothing is re-simulated here.

use serde::Serialize;

use crate::board::{
    category_parts, wall_category, Cell, LastMove, MoveLog, MoveLogEntry, Orientation, Player,
    WallAnchor, WALL_CATEGORY_COUNT, WALL_LIMIT,
};
use crate::protocol::qfcode::Decoded;

/// A wall on the board during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedWall {
    pub player: Player,
    pub orientation: Orientation,
    pub anchor: WallAnchor,
    /// True for walls placed by the record rather than the state block.
    pub from_record: bool,
}

/// The most recent move at the current ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "move", rename_all = "snake_case")]
pub enum Highlight {
    /// At ply 0: the last move stored in the state block.
    State(LastMove),
    /// The record entry that led to the current ply.
    Record(MoveLogEntry),
}

/// Everything a board front end needs to draw the current ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub pieces: [Cell; 2],
    pub walls: Vec<PlacedWall>,
    pub wall_counts: [usize; WALL_CATEGORY_COUNT],
    pub walls_remaining: [usize; 2],
    pub turn_number: u16,
    pub turn: Player,
    pub ply: usize,
    pub record_length: usize,
    pub last_move: Option<Highlight>,
    /// The wall to highlight when the last move was a wall placement.
    pub last_wall: Option<PlacedWall>,
}

/// Playback state over one decoded code.
#[derive(Debug, Clone)]
pub struct Playback {
    decoded: Decoded,
    log: MoveLog,
    pieces: [Cell; 2],
    wall_counts: [usize; WALL_CATEGORY_COUNT],
    record_walls: Vec<PlacedWall>,
    turn_number: u16,
    turn: Player,
}

impl Playback {
    /// Starts playback at ply 0, the position in the state block.
    pub fn new(decoded: Decoded) -> Self {
        let state = &decoded.state;
        let log = decoded.log.clone().unwrap_or_default();
        Playback {
            pieces: state.pieces(),
            wall_counts: state.wall_counts(),
            record_walls: Vec::with_capacity(log.wall_count()),
            turn_number: state.turn_number(),
            turn: state.turn(),
            log,
            decoded,
        }
    }

    /// The decoded code this playback was built from.
    pub fn decoded(&self) -> &Decoded {
        &self.decoded
    }

    pub fn has_record(&self) -> bool {
        self.decoded.has_log()
    }

    /// The record with its current cursors.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Number of record entries applied so far.
    pub fn ply(&self) -> usize {
        self.log.current()
    }

    pub fn is_at_start(&self) -> bool {
        self.log.current() == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.log.current() == self.log.len()
    }

    pub fn pieces(&self) -> [Cell; 2] {
        self.pieces
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn turn_number(&self) -> u16 {
        self.turn_number
    }

    /// Walls a player still holds.
    pub fn walls_remaining(&self, player: Player) -> usize {
        let placed = self.wall_counts[wall_category(player, Orientation::Horizontal)]
            + self.wall_counts[wall_category(player, Orientation::Vertical)];
        WALL_LIMIT.saturating_sub(placed)
    }

    /// Applies the next record entry. Returns `None` at the end of the record.
    pub fn next(&mut self) -> Option<MoveLogEntry> {
        let entry = self.log.advance()?;
        match entry {
            MoveLogEntry::PieceStep { player, to, .. } => {
                self.pieces[player.index()] = to;
            }
            MoveLogEntry::WallPlacement {
                player,
                orientation,
                anchor,
            } => {
                self.wall_counts[wall_category(player, orientation)] += 1;
                self.record_walls.push(PlacedWall {
                    player,
                    orientation,
                    anchor,
                    from_record: true,
                });
            }
        }
        self.turn_number += 1;
        self.turn = self.turn.opponent();
        Some(entry)
    }

    /// Undoes the previous record entry. Returns `None` at ply 0.
    pub fn back(&mut self) -> Option<MoveLogEntry> {
        let entry = self.log.retreat()?;
        match entry {
            MoveLogEntry::PieceStep { player, from, .. } => {
                self.pieces[player.index()] = from;
            }
            MoveLogEntry::WallPlacement {
                player,
                orientation,
                ..
            } => {
                self.wall_counts[wall_category(player, orientation)] -= 1;
                self.record_walls.pop();
            }
        }
        self.turn_number -= 1;
        self.turn = self.turn.opponent();
        Some(entry)
    }

    /// Returns to ply 0.
    pub fn rewind(&mut self) {
        while self.back().is_some() {}
    }

    /// Plays every remaining entry.
    pub fn fast_forward(&mut self) {
        while self.next().is_some() {}
    }

    /// Moves to `ply`, clamped to the record length. Returns the new ply.
    pub fn seek(&mut self, ply: usize) -> usize {
        let target = ply.min(self.log.len());
        while self.ply() < target {
            self.next();
        }
        while self.ply() > target {
            self.back();
        }
        self.ply()
    }

    /// The move that produced the current ply.
    pub fn last_move(&self) -> Option<Highlight> {
        match self.ply() {
            0 => self.decoded.state.last_move().map(Highlight::State),
            n => self.log.get(n - 1).copied().map(Highlight::Record),
        }
    }

    /// The wall placed by the move that produced the current ply, if that
    /// move was a wall. At ply 0 the state block only stores the anchor, so
    /// the owner and orientation come from the state's wall lists.
    pub fn last_wall(&self) -> Option<PlacedWall> {
        match self.last_move()? {
            Highlight::Record(MoveLogEntry::WallPlacement {
                player,
                orientation,
                anchor,
            }) => Some(PlacedWall {
                player,
                orientation,
                anchor,
                from_record: true,
            }),
            Highlight::State(LastMove::Wall { anchor, .. }) => {
                let (player, orientation) = self.decoded.state.wall_owner(anchor)?;
                Some(PlacedWall {
                    player,
                    orientation,
                    anchor,
                    from_record: false,
                })
            }
            _ => None,
        }
    }

    /// All walls on the board: the state block's walls in category order,
    /// then record walls in play order.
    pub fn walls(&self) -> Vec<PlacedWall> {
        let mut walls = Vec::with_capacity(
            self.decoded.state.wall_counts().iter().sum::<usize>() + self.record_walls.len(),
        );
        for (category, anchors) in self.decoded.state.wall_categories().iter().enumerate() {
            let (player, orientation) = category_parts(category);
            walls.extend(anchors.iter().map(|&anchor| PlacedWall {
                player,
                orientation,
                anchor,
                from_record: false,
            }));
        }
        walls.extend_from_slice(&self.record_walls);
        walls
    }

    /// A serializable view of the current ply.
    pub fn snapshot(&self) -> BoardView {
        BoardView {
            pieces: self.pieces,
            walls: self.walls(),
            wall_counts: self.wall_counts,
            walls_remaining: [
                self.walls_remaining(Player::White),
                self.walls_remaining(Player::Black),
            ],
            turn_number: self.turn_number,
            turn: self.turn,
            ply: self.ply(),
            record_length: self.log.len(),
            last_move: self.last_move(),
            last_wall: self.last_wall(),
        }
    }
}
