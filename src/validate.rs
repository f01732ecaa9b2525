//! Range checks for decoded codes.
//!
//! Every field of a qfcode fits its bit width, but not every value that fits
//! is possible on a 9x9 board with ten walls per player. The decoder keeps
//! raw values; this module reports the impossible ones so callers can decide
//! whether to show the board anyway or reject it.

use serde::Serialize;

use crate::board::{Cell, MoveLogEntry, Player, ALL_PLAYERS, WALL_LIMIT};
use crate::protocol::qfcode::Decoded;

/// A structurally valid but semantically impossible value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeWarning {
    #[error("{player} piece on cell {cell} is off the board")]
    PieceOffBoard { player: Player, cell: Cell },

    #[error("{player} has placed {placed} walls, more than the limit of 10")]
    WallLimitExceeded { player: Player, placed: usize },

    #[error("encoded turn number is 0")]
    ZeroTurnNumber,

    #[error("record entry {ply} leaves the {player} piece off the board on cell {cell}")]
    ReplayOffBoard { ply: usize, player: Player, cell: Cell },

    #[error("{player} places {placed} walls by the end of the record, more than the limit of 10")]
    LogWallLimitExceeded { player: Player, placed: usize },
}

/// True when a step between two on-board cells crossed the left or right
/// edge and came back in on a neighbouring row.
///
/// A step or straight jump moves at most two cells along one of the eight
/// lines; anything else is a raw index that wrapped.
fn wraps_row(from: Cell, to: Cell) -> bool {
    let (Some((fr, fc)), Some((tr, tc))) = (from.coords(), to.coords()) else {
        return false;
    };
    let dr = tr as i32 - fr as i32;
    let dc = tc as i32 - fc as i32;
    let on_line = dr == 0 || dc == 0 || dr.abs() == dc.abs();
    dr.abs() > 2 || dc.abs() > 2 || !on_line
}

/// Checks a decoded code against the board and wall limits.
///
/// Warnings come out in a fixed order: state pieces, state walls, turn
/// number, then record entries in play order, then record wall totals.
pub fn validate(decoded: &Decoded) -> Vec<RangeWarning> {
    let mut warnings = Vec::new();
    let state = &decoded.state;

    for player in ALL_PLAYERS {
        let cell = state.piece(player);
        if !cell.is_on_board() {
            warnings.push(RangeWarning::PieceOffBoard { player, cell });
        }
    }

    let mut placed = [0usize; 2];
    for player in ALL_PLAYERS {
        placed[player.index()] = state.walls_placed(player);
        if placed[player.index()] > WALL_LIMIT {
            warnings.push(RangeWarning::WallLimitExceeded {
                player,
                placed: placed[player.index()],
            });
        }
    }

    if decoded.has_state && state.turn_number() == 0 {
        warnings.push(RangeWarning::ZeroTurnNumber);
    }

    if let Some(log) = &decoded.log {
        let state_placed = placed;
        for (ply, entry) in log.entries().iter().enumerate() {
            match *entry {
                MoveLogEntry::PieceStep { player, from, to } => {
                    if !to.is_on_board() || wraps_row(from, to) {
                        warnings.push(RangeWarning::ReplayOffBoard { ply, player, cell: to });
                    }
                }
                MoveLogEntry::WallPlacement { player, .. } => {
                    placed[player.index()] += 1;
                }
            }
        }

        for player in ALL_PLAYERS {
            let i = player.index();
            // Already reported against the state block.
            if state_placed[i] > WALL_LIMIT {
                continue;
            }
            if placed[i] > WALL_LIMIT {
                warnings.push(RangeWarning::LogWallLimitExceeded {
                    player,
                    placed: placed[i],
                });
            }
        }
    }

    warnings
}
