//! qfcode decoding.
//!
//! A qfcode is a short base64-style string carrying a Quoridor position and,
//! optionally, the full game record leading to it. The bits are read in one
//! strictly sequential pass because field presence and widths depend on
//! earlier fields:
//!
//! ```text
//! hasState(1) hasLog(1)
//! [ piece0(7) piece1(7) { count(4) anchor(6)*count } x4
//!   lastPlayer(1) lastIsWall(1) [anchor(6)] turnNumber(10) ]
//! [ moveCount(10) { isWall(1) [ dir(3) | orient(1) anchor(6) ] } x moveCount ]
//! ```
//!
//! Wall categories come in the order white-h, white-v, black-h, black-v.
//! Piece moves in the record are relative directions; absolute cells are
//! recovered by replaying them from the state block's piece cells.

use log::debug;
use serde::Serialize;

use super::bits::{BitCursor, BitSequence};
use crate::board::{
    Cell, Direction, GameState, LastMove, MoveLog, MoveLogEntry, Orientation, Player, WallAnchor,
    WALL_CATEGORY_COUNT,
};
use crate::validate::{validate, RangeWarning};

/// The canonical "new game, no record" code: every flag bit is zero.
pub const DEFAULT_CODE: &str = "AAAAAAAA";

const CELL_BITS: usize = 7;
const WALL_COUNT_BITS: usize = 4;
const ANCHOR_BITS: usize = 6;
const TURN_NUMBER_BITS: usize = 10;
const MOVE_COUNT_BITS: usize = 10;
const DIRECTION_BITS: usize = 3;

/// Field names for the wall count and anchors of each category.
const WALL_FIELDS: [(&str, &str); WALL_CATEGORY_COUNT] = [
    ("white horizontal wall count", "white horizontal wall anchor"),
    ("white vertical wall count", "white vertical wall anchor"),
    ("black horizontal wall count", "black horizontal wall anchor"),
    ("black vertical wall count", "black vertical wall anchor"),
];

/// Errors that can occur while decoding a qfcode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated input: {field} needs {needed} bits but {remaining} remain")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("value out of range: {0}")]
    OutOfRange(RangeWarning),
}

/// The two presence flags that open every code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub has_state: bool,
    pub has_log: bool,
}

/// A fully decoded code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Whether the code carried a state block. When false, `state` is the
    /// game-start position.
    pub has_state: bool,
    pub state: GameState,
    /// The game record, if the code carried one.
    pub log: Option<MoveLog>,
}

impl Decoded {
    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }
}

/// Reads the `hasState` and `hasLog` flags.
pub fn read_header(cursor: &mut BitCursor<'_>) -> Result<Header, DecodeError> {
    let has_state = cursor.read_flag("has-state flag")?;
    let has_log = cursor.read_flag("has-log flag")?;
    Ok(Header { has_state, has_log })
}

fn read_cell(cursor: &mut BitCursor<'_>, field: &'static str) -> Result<Cell, DecodeError> {
    Ok(Cell(cursor.read_bits(CELL_BITS, field)? as i16))
}

fn read_anchor(cursor: &mut BitCursor<'_>, field: &'static str) -> Result<WallAnchor, DecodeError> {
    Ok(WallAnchor(cursor.read_bits(ANCHOR_BITS, field)? as u8))
}

/// Decodes the state block.
///
/// Without a state block no bits are consumed and the game-start position is
/// returned. Values that fit their field but are impossible on the board are
/// kept as-is; see [`crate::validate`].
pub fn decode_state(cursor: &mut BitCursor<'_>, has_state: bool) -> Result<GameState, DecodeError> {
    if !has_state {
        return Ok(GameState::start());
    }

    let white = read_cell(cursor, "white piece")?;
    let black = read_cell(cursor, "black piece")?;

    let mut walls: [Vec<WallAnchor>; WALL_CATEGORY_COUNT] = Default::default();
    for (category, &(count_field, anchor_field)) in WALL_FIELDS.iter().enumerate() {
        let count = cursor.read_bits(WALL_COUNT_BITS, count_field)? as usize;
        let mut anchors = Vec::with_capacity(count);
        for _ in 0..count {
            anchors.push(read_anchor(cursor, anchor_field)?);
        }
        walls[category] = anchors;
    }

    let player = Player::from_bit(cursor.read_flag("last-move player")?);
    let last_move = if cursor.read_flag("last-move kind")? {
        LastMove::Wall {
            player,
            anchor: read_anchor(cursor, "last-move wall anchor")?,
        }
    } else {
        LastMove::Piece { player }
    };

    let turn_number = cursor.read_bits(TURN_NUMBER_BITS, "turn number")?;

    Ok(GameState::new([white, black], walls, last_move, turn_number))
}

/// Moves a piece one step in `dir`, jumping straight over the opponent when
/// the step would land on it.
///
/// This is the only game rule the decoder needs: recorded directions are
/// relative, and a jump is recorded with the same direction as a step.
pub fn step_piece(from: Cell, opponent: Cell, dir: Direction) -> Cell {
    let to = from.offset(dir);
    if to == opponent {
        to.offset(dir)
    } else {
        to
    }
}

/// Decodes the game record, replaying piece steps from `start`.
///
/// The first entry belongs to the player to move in `start`, and movers
/// alternate after every entry whether it is a step or a wall.
pub fn decode_move_log(
    cursor: &mut BitCursor<'_>,
    has_log: bool,
    start: &GameState,
) -> Result<Option<MoveLog>, DecodeError> {
    if !has_log {
        return Ok(None);
    }

    let move_count = cursor.read_bits(MOVE_COUNT_BITS, "move count")? as usize;
    let mut pieces = start.pieces();
    let mut mover = start.turn();
    let mut entries = Vec::with_capacity(move_count);

    for _ in 0..move_count {
        let entry = if cursor.read_flag("move kind")? {
            let orientation = Orientation::from_bit(cursor.read_flag("wall orientation")?);
            let anchor = read_anchor(cursor, "wall anchor")?;
            MoveLogEntry::WallPlacement {
                player: mover,
                orientation,
                anchor,
            }
        } else {
            let dir = Direction::from_code(cursor.read_bits(DIRECTION_BITS, "step direction")?);
            // Cells stay within i16: at most 1023 steps of at most 20.
            let from = pieces[mover.index()];
            let to = step_piece(from, pieces[mover.opponent().index()], dir);
            pieces[mover.index()] = to;
            MoveLogEntry::PieceStep {
                player: mover,
                from,
                to,
            }
        };
        entries.push(entry);
        mover = mover.opponent();
    }

    Ok(Some(MoveLog::new(entries)))
}

/// Decodes a code into its state and optional game record.
///
/// Characters outside the alphabet are skipped. Bits left over after the
/// last field (symbol padding) are ignored.
pub fn decode(code: &str) -> Result<Decoded, DecodeError> {
    let bits = BitSequence::unpack(code);
    let mut cursor = bits.cursor();

    let header = read_header(&mut cursor)?;
    let state = decode_state(&mut cursor, header.has_state)?;
    let log = decode_move_log(&mut cursor, header.has_log, &state)?;

    debug!(
        "decoded qfcode: state={} log={} bits={}/{} skipped={}",
        header.has_state,
        log.as_ref().map_or(0, |l| l.len()),
        cursor.position(),
        bits.len(),
        bits.skipped()
    );

    Ok(Decoded {
        has_state: header.has_state,
        state,
        log,
    })
}

/// Decodes a code and rejects it if any value is out of range for the board.
pub fn decode_strict(code: &str) -> Result<Decoded, DecodeError> {
    let decoded = decode(code)?;
    match validate(&decoded).into_iter().next() {
        Some(warning) => Err(DecodeError::OutOfRange(warning)),
        None => Ok(decoded),
    }
}
