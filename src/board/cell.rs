//! Board geometry for the 9x9 Quoridor board.
//!
//! Cells are numbered row-major from the bottom-left corner, so row 0 is
//! White's home row. Wall anchors address the 8x8 grid of intersections
//! between cells in the same row-major order.

use std::fmt;

use serde::Serialize;

/// Width and height of the board in cells.
pub const BOARD_SIZE: usize = 9;

/// The number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Width and height of the wall-slot grid.
pub const WALL_GRID_SIZE: usize = BOARD_SIZE - 1;

/// The number of wall slots.
pub const WALL_SLOT_COUNT: usize = WALL_GRID_SIZE * WALL_GRID_SIZE;

/// Walls each player may place over a whole game.
pub const WALL_LIMIT: usize = 10;

/// A cell index as carried by a qfcode.
///
/// Decoded values are kept raw: a 7-bit field can name cells 81..=127, and a
/// replayed step can leave the board entirely. Use [`Cell::is_on_board`] to
/// check before treating the value as a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Cell(pub i16);

impl Cell {
    /// Returns the raw index.
    pub const fn index(self) -> i16 {
        self.0
    }

    /// Returns true if this index names one of the 81 board cells.
    pub const fn is_on_board(self) -> bool {
        self.0 >= 0 && (self.0 as usize) < CELL_COUNT
    }

    /// Returns (row, col) for an on-board cell.
    pub fn coords(self) -> Option<(usize, usize)> {
        if self.is_on_board() {
            let idx = self.0 as usize;
            Some((idx / BOARD_SIZE, idx % BOARD_SIZE))
        } else {
            None
        }
    }

    /// Returns the cell one step away in `dir`, without any bounds check.
    pub const fn offset(self, dir: Direction) -> Cell {
        Cell(self.0 + dir.delta())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wall anchor on the 8x8 wall-slot grid (0..=63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WallAnchor(pub u8);

impl WallAnchor {
    /// Returns the raw index.
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// One of the two players. White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

/// Both players in index order.
pub const ALL_PLAYERS: [Player; 2] = [Player::White, Player::Black];

impl Player {
    /// Returns 0 for White, 1 for Black.
    pub const fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Maps a decoded bit to a player.
    pub const fn from_bit(bit: bool) -> Player {
        if bit {
            Player::Black
        } else {
            Player::White
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns the lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wall orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Returns 0 for horizontal, 1 for vertical.
    pub const fn index(self) -> usize {
        match self {
            Orientation::Horizontal => 0,
            Orientation::Vertical => 1,
        }
    }

    /// Maps a decoded bit to an orientation.
    pub const fn from_bit(bit: bool) -> Orientation {
        if bit {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// Number of (player, orientation) wall categories.
pub const WALL_CATEGORY_COUNT: usize = 4;

/// Index of a wall category in the fixed encoding order
/// {white-h, white-v, black-h, black-v}.
pub const fn wall_category(player: Player, orientation: Orientation) -> usize {
    player.index() * 2 + orientation.index()
}

/// Inverse of [`wall_category`].
pub const fn category_parts(category: usize) -> (Player, Orientation) {
    let player = if category / 2 == 0 {
        Player::White
    } else {
        Player::Black
    };
    let orientation = if category % 2 == 0 {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    (player, orientation)
}

/// A piece step direction, in 3-bit code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// All directions, indexed by their 3-bit code.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// Maps a 3-bit code to a direction. Only the low three bits are used.
    pub const fn from_code(code: u16) -> Direction {
        ALL_DIRECTIONS[(code & 0b111) as usize]
    }

    /// Returns the 3-bit code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the cell-index delta for one step on the 9-wide board.
    pub const fn delta(self) -> i16 {
        match self {
            Direction::North => 9,
            Direction::NorthEast => 10,
            Direction::East => 1,
            Direction::SouthEast => -8,
            Direction::South => -9,
            Direction::SouthWest => -10,
            Direction::West => -1,
            Direction::NorthWest => 8,
        }
    }
}
