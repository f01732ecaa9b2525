//! Board representation and game-state types.
//!
//! Contains the board geometry, the decoded game state, and the move-log
//! types produced by the qfcode decoder.

pub mod cell;
pub mod record;
pub mod state;

pub use cell::{
    category_parts, wall_category, Cell, Direction, Orientation, Player, WallAnchor,
    ALL_DIRECTIONS, ALL_PLAYERS, BOARD_SIZE, CELL_COUNT, WALL_CATEGORY_COUNT, WALL_GRID_SIZE,
    WALL_LIMIT, WALL_SLOT_COUNT,
};
pub use record::{MoveLog, MoveLogEntry};
pub use state::{GameState, LastMove, BLACK_START, WHITE_START};
