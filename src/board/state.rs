//! Game state representation.
//!
//! Holds the snapshot carried in the state block of a qfcode: piece cells,
//! placed walls per player and orientation, the last move, and the turn
//! counter.

use serde::Serialize;

use super::cell::{
    wall_category, Cell, Orientation, Player, WallAnchor, ALL_PLAYERS, WALL_CATEGORY_COUNT,
};

/// White's starting cell (bottom row, centre column).
pub const WHITE_START: Cell = Cell(4);

/// Black's starting cell (top row, centre column).
pub const BLACK_START: Cell = Cell(76);

/// The move that produced the encoded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LastMove {
    /// The player stepped their piece.
    Piece { player: Player },
    /// The player placed a wall at `anchor`.
    Wall { player: Player, anchor: WallAnchor },
}

impl LastMove {
    /// Returns the player who made the move.
    pub const fn player(self) -> Player {
        match self {
            LastMove::Piece { player } => player,
            LastMove::Wall { player, .. } => player,
        }
    }
}

/// Complete board state at a point in time.
///
/// Built once from fully parsed fields and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pieces: [Cell; 2],
    /// Anchors per wall category, in placement order.
    walls: [Vec<WallAnchor>; WALL_CATEGORY_COUNT],
    last_move: Option<LastMove>,
    turn_number: u16,
    turn: Player,
}

impl GameState {
    /// Creates a state from decoded fields. The side to move is the
    /// opponent of the last mover.
    pub fn new(
        pieces: [Cell; 2],
        walls: [Vec<WallAnchor>; WALL_CATEGORY_COUNT],
        last_move: LastMove,
        turn_number: u16,
    ) -> Self {
        GameState {
            pieces,
            walls,
            last_move: Some(last_move),
            turn_number,
            turn: last_move.player().opponent(),
        }
    }

    /// The game-start position: both pieces on their home cells, no walls,
    /// turn 1, White to move.
    pub fn start() -> Self {
        GameState {
            pieces: [WHITE_START, BLACK_START],
            walls: Default::default(),
            last_move: None,
            turn_number: 1,
            turn: Player::White,
        }
    }

    /// Both piece cells, indexed by player.
    pub fn pieces(&self) -> [Cell; 2] {
        self.pieces
    }

    /// The cell of one player's piece.
    pub fn piece(&self, player: Player) -> Cell {
        self.pieces[player.index()]
    }

    /// Wall anchors for one (player, orientation) category.
    pub fn walls(&self, player: Player, orientation: Orientation) -> &[WallAnchor] {
        &self.walls[wall_category(player, orientation)]
    }

    /// All four categories in encoding order.
    pub fn wall_categories(&self) -> &[Vec<WallAnchor>; WALL_CATEGORY_COUNT] {
        &self.walls
    }

    /// Wall counts in encoding order {white-h, white-v, black-h, black-v}.
    pub fn wall_counts(&self) -> [usize; WALL_CATEGORY_COUNT] {
        [
            self.walls[0].len(),
            self.walls[1].len(),
            self.walls[2].len(),
            self.walls[3].len(),
        ]
    }

    /// Walls placed by one player across both orientations.
    pub fn walls_placed(&self, player: Player) -> usize {
        self.walls(player, Orientation::Horizontal).len()
            + self.walls(player, Orientation::Vertical).len()
    }

    /// The encoded last move, or `None` for the default start state.
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// 1-based half-move counter.
    pub fn turn_number(&self) -> u16 {
        self.turn_number
    }

    /// The player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Finds which player placed the wall at `anchor`, if any.
    pub fn wall_owner(&self, anchor: WallAnchor) -> Option<(Player, Orientation)> {
        for player in ALL_PLAYERS {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                if self.walls(player, orientation).contains(&anchor) {
                    return Some((player, orientation));
                }
            }
        }
        None
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_state_defaults() {
        let state = GameState::start();
        assert_eq!(state.pieces(), [Cell(4), Cell(76)]);
        assert_eq!(state.wall_counts(), [0, 0, 0, 0]);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.turn(), Player::White);
        assert_eq!(state.last_move(), None);
        assert_eq!(GameState::default(), state);
    }

    #[test]
    fn turn_is_opponent_of_last_mover() {
        let state = GameState::new(
            [Cell(13), Cell(67)],
            Default::default(),
            LastMove::Piece { player: Player::White },
            3,
        );
        assert_eq!(state.turn(), Player::Black);

        let state = GameState::new(
            [Cell(13), Cell(67)],
            Default::default(),
            LastMove::Wall { player: Player::Black, anchor: WallAnchor(9) },
            4,
        );
        assert_eq!(state.turn(), Player::White);
    }

    #[test]
    fn wall_accessors_use_category_order() {
        let walls = [
            vec![WallAnchor(1), WallAnchor(2)],
            vec![WallAnchor(3)],
            vec![],
            vec![WallAnchor(40), WallAnchor(41), WallAnchor(42)],
        ];
        let state = GameState::new(
            [Cell(4), Cell(76)],
            walls,
            LastMove::Wall { player: Player::Black, anchor: WallAnchor(42) },
            7,
        );
        assert_eq!(state.wall_counts(), [2, 1, 0, 3]);
        assert_eq!(state.walls(Player::White, Orientation::Vertical), &[WallAnchor(3)]);
        assert_eq!(state.walls_placed(Player::White), 3);
        assert_eq!(state.walls_placed(Player::Black), 3);
        assert_eq!(
            state.wall_owner(WallAnchor(42)),
            Some((Player::Black, Orientation::Vertical))
        );
        assert_eq!(state.wall_owner(WallAnchor(63)), None);
    }
}
