use serde::{Deserialize, Serialize};

/// One of the two sides. Player 1 always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "player_1")]
    One,
    #[serde(rename = "player_2")]
    Two,
}

impl Player {
    /// Side to move at `index` in a move list.
    pub fn for_move(index: usize) -> Self {
        if index % 2 == 0 { Player::One } else { Player::Two }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2, the value the browser renders.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::One),
            Cell::Player2 => Some(Player::Two),
        }
    }

    /// 0=empty, 1=player 1, 2=player 2.
    pub fn to_u8(self) -> u8 {
        self.owner().map_or(0, Player::number)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::Player1,
            Player::Two => Cell::Player2,
        }
    }
}

/// A grid coordinate, serialized as `[col, row]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl From<[usize; 2]> for Coord {
    fn from([col, row]: [usize; 2]) -> Self {
        Self { col, row }
    }
}

impl From<Coord> for [usize; 2] {
    fn from(coord: Coord) -> Self {
        [coord.col, coord.row]
    }
}

/// Tag describing where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardState {
    Waiting,
    Pending,
    Win,
    Draw,
}

impl BoardState {
    pub fn is_terminal(self) -> bool {
        matches!(self, BoardState::Win | BoardState::Draw)
    }
}

/// Outcome of a move list, always recomputed from the moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No moves yet.
    Waiting,
    /// Game continues.
    Pending,
    Win { player: Player, positions: Vec<Coord> },
    Draw,
}

impl Outcome {
    pub fn board_state(&self) -> BoardState {
        match self {
            Outcome::Waiting => BoardState::Waiting,
            Outcome::Pending => BoardState::Pending,
            Outcome::Win { .. } => BoardState::Win,
            Outcome::Draw => BoardState::Draw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.board_state().is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Winning side and its run, present on the step where the win happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub who: Player,
    pub positions: Vec<Coord>,
}

/// Snapshot of one step of a replay trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub player_1: Vec<Coord>,
    pub player_2: Vec<Coord>,
    pub board_state: BoardState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=player 1, 2=player 2. Row 0 is the top.
    pub board: Vec<u8>,
    pub rows: usize,
    pub cols: usize,
    pub current_player: u8,
    pub board_state: BoardState,
    /// Contract:
    /// - `Some(1 | 2)` only when `board_state` is `win`.
    pub winner: Option<u8>,
    /// Contract:
    /// - Exactly `connect` coordinates when `board_state` is `win`.
    /// - Otherwise an empty list.
    pub win_positions: Vec<Coord>,
    pub move_count: usize,
    pub player_1_discs: usize,
    pub player_2_discs: usize,
}

/// Session flags the presentation layer reacts to, alongside [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub game: GameState,
    pub one_player: bool,
    pub ai_player: u8,
    /// An AI move is scheduled and will be played on a later `tick`.
    pub ai_pending: bool,
    pub celebrating: bool,
    pub draw_modal_open: bool,
    pub can_undo: bool,
}
