pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod persistence;
pub mod replay;
pub mod session;
pub mod timer;
pub mod types;
pub mod wasm;
pub mod win;

pub use board::{Board, Placement};
pub use config::{GameConfig, SessionConfig};
pub use error::{ConfigError, MoveError, PersistError, SessionError};
pub use game::{DerivedState, derive_state, is_board_full};
pub use replay::{StepLog, validate};
pub use session::{GameSession, SessionEvent};
pub use types::{BoardState, Cell, Coord, Outcome, Player, StepInfo, Winner};
pub use win::check_win;
