pub mod heuristic;
pub mod rng;

use log::debug;

use crate::board::Board;
use crate::types::Player;

pub use heuristic::pick_column;
pub use rng::SessionRng;

/// Chooses the column the computer opponent plays.
pub trait MoveSelector: Send {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize>;
}

/// One-ply win/block/random opponent.
#[derive(Debug)]
pub struct HeuristicSelector {
    rng: SessionRng,
}

impl HeuristicSelector {
    pub fn new(rng: SessionRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SessionRng::new(seed))
    }
}

impl MoveSelector for HeuristicSelector {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        let column = pick_column(board, player, &mut self.rng);
        debug!("heuristic picked {column:?} for {player:?}");
        column
    }
}
