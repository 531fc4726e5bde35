use log::debug;

use crate::board::Board;
use crate::config::GameConfig;
use crate::types::{Coord, GameState, Outcome, Player};
use crate::win::check_win;

/// Board, side to move and outcome derived from a move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedState {
    pub board: Board,
    pub current_player: Player,
    pub outcome: Outcome,
    /// Length of the move list the state was derived from.
    pub move_count: usize,
}

impl DerivedState {
    pub fn win_positions(&self) -> &[Coord] {
        match &self.outcome {
            Outcome::Win { positions, .. } => positions,
            _ => &[],
        }
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_cells(),
            rows: self.board.rows(),
            cols: self.board.cols(),
            current_player: self.current_player.number(),
            board_state: self.outcome.board_state(),
            winner: self.outcome.winner().map(Player::number),
            win_positions: self.win_positions().to_vec(),
            move_count: self.move_count,
            player_1_discs: self.board.coords_of(Player::One).len(),
            player_2_discs: self.board.coords_of(Player::Two).len(),
        }
    }
}

/// Replays `moves` from an empty board.
///
/// Moves that cannot be played (full or nonexistent column) are skipped but
/// still count toward turn parity. Replay stops at the first win; moves after
/// it have no effect on the result.
pub fn derive_state(config: &GameConfig, moves: &[usize]) -> DerivedState {
    let mut board = Board::new(*config);
    let mut win = None;

    for (index, &column) in moves.iter().enumerate() {
        let player = Player::for_move(index);
        let placement = match board.drop_disc(column, player) {
            Ok(placement) => placement,
            Err(err) => {
                debug!("skipping move #{index}: {err}");
                continue;
            }
        };

        board = placement.board;
        if let Some(positions) = check_win(&board, player, placement.row, column) {
            win = Some((player, positions));
            break;
        }
    }

    let outcome = match win {
        Some((player, positions)) => Outcome::Win { player, positions },
        None if is_board_full(&board) => Outcome::Draw,
        None if moves.is_empty() => Outcome::Waiting,
        None => Outcome::Pending,
    };

    DerivedState {
        board,
        current_player: Player::for_move(moves.len()),
        outcome,
        move_count: moves.len(),
    }
}

/// True iff the top row has no empty cell.
pub fn is_board_full(board: &Board) -> bool {
    board.is_full()
}

/// Column order that fills a 6x7 board without ever making four in a row.
#[cfg(test)]
pub(crate) fn drawn_game() -> Vec<usize> {
    let mut moves = Vec::new();
    for pair in [[0, 1], [2, 3], [4, 5]] {
        for _ in 0..3 {
            moves.extend_from_slice(&pair);
        }
        for _ in 0..3 {
            moves.extend_from_slice(&[pair[1], pair[0]]);
        }
    }
    moves.extend(std::iter::repeat_n(6, 6));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardState, Cell};

    fn derive(moves: &[usize]) -> DerivedState {
        derive_state(&GameConfig::default(), moves)
    }

    #[test]
    fn empty_move_list_is_waiting_on_empty_board() {
        let state = derive(&[]);

        assert_eq!(state.outcome, Outcome::Waiting);
        assert_eq!(state.current_player, Player::One);
        assert_eq!(state.board, Board::default());
    }

    #[test]
    fn vertical_win_for_player_one() {
        let state = derive(&[3, 4, 3, 4, 3, 4, 3]);

        assert_eq!(
            state.outcome,
            Outcome::Win {
                player: Player::One,
                positions: vec![
                    Coord::new(3, 2),
                    Coord::new(3, 3),
                    Coord::new(3, 4),
                    Coord::new(3, 5),
                ],
            }
        );
        assert_eq!(state.to_game_state().winner, Some(1));
    }

    #[test]
    fn alternating_stack_in_one_column_does_not_win() {
        let state = derive(&[3, 3, 3, 3, 4, 4, 4]);

        assert_eq!(state.outcome, Outcome::Pending);
        assert_eq!(state.current_player, Player::Two);
        assert_eq!(state.board.get(5, 3), Cell::Player1);
        assert_eq!(state.board.get(4, 3), Cell::Player2);
    }

    #[test]
    fn moves_after_a_win_are_ignored() {
        let won = derive(&[0, 6, 1, 6, 2, 6, 3]);
        let extended = derive(&[0, 6, 1, 6, 2, 6, 3, 5, 5]);

        assert_eq!(won.outcome, extended.outcome);
        assert_eq!(won.board, extended.board);
        assert_eq!(extended.board.get(5, 5), Cell::Empty);
    }

    #[test]
    fn full_column_move_is_skipped_but_counts_for_parity() {
        let mut moves = vec![0, 0, 0, 0, 0, 0];
        let before = derive(&moves);
        moves.push(0);

        let after = derive(&moves);

        assert_eq!(after.board, before.board);
        assert_eq!(after.outcome, Outcome::Pending);
        assert_eq!(after.current_player, Player::Two);
    }

    #[test]
    fn out_of_range_column_is_skipped() {
        let state = derive(&[42, 1]);

        assert_eq!(state.board.get(5, 1), Cell::Player2);
        assert!(state.board.coords_of(Player::One).is_empty());
        assert_eq!(state.outcome, Outcome::Pending);
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let state = derive(&drawn_game());

        assert_eq!(state.outcome, Outcome::Draw);
        assert!(is_board_full(&state.board));
        assert_eq!(state.to_game_state().board_state, BoardState::Draw);
    }

    #[test]
    fn derivation_is_deterministic_and_keeps_gravity() {
        let moves = [3, 2, 4, 4, 1, 5, 5, 6, 0, 0, 2];

        let first = derive(&moves);
        let second = derive(&moves);

        assert_eq!(first, second);
        for end in 0..=moves.len() {
            assert!(derive(&moves[..end]).board.satisfies_gravity());
        }
    }

    #[test]
    fn game_state_reports_disc_counts() {
        let state = derive(&[3, 3, 4]).to_game_state();

        assert_eq!(state.move_count, 3);
        assert_eq!(state.player_1_discs, 2);
        assert_eq!(state.player_2_discs, 1);
        assert_eq!(state.current_player, 2);
        assert!(state.win_positions.is_empty());
        assert_eq!(state.board.len(), 42);
    }
}
