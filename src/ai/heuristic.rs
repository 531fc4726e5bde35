use crate::ai::rng::SessionRng;
use crate::board::Board;
use crate::types::Player;
use crate::win::check_win;

/// Picks a column for `ai_player` looking one disc ahead:
/// 1. the first column (ascending) where the AI wins immediately;
/// 2. otherwise the first column where the opponent would win next, to block it;
/// 3. otherwise a uniformly random playable column.
///
/// Returns `None` only when the board has no playable column.
pub fn pick_column(board: &Board, ai_player: Player, rng: &mut SessionRng) -> Option<usize> {
    let columns = board.legal_columns();

    if let Some(column) = first_winning_column(board, &columns, ai_player) {
        return Some(column);
    }
    if let Some(column) = first_winning_column(board, &columns, ai_player.opponent()) {
        return Some(column);
    }
    rng.choose(&columns).copied()
}

/// First column in `columns` where a disc of `player` completes a run.
pub fn first_winning_column(board: &Board, columns: &[usize], player: Player) -> Option<usize> {
    columns.iter().copied().find(|&column| {
        board
            .drop_disc(column, player)
            .ok()
            .and_then(|trial| check_win(&trial.board, player, trial.row, column))
            .is_some()
    })
}
