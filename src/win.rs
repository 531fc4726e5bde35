use std::collections::VecDeque;

use crate::board::Board;
use crate::types::{Cell, Coord, Player};

/// Scan axes as `(d_row, d_col)`: horizontal, vertical, diagonal down-right,
/// diagonal down-left. The order decides which run is reported first.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Looks for a winning run through the disc just placed at `(last_row, last_col)`.
///
/// Returns exactly `connect` coordinates ordered from the negative end of the
/// axis to the positive end, always including the placed disc. Only runs that
/// pass through the last disc are found, so this is meant to be called after
/// every drop rather than to audit an arbitrary board.
pub fn check_win(
    board: &Board,
    player: Player,
    last_row: usize,
    last_col: usize,
) -> Option<Vec<Coord>> {
    let connect = board.config().connect;
    let target = Cell::from(player);
    if board.get(last_row, last_col) != target {
        return None;
    }

    for (dr, dc) in DIRECTIONS {
        let mut line = VecDeque::with_capacity(2 * connect);
        line.push_back(Coord::new(last_col, last_row));

        for k in 1..connect as isize {
            match step(board, last_row, last_col, dr * k, dc * k) {
                Some(coord) if board.get(coord.row, coord.col) == target => {
                    line.push_back(coord);
                }
                _ => break,
            }
        }

        let mut behind = 0usize;
        for k in 1..connect as isize {
            match step(board, last_row, last_col, -dr * k, -dc * k) {
                Some(coord) if board.get(coord.row, coord.col) == target => {
                    line.push_front(coord);
                    behind += 1;
                }
                _ => break,
            }
        }

        if line.len() >= connect {
            let start = behind.saturating_sub(connect.saturating_sub(1));
            return Some(line.into_iter().skip(start).take(connect).collect());
        }
    }

    None
}

fn step(board: &Board, row: usize, col: usize, dr: isize, dc: isize) -> Option<Coord> {
    let r = row as isize + dr;
    let c = col as isize + dc;
    if (0..board.rows() as isize).contains(&r) && (0..board.cols() as isize).contains(&c) {
        Some(Coord::new(c as usize, r as usize))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn coords(list: &[(usize, usize)]) -> Vec<Coord> {
        list.iter().map(|&(col, row)| Coord::new(col, row)).collect()
    }

    #[test]
    fn horizontal_run_is_reported_left_to_right() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                ".......",
                ".1111..",
            ],
        );

        let run = check_win(&board, Player::One, 5, 3).unwrap();

        assert_eq!(run, coords(&[(1, 5), (2, 5), (3, 5), (4, 5)]));
    }

    #[test]
    fn vertical_run_is_reported_top_to_bottom() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                "...2...",
                "...2...",
                "...2...",
                "...21..",
            ],
        );

        let run = check_win(&board, Player::Two, 2, 3).unwrap();

        assert_eq!(run, coords(&[(3, 2), (3, 3), (3, 4), (3, 5)]));
    }

    #[test]
    fn both_diagonals_are_detected() {
        let down_right = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                "1......",
                "21.....",
                "221....",
                "2121...",
            ],
        );
        let down_left = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                "......2",
                ".....21",
                "....211",
                "...2112",
            ],
        );

        assert_eq!(
            check_win(&down_right, Player::One, 2, 0).unwrap(),
            coords(&[(0, 2), (1, 3), (2, 4), (3, 5)])
        );
        assert_eq!(
            check_win(&down_left, Player::Two, 5, 3).unwrap(),
            coords(&[(6, 2), (5, 3), (4, 4), (3, 5)])
        );
    }

    #[test]
    fn long_run_window_contains_last_disc() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                ".......",
                "111111.",
            ],
        );

        let run = check_win(&board, Player::One, 5, 5).unwrap();
        assert_eq!(run, coords(&[(2, 5), (3, 5), (4, 5), (5, 5)]));

        let run = check_win(&board, Player::One, 5, 1).unwrap();
        assert_eq!(run, coords(&[(0, 5), (1, 5), (2, 5), (3, 5)]));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                ".......",
                "111.222",
            ],
        );

        assert_eq!(check_win(&board, Player::One, 5, 2), None);
        assert_eq!(check_win(&board, Player::Two, 5, 4), None);
    }

    #[test]
    fn runs_not_through_last_disc_are_ignored() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                "1......",
                "1111.2.",
            ],
        );

        assert_eq!(check_win(&board, Player::One, 4, 0), None);
        assert_eq!(check_win(&board, Player::Two, 5, 5), None);
        assert_eq!(check_win(&board, Player::One, 5, 3).unwrap().len(), 4);
    }

    #[test]
    fn horizontal_takes_precedence_over_vertical() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                "...1...",
                "...1...",
                "...1...",
                "1111...",
            ],
        );

        let run = check_win(&board, Player::One, 5, 3).unwrap();

        assert_eq!(run, coords(&[(0, 5), (1, 5), (2, 5), (3, 5)]));
    }

    #[test]
    fn respects_configured_connect_length() {
        let config = GameConfig::new(4, 5, 3).unwrap();
        let board = Board::from_rows(config, &[".....", ".....", ".....", "..222"]);

        assert_eq!(
            check_win(&board, Player::Two, 3, 2).unwrap(),
            coords(&[(2, 3), (3, 3), (4, 3)])
        );
    }

    #[test]
    fn cell_not_owned_by_player_never_wins() {
        let board = Board::from_rows(
            GameConfig::default(),
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                ".......",
                "1111...",
            ],
        );

        assert_eq!(check_win(&board, Player::Two, 5, 0), None);
    }
}
