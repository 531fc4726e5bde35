use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::board::Board;
use crate::config::GameConfig;
use crate::types::{BoardState, Coord, Player, StepInfo, Winner};
use crate::win::check_win;

/// Replay trace in step order. Serializes as an object keyed `step_<N>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLog {
    steps: Vec<StepInfo>,
}

impl StepLog {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&StepInfo> {
        self.steps.get(step)
    }

    /// Looks a step up by its wire key, e.g. `"step_3"`.
    pub fn by_key(&self, key: &str) -> Option<&StepInfo> {
        let index = key.strip_prefix("step_")?.parse::<usize>().ok()?;
        self.get(index)
    }

    pub fn last(&self) -> Option<&StepInfo> {
        self.steps.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, &StepInfo)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| (step_key(index), step))
    }

    fn snapshot(
        &mut self,
        player_1: &[Coord],
        player_2: &[Coord],
        board_state: BoardState,
        winner: Option<Winner>,
    ) {
        self.steps.push(StepInfo {
            player_1: player_1.to_vec(),
            player_2: player_2.to_vec(),
            board_state,
            winner,
        });
    }
}

impl Serialize for StepLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len()))?;
        for (key, step) in self.iter() {
            map.serialize_entry(&key, step)?;
        }
        map.end()
    }
}

pub fn step_key(index: usize) -> String {
    format!("step_{index}")
}

/// Replays `moves` and records a snapshot before the first move and after
/// every processed move.
///
/// Unplayable moves still take a step, recorded as `pending` with unchanged
/// coordinate lists. The trace ends at the first `win` or `draw` snapshot.
pub fn validate(config: &GameConfig, moves: &[usize]) -> StepLog {
    let mut out = StepLog::default();
    let mut board = Board::new(*config);
    let mut player_1: Vec<Coord> = Vec::new();
    let mut player_2: Vec<Coord> = Vec::new();

    out.snapshot(&player_1, &player_2, BoardState::Waiting, None);

    for (index, &column) in moves.iter().enumerate() {
        let player = Player::for_move(index);
        let placement = match board.drop_disc(column, player) {
            Ok(placement) => placement,
            Err(err) => {
                debug!("step {}: {err}", index + 1);
                out.snapshot(&player_1, &player_2, BoardState::Pending, None);
                continue;
            }
        };

        board = placement.board;
        let coord = Coord::new(column, placement.row);
        match player {
            Player::One => player_1.push(coord),
            Player::Two => player_2.push(coord),
        }

        if let Some(positions) = check_win(&board, player, placement.row, column) {
            let winner = Winner {
                who: player,
                positions,
            };
            out.snapshot(&player_1, &player_2, BoardState::Win, Some(winner));
            break;
        }

        if board.is_full() {
            out.snapshot(&player_1, &player_2, BoardState::Draw, None);
            break;
        }

        out.snapshot(&player_1, &player_2, BoardState::Pending, None);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{derive_state, drawn_game};

    fn trace(moves: &[usize]) -> StepLog {
        validate(&GameConfig::default(), moves)
    }

    #[test]
    fn empty_moves_yield_single_waiting_step() {
        let log = trace(&[]);

        assert_eq!(log.len(), 1);
        let step = log.by_key("step_0").unwrap();
        assert_eq!(step.board_state, BoardState::Waiting);
        assert!(step.player_1.is_empty() && step.player_2.is_empty());
        assert!(step.winner.is_none());
    }

    #[test]
    fn each_move_adds_a_step_with_accumulated_coords() {
        let log = trace(&[3, 3, 4]);

        assert_eq!(log.len(), 4);
        let last = log.by_key("step_3").unwrap();
        assert_eq!(last.board_state, BoardState::Pending);
        assert_eq!(last.player_1, vec![Coord::new(3, 5), Coord::new(4, 5)]);
        assert_eq!(last.player_2, vec![Coord::new(3, 4)]);
        assert_eq!(log.get(1).unwrap().player_1, vec![Coord::new(3, 5)]);
        assert!(log.get(1).unwrap().player_2.is_empty());
    }

    #[test]
    fn vertical_win_halts_trace() {
        let log = trace(&[3, 4, 3, 4, 3, 4, 3, 0, 0]);

        assert_eq!(log.len(), 8);
        let last = log.last().unwrap();
        assert_eq!(last.board_state, BoardState::Win);
        let winner = last.winner.as_ref().unwrap();
        assert_eq!(winner.who, Player::One);
        assert_eq!(
            winner.positions,
            vec![
                Coord::new(3, 2),
                Coord::new(3, 3),
                Coord::new(3, 4),
                Coord::new(3, 5),
            ]
        );
        assert!(log.get(6).unwrap().winner.is_none());
    }

    #[test]
    fn rejected_move_records_pending_without_new_coords() {
        let moves = [0, 0, 0, 0, 0, 0, 0, 1];

        let log = trace(&moves);

        assert_eq!(log.len(), 9);
        let before = log.get(6).unwrap();
        let rejected = log.get(7).unwrap();
        assert_eq!(rejected.board_state, BoardState::Pending);
        assert_eq!(rejected.player_1, before.player_1);
        assert_eq!(rejected.player_2, before.player_2);
        assert_eq!(log.get(8).unwrap().player_2.last(), Some(&Coord::new(1, 5)));
    }

    #[test]
    fn out_of_range_move_takes_a_pending_step() {
        let log = trace(&[9]);

        assert_eq!(log.len(), 2);
        assert_eq!(log.get(1).unwrap().board_state, BoardState::Pending);
        assert!(log.get(1).unwrap().player_1.is_empty());
    }

    #[test]
    fn draw_is_terminal() {
        let mut moves = drawn_game();
        let total = moves.len();
        moves.push(3);

        let log = trace(&moves);

        assert_eq!(log.len(), total + 1);
        assert_eq!(log.last().unwrap().board_state, BoardState::Draw);
        assert_eq!(log.last().unwrap().player_1.len(), 21);
        assert_eq!(log.last().unwrap().player_2.len(), 21);
    }

    #[test]
    fn final_step_agrees_with_derived_outcome() {
        let config = GameConfig::default();
        for moves in [
            vec![],
            vec![2, 2, 3, 3, 4, 4, 5],
            vec![0, 1, 1, 2, 3, 2, 2, 3, 4, 3, 3],
            drawn_game(),
        ] {
            let log = validate(&config, &moves);
            let state = derive_state(&config, &moves);

            assert_eq!(log.last().unwrap().board_state, state.outcome.board_state());
        }
    }

    #[test]
    fn serializes_as_step_keyed_object() {
        let log = trace(&[3]);

        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "step_0": {"player_1": [], "player_2": [], "board_state": "waiting"},
                "step_1": {"player_1": [[3, 5]], "player_2": [], "board_state": "pending"}
            })
        );
    }

    #[test]
    fn by_key_rejects_malformed_keys() {
        let log = trace(&[1, 2]);

        assert!(log.by_key("step_2").is_some());
        assert!(log.by_key("step_3").is_none());
        assert!(log.by_key("2").is_none());
        assert!(log.by_key("step_x").is_none());
    }
}
