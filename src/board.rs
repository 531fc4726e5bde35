use crate::config::GameConfig;
use crate::error::MoveError;
use crate::types::{Cell, Coord, Player};

/// Connect-four grid stored row-major. Row 0 is the top row, discs settle
/// toward row `rows - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: GameConfig,
    cells: Vec<Cell>,
}

/// Result of a successful drop: the landing row and the new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub board: Board,
}

impl Board {
    /// Creates an empty board with the given geometry.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            cells: vec![Cell::Empty; config.cell_count()],
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.rows() && col < self.cols() {
            self.cells[row * self.cols() + col]
        } else {
            Cell::Empty
        }
    }

    /// Lowest empty row of `column`, `None` when the column is full.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.cols() {
            return None;
        }
        (0..self.rows())
            .rev()
            .find(|&row| self.get(row, column) == Cell::Empty)
    }

    /// Drops `player`'s disc into `column`.
    /// Returns a new board; `self` is never modified.
    pub fn drop_disc(&self, column: usize, player: Player) -> Result<Placement, MoveError> {
        if column >= self.cols() {
            return Err(MoveError::ColumnOutOfRange {
                column,
                cols: self.cols(),
            });
        }

        let row = self
            .landing_row(column)
            .ok_or(MoveError::ColumnFull { column })?;

        let mut board = self.clone();
        board.cells[row * self.cols() + column] = player.into();
        Ok(Placement { row, board })
    }

    /// True when `column` exists and its top cell is empty.
    pub fn is_column_open(&self, column: usize) -> bool {
        column < self.cols() && self.get(0, column) == Cell::Empty
    }

    /// Playable columns in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols())
            .filter(|&col| self.is_column_open(col))
            .collect()
    }

    /// True iff the top row has no empty cell. Gravity makes that a full board.
    pub fn is_full(&self) -> bool {
        (0..self.cols()).all(|col| !self.is_column_open(col))
    }

    /// Coordinates of `player`'s discs in row-major order.
    pub fn coords_of(&self, player: Player) -> Vec<Coord> {
        let target = Cell::from(player);
        let mut out = Vec::new();
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.get(row, col) == target {
                    out.push(Coord::new(col, row));
                }
            }
        }
        out
    }

    /// Converts board to a row-major `Vec<u8>` where 0=empty, 1=player 1, 2=player 2.
    pub fn to_cells(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.to_u8()).collect()
    }

    /// Checks that every column is a contiguous stack resting on the bottom row.
    pub fn satisfies_gravity(&self) -> bool {
        (0..self.cols()).all(|col| {
            let mut seen_disc = false;
            (0..self.rows()).all(|row| {
                let occupied = self.get(row, col) != Cell::Empty;
                if seen_disc && !occupied {
                    return false;
                }
                seen_disc |= occupied;
                true
            })
        })
    }

    #[cfg(test)]
    pub(crate) fn from_rows(config: GameConfig, rows: &[&str]) -> Self {
        assert_eq!(rows.len(), config.rows);
        let cells = rows
            .iter()
            .flat_map(|line| {
                assert_eq!(line.len(), config.cols);
                line.chars().map(|ch| match ch {
                    '1' => Cell::Player1,
                    '2' => Cell::Player2,
                    _ => Cell::Empty,
                })
            })
            .collect();
        Self { config, cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
