#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The fixed-size puzzle grid and its cell-level operations.
//!
//! A [`Grid`] is a 9x9 matrix of cell values, where `0` marks an empty cell
//! and `1..=9` are placed digits. The grid is a single mutable buffer: the
//! solver fills one cell, recurses, and restores that cell on the way back,
//! so no copies are ever taken during search.

use std::fmt;

/// The number of rows/cols of a block.
pub const BLOCK_SIZE: usize = 3;

/// The number of rows/cols of the entire puzzle.
pub const PUZZLE_SIZE: usize = BLOCK_SIZE * BLOCK_SIZE;

/// The total number of cells, which also bounds the search depth.
pub const CELL_COUNT: usize = PUZZLE_SIZE * PUZZLE_SIZE;

/// A single cell value. `0` means empty, `1..=9` are digits.
pub type Value = u8;

/// The empty-cell marker value.
pub const EMPTY: Value = 0;

/// The largest digit a cell can hold.
#[allow(clippy::cast_possible_truncation)]
pub const MAX_VALUE: Value = PUZZLE_SIZE as Value;

/// Converts a cell value to its printable character. Empty cells map to `'.'`.
#[must_use]
pub const fn value_to_char(value: Value) -> char {
    if value == EMPTY {
        '.'
    } else {
        (b'0' + value) as char
    }
}

/// Converts a character to the corresponding cell value.
///
/// The digits `'1'..='9'` map to their values. Everything else, including
/// the blank markers `'.'` and `'0'`, maps to [`EMPTY`].
#[must_use]
pub fn char_to_value(c: char) -> Value {
    match c.to_digit(10) {
        #[allow(clippy::cast_possible_truncation)]
        Some(d) if (1..=u32::from(MAX_VALUE)).contains(&d) => d as Value,
        _ => EMPTY,
    }
}

/// A 9x9 Sudoku grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Grid {
    cells: [[Value; PUZZLE_SIZE]; PUZZLE_SIZE],
}

impl Grid {
    /// Creates a grid with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[EMPTY; PUZZLE_SIZE]; PUZZLE_SIZE],
        }
    }

    /// Creates a grid from a row-major array of cell values.
    ///
    /// # Panics
    ///
    /// If any value is outside `0..=9`.
    #[must_use]
    pub fn from_rows(rows: [[Value; PUZZLE_SIZE]; PUZZLE_SIZE]) -> Self {
        for row in &rows {
            for &value in row {
                assert!(value <= MAX_VALUE, "cell value {value} out of range");
            }
        }
        Self { cells: rows }
    }

    /// Returns the value at `(row, col)`.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> Value {
        self.cells[row][col]
    }

    /// Fills a cell with a value, double-checking that we are not overwriting
    /// one non-zero value with another.
    ///
    /// Clearing (writing [`EMPTY`]) is always allowed; it is how the solver
    /// undoes a trial move.
    ///
    /// # Panics
    ///
    /// If `value` is non-zero and the cell already holds a non-zero value.
    /// That can only happen through a solver bug, never through user input.
    pub const fn fill(&mut self, row: usize, col: usize, value: Value) {
        assert!(
            value == EMPTY || self.cells[row][col] == EMPTY,
            "cell already has a value"
        );
        self.cells[row][col] = value;
    }

    /// Clears a cell back to empty.
    pub const fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = EMPTY;
    }

    /// Searches the grid in row-major order for the first empty cell.
    ///
    /// Returns `None` when every cell is filled. The row-major order is
    /// load-bearing: it fixes the enumeration order of solutions.
    #[must_use]
    pub fn find_empty(&self) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&value| value == EMPTY)
                .map(|col| (row, col))
        })
    }

    /// Returns true when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.find_empty().is_none()
    }

    /// Iterates over one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Value> {
        self.cells[row].into_iter()
    }

    /// Iterates over one column, top to bottom.
    pub fn col(&self, col: usize) -> impl Iterator<Item = Value> {
        (0..PUZZLE_SIZE).map(move |row| self.cells[row][col])
    }

    /// Iterates over the 3x3 block whose origin is `(start_row, start_col)`.
    ///
    /// Origins are expected at multiples of [`BLOCK_SIZE`] in both axes.
    pub fn block(&self, start_row: usize, start_col: usize) -> impl Iterator<Item = Value> {
        itertools::iproduct!(0..BLOCK_SIZE, 0..BLOCK_SIZE)
            .map(move |(r, c)| self.cells[start_row + r][start_col + c])
    }

    /// Iterates over the main diagonal (`row == col`), top-left to bottom-right.
    pub fn main_diagonal(&self) -> impl Iterator<Item = Value> {
        (0..PUZZLE_SIZE).map(move |i| self.cells[i][i])
    }

    /// Iterates over the anti-diagonal (`row + col == 8`), top-right to
    /// bottom-left.
    pub fn anti_diagonal(&self) -> impl Iterator<Item = Value> {
        (0..PUZZLE_SIZE).map(move |i| self.cells[i][PUZZLE_SIZE - 1 - i])
    }
}

impl From<[[Value; PUZZLE_SIZE]; PUZZLE_SIZE]> for Grid {
    fn from(rows: [[Value; PUZZLE_SIZE]; PUZZLE_SIZE]) -> Self {
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &value in cells {
                write!(f, "{}", value_to_char(value))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_value_mapping() {
        assert_eq!(char_to_value('5'), 5);
        assert_eq!(char_to_value('9'), 9);
        assert_eq!(char_to_value('.'), EMPTY);
        assert_eq!(char_to_value('0'), EMPTY);
        assert_eq!(char_to_value('x'), EMPTY);
        assert_eq!(value_to_char(EMPTY), '.');
        assert_eq!(value_to_char(7), '7');
    }

    #[test]
    fn test_find_empty_is_row_major() {
        let mut grid = Grid::new();
        assert_eq!(grid.find_empty(), Some((0, 0)));

        for col in 0..PUZZLE_SIZE {
            grid.fill(0, col, 1);
            grid.clear(0, col);
            grid.fill(0, col, Value::try_from(col + 1).unwrap());
        }
        assert_eq!(grid.find_empty(), Some((1, 0)));
    }

    #[test]
    fn test_fill_and_clear_round_trip() {
        let mut grid = Grid::new();
        grid.fill(4, 4, 7);
        assert_eq!(grid.get(4, 4), 7);
        grid.clear(4, 4);
        assert_eq!(grid.get(4, 4), EMPTY);
        // A cleared cell may be refilled.
        grid.fill(4, 4, 3);
        assert_eq!(grid.get(4, 4), 3);
    }

    #[test]
    #[should_panic(expected = "cell already has a value")]
    fn test_fill_rejects_overwriting_nonzero() {
        let mut grid = Grid::new();
        grid.fill(2, 3, 5);
        grid.fill(2, 3, 6);
    }

    #[test]
    #[should_panic(expected = "cell value 10 out of range")]
    fn test_from_rows_rejects_out_of_range() {
        let mut rows = [[EMPTY; PUZZLE_SIZE]; PUZZLE_SIZE];
        rows[0][0] = 10;
        let _grid = Grid::from_rows(rows);
    }

    #[test]
    fn test_block_iterates_within_block() {
        let mut grid = Grid::new();
        grid.fill(3, 3, 1);
        grid.fill(5, 5, 9);
        let block: Vec<Value> = grid.block(3, 3).collect();
        assert_eq!(block.len(), PUZZLE_SIZE);
        assert_eq!(block[0], 1);
        assert_eq!(block[8], 9);
    }

    #[test]
    fn test_diagonals() {
        let mut grid = Grid::new();
        grid.fill(0, 0, 1);
        grid.fill(8, 8, 2);
        grid.fill(0, 8, 3);
        grid.fill(8, 0, 4);

        let main: Vec<Value> = grid.main_diagonal().collect();
        assert_eq!(main[0], 1);
        assert_eq!(main[8], 2);

        let anti: Vec<Value> = grid.anti_diagonal().collect();
        assert_eq!(anti[0], 3);
        assert_eq!(anti[8], 4);
    }

    #[test]
    fn test_display_uses_blank_marker() {
        let mut grid = Grid::new();
        grid.fill(0, 0, 5);
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), PUZZLE_SIZE);
        assert_eq!(lines[0], "5........");
        assert_eq!(lines[8], ".........");
    }
}
