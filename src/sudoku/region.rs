#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Region-consistency checking: the 9-bit presence set and the whole-grid
//! validator built on top of it.
//!
//! A region is any 9-cell group subject to the no-duplicate rule: a row, a
//! column, a 3x3 block, or (in X-Sudoku mode) one of the two main diagonals.
//! Regions are never materialized; the validator walks the grid's cells
//! through a fresh [`PresenceSet`] per region and short-circuits on the
//! first duplicate.

use crate::sudoku::grid::{BLOCK_SIZE, EMPTY, Grid, PUZZLE_SIZE, Value};
use std::fmt;

/// Selects which constraints the validator enforces.
///
/// The mode is chosen once from the command line and threaded explicitly
/// into every validation call; it never changes during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, clap::ValueEnum)]
pub enum Mode {
    /// Rows, columns, and blocks only.
    #[default]
    Normal,
    /// Rows, columns, blocks, and both main diagonals.
    XSudoku,
}

impl Mode {
    /// Returns true when the diagonal constraints are enforced.
    #[must_use]
    pub const fn diagonals_enabled(self) -> bool {
        matches!(self, Self::XSudoku)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::XSudoku => write!(f, "x-sudoku"),
        }
    }
}

/// A set of digits 1..=9, represented as a bit vector.
///
/// Bit `i` is set when digit `i + 1` has been observed. One set lives for
/// the duration of a single region scan and is then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PresenceSet(u16);

impl PresenceSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Checks whether `value` was already seen in this region, and marks it.
    ///
    /// An empty cell is skipped and the scan stays consistent. A digit seen
    /// for the first time is recorded and accepted; a repeated digit is
    /// rejected without mutating the set.
    pub const fn check_and_mark(&mut self, value: Value) -> bool {
        if value == EMPTY {
            return true;
        }
        let marker = 1u16 << (value - 1);
        if self.0 & marker != 0 {
            return false;
        }
        self.0 |= marker;
        true
    }
}

/// Scans one region through a fresh presence set.
fn region_is_consistent(values: impl Iterator<Item = Value>) -> bool {
    let mut seen = PresenceSet::new();
    for value in values {
        if !seen.check_and_mark(value) {
            return false;
        }
    }
    true
}

/// Returns true when the grid is a valid (partial) solution.
///
/// Every digit appears at most once in every row, every column, and every
/// block; when `mode` is [`Mode::XSudoku`], also at most once on each of
/// the two main diagonals. Each diagonal is an independent region: a digit
/// on the main diagonal never conflicts with the same digit on the
/// anti-diagonal.
///
/// A valid grid with no empty cells is, by definition, solved.
#[must_use]
pub fn is_valid(grid: &Grid, mode: Mode) -> bool {
    for row in 0..PUZZLE_SIZE {
        if !region_is_consistent(grid.row(row)) {
            return false;
        }
    }

    for col in 0..PUZZLE_SIZE {
        if !region_is_consistent(grid.col(col)) {
            return false;
        }
    }

    for (start_row, start_col) in
        itertools::iproduct!((0..PUZZLE_SIZE).step_by(BLOCK_SIZE), (0..PUZZLE_SIZE).step_by(BLOCK_SIZE))
    {
        if !region_is_consistent(grid.block(start_row, start_col)) {
            return false;
        }
    }

    if mode.diagonals_enabled() {
        if !region_is_consistent(grid.main_diagonal()) {
            return false;
        }
        if !region_is_consistent(grid.anti_diagonal()) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_check_and_mark_skips_empty() {
        let mut seen = PresenceSet::new();
        for _ in 0..20 {
            assert!(seen.check_and_mark(EMPTY));
        }
    }

    #[test]
    fn test_check_and_mark_is_idempotent_reject() {
        let mut seen = PresenceSet::new();
        assert!(seen.check_and_mark(4));
        assert!(!seen.check_and_mark(4));
        // The rejected mark must not have disturbed the set.
        assert!(!seen.check_and_mark(4));
        assert!(seen.check_and_mark(5));
    }

    #[test]
    fn test_check_and_mark_all_digits_once() {
        let mut seen = PresenceSet::new();
        for value in 1..=9 {
            assert!(seen.check_and_mark(value));
        }
        for value in 1..=9 {
            assert!(!seen.check_and_mark(value));
        }
    }

    #[test]
    fn test_empty_grid_is_valid() {
        let grid = Grid::new();
        assert!(is_valid(&grid, Mode::Normal));
        assert!(is_valid(&grid, Mode::XSudoku));
    }

    #[test]
    fn test_row_duplicate_is_invalid() {
        let mut grid = Grid::new();
        grid.fill(3, 0, 7);
        grid.fill(3, 8, 7);
        assert!(!is_valid(&grid, Mode::Normal));
    }

    #[test]
    fn test_col_duplicate_is_invalid() {
        let mut grid = Grid::new();
        grid.fill(0, 6, 2);
        grid.fill(8, 6, 2);
        assert!(!is_valid(&grid, Mode::Normal));
    }

    #[test]
    fn test_block_duplicate_is_invalid() {
        let mut grid = Grid::new();
        grid.fill(0, 0, 9);
        grid.fill(2, 2, 9);
        assert!(!is_valid(&grid, Mode::Normal));
    }

    #[test]
    fn test_main_diagonal_duplicate_only_matters_in_x_mode() {
        // Same digit at (0, 0) and (4, 4): different rows, columns, and
        // blocks, so the grid is fine under normal rules.
        let mut grid = Grid::new();
        grid.fill(0, 0, 5);
        grid.fill(4, 4, 5);
        assert!(is_valid(&grid, Mode::Normal));
        assert!(!is_valid(&grid, Mode::XSudoku));
    }

    #[test]
    fn test_anti_diagonal_is_enforced() {
        let mut grid = Grid::new();
        grid.fill(0, 8, 7);
        grid.fill(8, 0, 7);
        assert!(is_valid(&grid, Mode::Normal));
        assert!(!is_valid(&grid, Mode::XSudoku));
    }

    #[test]
    fn test_diagonals_are_independent_regions() {
        // One digit on each diagonal must not conflict across diagonals.
        let mut grid = Grid::new();
        grid.fill(1, 1, 6);
        grid.fill(1, 7, 6);
        assert!(!is_valid(&grid, Mode::Normal), "same row");

        let mut grid = Grid::new();
        grid.fill(1, 1, 6);
        grid.fill(2, 6, 6);
        assert!(is_valid(&grid, Mode::XSudoku));
    }

    /// Reference checker: collect the non-zero values of each region and
    /// look for duplicates the slow way.
    fn naive_is_valid(grid: &Grid, mode: Mode) -> bool {
        fn no_duplicates(values: impl Iterator<Item = u8>) -> bool {
            let mut digits: Vec<u8> = values.filter(|&v| v != EMPTY).collect();
            let before = digits.len();
            digits.sort_unstable();
            digits.dedup();
            digits.len() == before
        }

        let rows = (0..PUZZLE_SIZE).all(|r| no_duplicates(grid.row(r)));
        let cols = (0..PUZZLE_SIZE).all(|c| no_duplicates(grid.col(c)));
        let blocks = itertools::iproduct!(
            (0..PUZZLE_SIZE).step_by(BLOCK_SIZE),
            (0..PUZZLE_SIZE).step_by(BLOCK_SIZE)
        )
        .all(|(r, c)| no_duplicates(grid.block(r, c)));
        let diagonals = !mode.diagonals_enabled()
            || (no_duplicates(grid.main_diagonal()) && no_duplicates(grid.anti_diagonal()));

        rows && cols && blocks && diagonals
    }

    proptest! {
        #[test]
        fn prop_is_valid_matches_naive_checker(
            cells in prop::array::uniform9(prop::array::uniform9(0u8..=9))
        ) {
            let grid = Grid::from_rows(cells);
            prop_assert_eq!(is_valid(&grid, Mode::Normal), naive_is_valid(&grid, Mode::Normal));
            prop_assert_eq!(is_valid(&grid, Mode::XSudoku), naive_is_valid(&grid, Mode::XSudoku));
        }

        #[test]
        fn prop_sparse_grids_match_naive_checker(
            placements in prop::collection::vec(
                (0usize..PUZZLE_SIZE, 0usize..PUZZLE_SIZE, 1u8..=9),
                0..12,
            )
        ) {
            let mut cells = [[EMPTY; PUZZLE_SIZE]; PUZZLE_SIZE];
            for (row, col, value) in placements {
                cells[row][col] = value;
            }
            let grid = Grid::from_rows(cells);
            prop_assert_eq!(is_valid(&grid, Mode::Normal), naive_is_valid(&grid, Mode::Normal));
            prop_assert_eq!(is_valid(&grid, Mode::XSudoku), naive_is_valid(&grid, Mode::XSudoku));
        }
    }
}
