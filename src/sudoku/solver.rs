#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exhaustive depth-first backtracking search.
//!
//! The solver owns one mutable [`Grid`] for the whole search tree. Each
//! call frame revalidates the entire grid, picks the first empty cell in
//! row-major order, and tries the digits 1..=9 ascending: fill, recurse,
//! clear. Outside the single cell under trial, the grid a recursive call
//! sees is byte-identical to its caller's. The validator gate prunes
//! inconsistent branches before they recurse, which keeps this surprisingly
//! effective for plain brute force.

use crate::sudoku::grid::{CELL_COUNT, Grid, MAX_VALUE};
use crate::sudoku::io::write_grid_csv;
use crate::sudoku::region::{Mode, is_valid};
use std::io::{self, Write};

/// Counters accumulated across the whole search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Cell assignments attempted, including ones later undone.
    pub moves: u64,
    /// Complete valid grids found.
    pub solutions: u64,
}

/// A single backtracking search over one puzzle.
///
/// Every solution found is echoed to the console (unless suppressed) and
/// appended to `sink` in comma-separated form.
#[derive(Debug)]
pub struct Search<'a, W: Write> {
    mode: Mode,
    max_solutions: Option<u64>,
    echo: bool,
    sink: &'a mut W,
    stats: SearchStats,
}

impl<'a, W: Write> Search<'a, W> {
    /// Creates a search with the given constraint mode and solution cap.
    ///
    /// A cap of `None` enumerates every solution. With `echo` set, each
    /// solution is printed to stdout as it is found.
    pub fn new(mode: Mode, max_solutions: Option<u64>, echo: bool, sink: &'a mut W) -> Self {
        Self {
            mode,
            max_solutions,
            echo,
            sink,
            stats: SearchStats::default(),
        }
    }

    /// Runs the search to completion (or to the solution cap) and returns
    /// the accumulated counters.
    ///
    /// The grid is mutated in place. When the search finishes normally the
    /// grid is back in its initial state; when the solution cap cuts the
    /// search short, the most recent trial cells are deliberately left
    /// filled on the way out.
    ///
    /// # Errors
    ///
    /// When writing a solution to the sink fails.
    ///
    /// # Panics
    ///
    /// On internal invariant violations: recursing past [`CELL_COUNT`]
    /// frames, or filling a cell that already holds a digit.
    pub fn run(mut self, grid: &mut Grid) -> io::Result<SearchStats> {
        self.step(grid, 0)?;
        Ok(self.stats)
    }

    fn step(&mut self, grid: &mut Grid, depth: usize) -> io::Result<()> {
        // The search never goes deeper than the number of cells. If it
        // did, something went horribly wrong.
        assert!(
            depth <= CELL_COUNT,
            "search depth {depth} exceeds cell count"
        );

        // First base case: an inconsistent grid has no solutions below it.
        if !is_valid(grid, self.mode) {
            return Ok(());
        }

        // Second base case: valid with no empty cells means solved.
        let Some((row, col)) = grid.find_empty() else {
            self.stats.solutions += 1;
            if self.echo {
                println!(
                    "found solution {} in {} moves:\n\n{grid}\n",
                    self.stats.solutions, self.stats.moves
                );
            }
            write_grid_csv(grid, self.sink)?;
            return Ok(());
        };

        for value in 1..=MAX_VALUE {
            grid.fill(row, col, value);
            self.stats.moves += 1;

            self.step(grid, depth + 1)?;

            if self.cap_reached() {
                // Early exit: unwind without restoring the trial cell.
                return Ok(());
            }

            // Clear the cell again so backtracking works properly; the
            // next fill would panic otherwise.
            grid.clear(row, col);
        }

        Ok(())
    }

    fn cap_reached(&self) -> bool {
        self.max_solutions
            .is_some_and(|cap| self.stats.solutions >= cap)
    }
}
