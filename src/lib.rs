#![deny(missing_docs)]
//! This crate provides a brute-force backtracking solver for 9x9 Sudoku
//! puzzles, including the X-Sudoku variant that additionally constrains the
//! two main diagonals.

/// The `sudoku` module implements the grid data model, the region-based
/// validator, the puzzle I/O, and the backtracking search.
pub mod sudoku;
