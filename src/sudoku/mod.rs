#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `grid` module holds the 9x9 grid data model.
pub mod grid;

/// The `io` module reads puzzles from text and writes solutions out.
pub mod io;

/// The `region` module implements the presence-set region checker and the
/// whole-grid validator.
pub mod region;

/// The `solver` module implements the backtracking search.
pub mod solver;
