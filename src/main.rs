//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line solver for 9x9 Sudoku puzzles,
//! including the X-Sudoku variant where the two main diagonals must also be
//! duplicate-free. The method used here, brute-force backtracking search
//! gated by a fast bit-vector region check, is surprisingly effective on
//! modern machines.
//!
//! Puzzles are 9 lines of text: the digits `1`-`9` for filled cells, `.`
//! (or `0`) for empty cells, with optional commas between cells. Every
//! solution found is printed to the console and appended, comma-separated,
//! to a CSV file.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file under normal rules
//! sudoku-solver puzzle.sudoku
//!
//! # Same, spelled out, writing solutions somewhere specific
//! sudoku-solver solve --path puzzle.sudoku --output solved.csv
//!
//! # Enforce the diagonal constraints and stop after the first solution
//! sudoku-solver solve --path puzzle.sudoku --mode x-sudoku --max-solutions 1
//!
//! # Type the puzzle on stdin
//! sudoku-solver solve
//!
//! # Solve every .sudoku file under a directory
//! sudoku-solver dir --path puzzles/
//!
//! # Generate shell completions
//! sudoku-solver completions bash
//! ```
//!
//! A successful run exits 0. A puzzle that is invalid before the search
//! even starts is reported and exits 1, as do malformed input files and
//! unwritable output paths.
//!
//! This file (`main.rs`) contains the entry point; the CLI surface and the
//! reporting live in `command_line`, and the solving logic in the library's
//! `sudoku` module.

use crate::command_line::cli::{Cli, Commands, solve_dir, solve_puzzle};
use clap::{CommandFactory, Parser};
use std::io;

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the sudoku solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and maps errors to a failing exit status.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided without a subcommand. This
    // defaults to solving that puzzle file.
    if let Some(path) = cli.puzzle.clone() {
        if cli.command.is_none() {
            exit_on_error(solve_puzzle(Some(&path), &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => {
            exit_on_error(solve_puzzle(path.as_deref(), &common));
        }
        Some(Commands::Dir { path, common }) => {
            exit_on_error(solve_dir(&path, &common));
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            // Reached when neither a puzzle path nor a subcommand was given.
            eprintln!("No puzzle provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Reports an error and exits with a failure status.
fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
