#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading puzzles from text and writing solutions back out.
//!
//! The input format is 9 lines of 9 consumed columns each. A column is
//! consumed by a digit `'1'..='9'` or a blank marker (`'.'`, `'0'`, or any
//! other unrecognized character); a comma is a zero-width separator that
//! consumes no column, so both `53..7....` and `5,3,.,.,7,.,.,.,.` parse to
//! the same row. Characters past the 9th consumed column are discarded up
//! to the end of the line. Truncated input is a fatal, immediately-reported
//! error.

use crate::sudoku::grid::{Grid, PUZZLE_SIZE, value_to_char};
use itertools::Itertools;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// An error produced while reading a puzzle.
#[derive(Debug)]
pub enum ParseError {
    /// The stream ended before all 9 rows were read.
    UnexpectedEof {
        /// Zero-based index of the row that was being read.
        row: usize,
    },
    /// A line ended before 9 columns were consumed.
    ShortRow {
        /// Zero-based index of the offending row.
        row: usize,
    },
    /// The underlying stream failed.
    Io(io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { row } => {
                write!(f, "end of input before reading entire puzzle (row {row})")
            }
            Self::ShortRow { row } => {
                write!(f, "line ended before reading all columns in row {row}")
            }
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::UnexpectedEof { .. } | Self::ShortRow { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Reads a puzzle from a stream.
///
/// To read from console input, call `read_grid(io::stdin().lock())`. To
/// read from a file, see [`read_grid_file`].
///
/// # Errors
///
/// [`ParseError::UnexpectedEof`] when the stream runs out before 9 rows are
/// read, [`ParseError::ShortRow`] when a line holds fewer than 9 columns,
/// and [`ParseError::Io`] when the stream itself fails.
pub fn read_grid<R: BufRead>(reader: R) -> Result<Grid, ParseError> {
    let mut lines = reader.lines();
    let mut grid = Grid::new();

    for row in 0..PUZZLE_SIZE {
        let line = lines
            .next()
            .ok_or(ParseError::UnexpectedEof { row })??;

        let mut col = 0;
        for c in line.chars() {
            if col == PUZZLE_SIZE {
                // Trailing characters are discarded up to the newline.
                break;
            }
            if c == ',' {
                continue;
            }
            grid.fill(row, col, crate::sudoku::grid::char_to_value(c));
            col += 1;
        }

        if col < PUZZLE_SIZE {
            return Err(ParseError::ShortRow { row });
        }
    }

    Ok(grid)
}

/// Reads a puzzle from a file.
///
/// # Errors
///
/// [`ParseError::Io`] when the file cannot be opened, otherwise as
/// [`read_grid`].
pub fn read_grid_file(path: &Path) -> Result<Grid, ParseError> {
    let file = File::open(path)?;
    read_grid(BufReader::new(file))
}

/// Writes the grid to the given stream as 9 plain lines, no separators.
///
/// # Errors
///
/// When the stream fails.
pub fn write_grid<W: Write>(grid: &Grid, stream: &mut W) -> io::Result<()> {
    writeln!(stream, "{grid}")
}

/// Writes the grid to the given stream as 9 comma-separated lines.
///
/// # Errors
///
/// When the stream fails.
pub fn write_grid_csv<W: Write>(grid: &Grid, stream: &mut W) -> io::Result<()> {
    for row in 0..PUZZLE_SIZE {
        let line = grid.row(row).map(value_to_char).join(",");
        writeln!(stream, "{line}")?;
    }
    Ok(())
}
