#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::sudoku::io::{read_grid, read_grid_file};
use sudoku_solver::sudoku::region::{Mode, is_valid};
use sudoku_solver::sudoku::solver::{Search, SearchStats};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-solver",
    version,
    about = "A brute-force Sudoku and X-Sudoku solver"
)]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as the path to a puzzle file to solve.
    #[arg(value_name = "PUZZLE")]
    pub puzzle: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single puzzle file, or standard input when no path is given.
    Solve {
        /// Path to the puzzle file. Omit it to type the puzzle on stdin.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Which constraints to enforce: plain Sudoku, or X-Sudoku with both
    /// main diagonals duplicate-free as well.
    #[arg(short, long, value_enum, default_value_t = Mode::Normal)]
    pub(crate) mode: Mode,

    /// Stop after this many solutions. Omit it to enumerate every solution.
    #[arg(long)]
    pub(crate) max_solutions: Option<u64>,

    /// Path of the CSV file the solutions are written to.
    /// Defaults to `<input>.csv`, or `solutions.csv` when reading stdin.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Enable printing of search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Suppress the per-solution console echo; solutions still go to the
    /// CSV file.
    #[arg(short, long, default_value_t = false)]
    pub(crate) quiet: bool,
}

/// Where the CSV solutions end up when `--output` is not given.
fn default_output_path(input: Option<&Path>) -> PathBuf {
    input.map_or_else(
        || PathBuf::from("solutions.csv"),
        |path| PathBuf::from(format!("{}.csv", path.display())),
    )
}

/// Loads a puzzle, sanity-checks it, runs the search, and reports.
///
/// Reads from `path` when given and from standard input otherwise. Every
/// solution is echoed to the console (unless `--quiet`) and appended to the
/// CSV sink.
///
/// # Errors
///
/// On malformed input, an unopenable output sink, a failed solution write,
/// or an initially invalid puzzle.
pub(crate) fn solve_puzzle(path: Option<&Path>, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let grid = match path {
        Some(path) => {
            if !path.is_file() {
                return Err(format!("puzzle file does not exist: {}", path.display()));
            }
            read_grid_file(path).map_err(|e| format!("error reading {}: {e}", path.display()))?
        }
        None => {
            println!("reading from standard input:");
            read_grid(io::stdin().lock()).map_err(|e| format!("error reading stdin: {e}"))?
        }
    };
    let parse_time = time.elapsed();

    // Display the initial puzzle as a sanity check.
    println!("got initial puzzle:\n\n{grid}\n");

    if !is_valid(&grid, common.mode) {
        return Err(format!("initial puzzle invalid under {} rules", common.mode));
    }

    let sink_path = common
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(path));
    let file = File::create(&sink_path)
        .map_err(|e| format!("couldn't open output file {}: {e}", sink_path.display()))?;
    let mut sink = BufWriter::new(file);

    let mut grid = grid;
    let time = Instant::now();
    let search_stats = Search::new(common.mode, common.max_solutions, !common.quiet, &mut sink)
        .run(&mut grid)
        .map_err(|e| format!("couldn't write solutions to {}: {e}", sink_path.display()))?;
    let elapsed = time.elapsed();

    sink.flush()
        .map_err(|e| format!("couldn't flush output file {}: {e}", sink_path.display()))?;

    println!(
        "total {} moves, {} solutions",
        search_stats.moves, search_stats.solutions
    );
    println!("solutions written to: {}", sink_path.display());

    if common.stats {
        epoch::advance().unwrap();

        let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
        let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

        let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
        let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

        print_stats(
            parse_time,
            elapsed,
            &search_stats,
            allocated_mib,
            resident_mib,
        );
    }

    Ok(())
}

/// Solves a directory of puzzle files.
///
/// Walks the tree, solves each `.sudoku` file, and reports the results per
/// file; other files are skipped.
///
/// # Errors
///
/// When the path is not a directory, or when solving any puzzle fails.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        println!("Solving: {}", file_path.display());
        solve_puzzle(Some(file_path), common)?;
    }

    Ok(())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of parse and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the search.
/// * `s` - `SearchStats` collected by the search.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
fn print_stats(parse_time: Duration, elapsed: Duration, s: &SearchStats, allocated: f64, resident: f64) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n========================[ Search Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line_with_rate("Moves", s.moves, elapsed_secs);
    stat_line("Solutions", s.solutions);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
