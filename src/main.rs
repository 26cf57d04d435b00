#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;
mod logger;

use std::fs;

use args::{Args, RunMode};
use clap::Parser;
use common::{WordGrid, BLANK};
use itertools::Itertools;
use log::info;
use square_gen::SquareSolver;
use util::{error::SquareResult, time::log_time};

/// Command-line rows and grid files may mark blank cells with '.' or '_'.
fn unmark_blanks(row: &str) -> String {
  row.chars().map(|c| if c == '.' || c == '_' { BLANK } else { c }).collect()
}

fn starting_grid(args: &Args) -> SquareResult<WordGrid> {
  if let Some(path) = &args.grid {
    WordGrid::from_text(&unmark_blanks(&fs::read_to_string(path)?))
  } else if !args.row.is_empty() {
    WordGrid::from_rows(&args.row.iter().map(|row| unmark_blanks(row)).collect_vec())
  } else {
    WordGrid::new(args.size)
  }
}

/// Prints each square followed by a blank line, returning how many there were.
fn print_squares(squares: impl IntoIterator<Item = WordGrid>) -> usize {
  let mut count = 0;
  for square in squares {
    println!("{square}\n");
    count += 1;
  }
  count
}

fn solve(solver: &SquareSolver, grid: &WordGrid, args: &Args) -> SquareResult<usize> {
  Ok(match args.mode {
    RunMode::First => print_squares(solver.find_solutions(grid)?.take(1)),
    RunMode::Stream => {
      print_squares(solver.find_solutions(grid)?.take(args.limit.unwrap_or(usize::MAX)))
    }
    RunMode::All => {
      let squares = solver.find_all_solutions(grid)?;
      print_squares(squares.into_iter().sorted_by_cached_key(|square| square.to_string()))
    }
  })
}

fn main() -> SquareResult {
  let args = Args::parse();
  logger::init_logger(args.verbose);

  let grid = starting_grid(&args)?;
  let solver = log_time(&format!("Loading {}", args.dict.display()), || {
    SquareSolver::load(&args.dict, grid.size())
  })?
  .with_distinct_rows(args.distinct_rows);

  if !args.check.is_empty() {
    for word in &args.check {
      let word = word.to_lowercase();
      println!("{word}: {}", if solver.contains(&word) { "yes" } else { "no" });
    }
    return Ok(());
  }

  let found = log_time("Search", || solve(&solver, &grid, &args))?;
  if found == 0 {
    println!("No word squares found");
  }
  info!("Found {found} word squares");

  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use common::WordGrid;
  use googletest::prelude::*;
  use util::error::{square_error, SquareError};

  use super::unmark_blanks;

  #[gtest]
  fn test_unmark_blanks() {
    expect_that!(unmark_blanks("c._\n_o.\n..t"), eq("c  \n o \n  t"));
    let grid = WordGrid::from_text(&unmark_blanks("c..\n...\n..n")).unwrap();
    expect_that!(grid.get((0, 0)).unwrap(), some(eq('c')));
    expect_that!(grid.get((1, 1)).unwrap(), none());
    expect_that!(grid.get((2, 2)).unwrap(), some(eq('n')));
  }

  #[gtest]
  fn test_empty_grid_text() {
    let error = WordGrid::from_text(&unmark_blanks("")).unwrap_err();
    expect_true!(matches!(square_error(error.as_ref()), Some(SquareError::Parse(_))));
  }
}
