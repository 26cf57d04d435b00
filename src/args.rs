use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
  /// Print the first square found.
  First,
  /// Print squares as the search finds them.
  Stream,
  /// Search on every core and print all squares.
  All,
}

#[derive(Parser, Debug)]
#[command(version, about = "Fills in N x N word squares", long_about = None)]
pub struct Args {
  /// Dictionary file, one word per line.
  #[arg(long, default_value = "./words.txt")]
  pub dict: PathBuf,

  /// Word length, and so the side of the square.
  #[arg(long, default_value_t = 5)]
  pub size: usize,

  /// File holding the starting grid, one line per row.
  #[arg(long, conflicts_with = "row")]
  pub grid: Option<PathBuf>,

  /// A row of the starting grid. Repeat once per row; '.' or '_' is a
  /// blank cell.
  #[arg(long)]
  pub row: Vec<String>,

  #[arg(long, value_enum, default_value = "first")]
  pub mode: RunMode,

  /// Stop streaming after this many squares.
  #[arg(long)]
  pub limit: Option<usize>,

  /// Report whether each word is in the dictionary instead of solving.
  #[arg(long)]
  pub check: Vec<String>,

  /// Don't use the same word for two rows of a square.
  #[arg(long)]
  pub distinct_rows: bool,

  #[arg(long)]
  pub verbose: bool,
}
