use std::fmt::Display;

/// A cell address, zero-indexed from the top-left corner.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
  pub row: usize,
  pub col: usize,
}

impl From<(usize, usize)> for Pos {
  fn from((row, col): (usize, usize)) -> Self {
    Self { row, col }
  }
}

impl Display for Pos {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {})", self.row, self.col)
  }
}
