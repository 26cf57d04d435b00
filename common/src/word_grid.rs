use std::{
  collections::BTreeMap,
  fmt::{Debug, Display},
};

use itertools::Itertools;
use util::{
  error::{SquareError, SquareResult},
  grid::{Grid, Gridlike, MutGridlike},
  pos::Pos,
};

/// How a blank cell is written in a grid's textual form.
pub const BLANK: char = ' ';

/// Position along a row or column -> the letter fixed there.
pub type ConstraintMap = BTreeMap<usize, char>;

/// An N x N grid of letters, where blank cells are `None`.
///
/// Every non-blank cell is mirrored into two constraint maps: one for its row
/// (keyed by column) and one for its column (keyed by row). Both are updated
/// on every mutation, so they are never stale when read.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WordGrid {
  cells: Grid<Option<char>>,
  row_constraints: Vec<ConstraintMap>,
  column_constraints: Vec<ConstraintMap>,
}

impl WordGrid {
  /// A blank `size` x `size` grid.
  pub fn new(size: usize) -> SquareResult<Self> {
    if size == 0 {
      return Err(SquareError::InvalidArgument("Grid size must be at least 1".to_owned()).into());
    }

    Ok(Self {
      cells: Grid::new(size, size),
      row_constraints: vec![ConstraintMap::new(); size],
      column_constraints: vec![ConstraintMap::new(); size],
    })
  }

  /// Builds a grid from its row strings. There must be as many rows as there
  /// are characters in each row; spaces are blank cells.
  pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> SquareResult<Self> {
    let mut grid = Self::new(rows.len())?;
    for (index, row) in rows.iter().enumerate() {
      grid.set_row(index, row.as_ref())?;
    }
    Ok(grid)
  }

  /// Parses the textual form: one line per row, blank cells as spaces.
  pub fn from_text(text: &str) -> SquareResult<Self> {
    let rows = text.lines().collect_vec();
    if rows.is_empty() {
      return Err(SquareError::Parse("Empty grid text".to_owned()).into());
    }
    Self::from_rows(&rows)
  }

  pub fn size(&self) -> usize {
    self.cells.width()
  }

  fn check_index(&self, index: usize, what: &str) -> SquareResult {
    if index >= self.size() {
      return Err(
        SquareError::OutOfRange(format!("{what} {index} is outside [0, {})", self.size())).into(),
      );
    }
    Ok(())
  }

  fn check_pos(&self, pos: Pos) -> SquareResult {
    self.check_index(pos.row, "Row")?;
    self.check_index(pos.col, "Column")
  }

  /// Maps a cell character to its stored value, folding case.
  fn parse_cell(c: char) -> SquareResult<Option<char>> {
    let c = c.to_ascii_lowercase();
    match c {
      BLANK => Ok(None),
      'a'..='z' => Ok(Some(c)),
      _ => Err(SquareError::InvalidArgument(format!("'{c}' is not a letter or blank")).into()),
    }
  }

  fn parse_word(&self, word: &str) -> SquareResult<Vec<Option<char>>> {
    let cells = word.chars().map(Self::parse_cell).collect::<SquareResult<Vec<_>>>()?;
    if cells.len() != self.size() {
      return Err(
        SquareError::InvalidArgument(format!(
          "\"{word}\" has length {}, expected {}",
          cells.len(),
          self.size()
        ))
        .into(),
      );
    }
    Ok(cells)
  }

  fn write_cell(&mut self, pos: Pos, value: Option<char>) -> SquareResult {
    let cell = self.cells.get_mut(pos).ok_or_else(|| {
      SquareError::Internal(format!("Mutable access pos is out of bounds: {pos}"))
    })?;
    *cell = value;

    match value {
      Some(letter) => {
        self.row_constraints[pos.row].insert(pos.col, letter);
        self.column_constraints[pos.col].insert(pos.row, letter);
      }
      None => {
        self.row_constraints[pos.row].remove(&pos.col);
        self.column_constraints[pos.col].remove(&pos.row);
      }
    }
    Ok(())
  }

  /// The letter at `pos`, or `None` if the cell is blank.
  pub fn get(&self, pos: impl Into<Pos>) -> SquareResult<Option<char>> {
    let pos = pos.into();
    self.check_pos(pos)?;
    Ok(self.cells.get(pos).cloned().flatten())
  }

  /// Sets the cell at `pos` to a letter (either case) or to `BLANK`.
  pub fn set(&mut self, pos: impl Into<Pos>, c: char) -> SquareResult {
    let pos = pos.into();
    self.check_pos(pos)?;
    let value = Self::parse_cell(c)?;
    self.write_cell(pos, value)
  }

  pub fn set_row(&mut self, index: usize, word: &str) -> SquareResult {
    self.check_index(index, "Row")?;
    let cells = self.parse_word(word)?;
    cells
      .into_iter()
      .enumerate()
      .try_for_each(|(col, value)| self.write_cell(Pos { row: index, col }, value))
  }

  pub fn set_column(&mut self, index: usize, word: &str) -> SquareResult {
    self.check_index(index, "Column")?;
    let cells = self.parse_word(word)?;
    cells
      .into_iter()
      .enumerate()
      .try_for_each(|(row, value)| self.write_cell(Pos { row, col: index }, value))
  }

  /// Column index -> letter for every filled cell of row `index`.
  pub fn row_constraints(&self, index: usize) -> SquareResult<&ConstraintMap> {
    self.check_index(index, "Row")?;
    Ok(&self.row_constraints[index])
  }

  /// Row index -> letter for every filled cell of column `index`.
  pub fn column_constraints(&self, index: usize) -> SquareResult<&ConstraintMap> {
    self.check_index(index, "Column")?;
    Ok(&self.column_constraints[index])
  }

  pub fn all_row_constraints(&self) -> &[ConstraintMap] {
    &self.row_constraints
  }

  pub fn all_column_constraints(&self) -> &[ConstraintMap] {
    &self.column_constraints
  }

  fn line_to_string<'a>(cells: impl Iterator<Item = &'a Option<char>>) -> String {
    cells.map(|cell| cell.unwrap_or(BLANK)).collect()
  }

  pub fn row(&self, index: usize) -> SquareResult<String> {
    self.check_index(index, "Row")?;
    Ok(Self::line_to_string(self.cells.iter_row(index)))
  }

  pub fn column(&self, index: usize) -> SquareResult<String> {
    self.check_index(index, "Column")?;
    Ok(Self::line_to_string(self.cells.iter_col(index)))
  }

  pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
    (0..self.size()).map(|index| Self::line_to_string(self.cells.iter_row(index)))
  }

  pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
    (0..self.size()).map(|index| Self::line_to_string(self.cells.iter_col(index)))
  }

  /// True if `word` reads exactly along some row or some column.
  pub fn contains(&self, word: &str) -> bool {
    if word.chars().count() != self.size() {
      return false;
    }
    self.rows().chain(self.columns()).any(|line| line == word)
  }

  pub fn is_complete(&self) -> bool {
    self.row_constraints.iter().all(|constraints| constraints.len() == self.size())
  }

  pub fn clear(&mut self) {
    self.cells.iter_mut().for_each(|cell| *cell = None);
    self.row_constraints.iter_mut().for_each(ConstraintMap::clear);
    self.column_constraints.iter_mut().for_each(ConstraintMap::clear);
  }
}

impl Display for WordGrid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.rows().join("\n"))
  }
}

impl Debug for WordGrid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("WordGrid").field(&self.rows().collect_vec()).finish()
  }
}
