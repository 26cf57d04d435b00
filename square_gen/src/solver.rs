use std::{borrow::Borrow, path::Path};

use common::WordGrid;
use log::{debug, info, warn};
use rayon::prelude::*;
use util::error::{SquareError, SquareResult};
use word_dict::WordDict;

use crate::{
  cancel::CancelToken,
  search::{RowCandidates, SearchContext, Solutions},
  word_trie::{TraverseWords, WordTrie},
};

/// Finds word squares over a fixed dictionary of N-letter words.
///
/// The dictionary and its trie are built once and only read afterwards, so
/// one solver can serve any number of searches, concurrent ones included.
#[derive(Clone, Debug, Default)]
pub struct SquareSolver {
  dictionary: WordDict,
  trie: WordTrie,
  distinct_rows: bool,
}

impl SquareSolver {
  pub fn new(dictionary: WordDict) -> SquareResult<Self> {
    let trie = WordTrie::from_words(dictionary.iter())?;
    if trie.len() != dictionary.len() {
      return Err(
        SquareError::Internal(format!(
          "Trie holds {} words but the dictionary has {}",
          trie.len(),
          dictionary.len()
        ))
        .into(),
      );
    }
    if trie.is_empty() {
      warn!("No words of length {} in the dictionary", dictionary.word_len());
    }
    info!("Loaded {} words of length {}", dictionary.len(), dictionary.word_len());
    Ok(Self { dictionary, trie, distinct_rows: false })
  }

  /// Keeps the words of exactly `word_len` letters a-z (case-folded) and
  /// silently drops every other entry.
  pub fn from_words<S>(words: impl IntoIterator<Item = S>, word_len: usize) -> SquareResult<Self>
  where
    S: Borrow<str>,
  {
    Self::new(WordDict::from_lines(words, word_len))
  }

  /// Reads a one-word-per-line dictionary file.
  pub fn load(path: impl AsRef<Path>, word_len: usize) -> SquareResult<Self> {
    Self::new(WordDict::from_file(path, word_len)?)
  }

  /// Replaces the dictionary with `words`, filtered to `word_len`.
  pub fn initialize<S>(
    &mut self,
    words: impl IntoIterator<Item = S>,
    word_len: usize,
  ) -> SquareResult
  where
    S: Borrow<str>,
  {
    let distinct_rows = self.distinct_rows;
    *self = Self::from_words(words, word_len)?.with_distinct_rows(distinct_rows);
    Ok(())
  }

  /// When set, a square may not use the same word for two of its rows.
  pub fn with_distinct_rows(mut self, distinct_rows: bool) -> Self {
    self.distinct_rows = distinct_rows;
    self
  }

  pub fn word_len(&self) -> usize {
    self.dictionary.word_len()
  }

  /// Number of distinct words loaded.
  pub fn len(&self) -> usize {
    self.dictionary.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dictionary.is_empty()
  }

  /// The loaded words in ascending order.
  pub fn words(&self) -> TraverseWords<'_> {
    self.trie.traverse_words()
  }

  pub fn contains(&self, word: &str) -> bool {
    word.len() == self.word_len() && self.trie.contains(word)
  }

  fn context<'a>(
    &'a self,
    grid: &'a WordGrid,
    cancel: &CancelToken,
  ) -> SquareResult<SearchContext<'a>> {
    if grid.size() != self.word_len() {
      return Err(
        SquareError::InvalidArgument(format!(
          "Grid of size {} can't be solved with words of length {}",
          grid.size(),
          self.word_len()
        ))
        .into(),
      );
    }
    Ok(SearchContext {
      trie: &self.trie,
      grid,
      distinct_rows: self.distinct_rows,
      cancel: cancel.clone(),
    })
  }

  /// Lazily enumerates the squares completing `grid`, depth first, in
  /// ascending row-major order.
  pub fn find_solutions<'a>(&'a self, grid: &'a WordGrid) -> SquareResult<Solutions<'a>> {
    self.find_solutions_with_cancel(grid, &CancelToken::new())
  }

  /// Like `find_solutions`, but the sequence ends as soon as `cancel` fires.
  pub fn find_solutions_with_cancel<'a>(
    &'a self,
    grid: &'a WordGrid,
    cancel: &CancelToken,
  ) -> SquareResult<Solutions<'a>> {
    Ok(Solutions::new(self.context(grid, cancel)?))
  }

  /// Finds every square completing `grid`, spreading the search over the
  /// rayon thread pool. The order of the result is unspecified.
  pub fn find_all_solutions(&self, grid: &WordGrid) -> SquareResult<Vec<WordGrid>> {
    self.find_all_solutions_with_cancel(grid, &CancelToken::new())
  }

  /// Like `find_all_solutions`, but returns early with the squares found so
  /// far once `cancel` fires.
  pub fn find_all_solutions_with_cancel(
    &self,
    grid: &WordGrid,
    cancel: &CancelToken,
  ) -> SquareResult<Vec<WordGrid>> {
    let ctx = self.context(grid, cancel)?;

    // Deal the first rows out round-robin, one list per worker.
    let workers = rayon::current_num_threads().max(1);
    let mut first_rows = vec![Vec::new(); workers];
    let mut total = 0;
    for (index, row) in RowCandidates::new(&ctx, &[]).enumerate() {
      first_rows[index % workers].push(row);
      total += 1;
    }
    debug!("Split {total} first-row candidates across {workers} workers");

    let per_worker: Vec<Vec<WordGrid>> = first_rows
      .into_par_iter()
      .enumerate()
      .map(|(worker, rows)| {
        let solutions: Vec<_> = Solutions::seeded(ctx.clone(), rows).collect();
        debug!("Worker {worker} found {} solutions", solutions.len());
        solutions
      })
      .collect();

    Ok(per_worker.into_iter().flatten().collect())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::collections::BTreeSet;

  use common::WordGrid;
  use googletest::prelude::*;
  use itertools::Itertools;

  use super::SquareSolver;
  use crate::cancel::CancelToken;

  const THREE_LETTER_WORDS: [&str; 48] = [
    "ace", "act", "ago", "aid", "ale", "ant", "ape", "arc", "are", "art", "ate", "awe", "bat",
    "bee", "cab", "cat", "cod", "cot", "dab", "den", "doe", "dot", "ear", "eat", "ego", "era",
    "eta", "ewe", "gap", "nab", "net", "nod", "oar", "oat", "ode", "one", "ore", "pea", "rat",
    "roe", "tab", "tan", "tea", "ten", "toe", "ton", "wed", "wet",
  ];

  fn ab_solver() -> SquareSolver {
    SquareSolver::from_words(["aa", "ab", "ba", "bb"], 2).unwrap()
  }

  fn word_solver() -> SquareSolver {
    SquareSolver::from_words(THREE_LETTER_WORDS, 3).unwrap()
  }

  fn as_text(squares: impl IntoIterator<Item = WordGrid>) -> BTreeSet<String> {
    squares.into_iter().map(|square| square.to_string()).collect()
  }

  /// Asserts everything a solution must satisfy relative to its puzzle.
  fn check_solution(solver: &SquareSolver, puzzle: &WordGrid, square: &WordGrid) {
    assert_eq!(square.size(), puzzle.size());
    for (row, col) in (0..puzzle.size()).cartesian_product(0..puzzle.size()) {
      if let Some(preset) = puzzle.get((row, col)).unwrap() {
        assert_eq!(square.get((row, col)).unwrap(), Some(preset));
      }
    }
    let rows: BTreeSet<_> = square.rows().collect();
    let columns: BTreeSet<_> = square.columns().collect();
    assert!(rows.iter().chain(columns.iter()).all(|word| solver.contains(word)), "{square}");
    assert!(rows.is_disjoint(&columns), "{square}");
  }

  #[gtest]
  fn test_initialize_filters() {
    let mut solver = SquareSolver::default();
    solver.initialize(["Ab", "ab", "abc", "a", "x1", " ba "], 2).unwrap();
    expect_that!(solver.word_len(), eq(2));
    expect_that!(solver.len(), eq(2));
    expect_that!(solver.words().collect::<Vec<_>>(), elements_are![eq("ab"), eq("ba")]);

    solver.initialize(["cat", "dog"], 3).unwrap();
    expect_that!(solver.word_len(), eq(3));
    expect_false!(solver.contains("ab"));
    expect_true!(solver.contains("dog"));
  }

  #[gtest]
  fn test_no_words_of_length() {
    let solver = SquareSolver::from_words(["toolong", "ab"], 3).unwrap();
    expect_true!(solver.is_empty());
    expect_that!(solver.len(), eq(0));
    expect_that!(solver.words().next(), none());
    expect_true!(SquareSolver::default().is_empty());
  }

  #[gtest]
  fn test_initialize_keeps_distinct_rows() {
    let mut solver = SquareSolver::default().with_distinct_rows(true);
    solver.initialize(["aa", "ab", "ba", "bb"], 2).unwrap();
    let grid = WordGrid::new(2).unwrap();
    expect_that!(solver.find_solutions(&grid).unwrap().count(), eq(2));
  }

  #[gtest]
  fn test_contains() {
    let solver = ab_solver();
    expect_true!(solver.contains("ab"));
    expect_false!(solver.contains("xy"));
    expect_false!(solver.contains("a"));
    expect_false!(solver.contains("abb"));
  }

  #[gtest]
  fn test_words_round_trip() {
    let solver = word_solver();
    expect_that!(solver.len(), eq(THREE_LETTER_WORDS.len()));
    expect_true!(solver.words().eq(THREE_LETTER_WORDS));
  }

  #[gtest]
  fn test_all_solutions_empty_grid() {
    let solver = ab_solver();
    let grid = WordGrid::new(2).unwrap();
    let all = solver.find_all_solutions(&grid).unwrap();
    expect_that!(all.len(), eq(4));
    expect_that!(
      all.iter().map(|square| square.to_string()).collect::<Vec<_>>(),
      unordered_elements_are![eq("ab\nab"), eq("ba\nba"), eq("aa\nbb"), eq("bb\naa")]
    );
  }

  #[gtest]
  fn test_preset_row() {
    let solver = ab_solver();
    let mut grid = WordGrid::new(2).unwrap();
    grid.set_row(0, "ab").unwrap();
    expect_that!(
      solver.find_solutions(&grid).unwrap().map(|square| square.to_string()).collect::<Vec<_>>(),
      elements_are![eq("ab\nab")]
    );
    expect_that!(grid.row(1).unwrap(), eq("  "));
  }

  #[gtest]
  fn test_distinct_rows() {
    let solver = ab_solver().with_distinct_rows(true);
    let grid = WordGrid::new(2).unwrap();
    expect_that!(
      solver.find_solutions(&grid).unwrap().map(|square| square.to_string()).collect::<Vec<_>>(),
      elements_are![eq("aa\nbb"), eq("bb\naa")]
    );
    expect_that!(solver.find_all_solutions(&grid).unwrap().len(), eq(2));
  }

  #[gtest]
  fn test_size_mismatch() {
    let solver = ab_solver();
    let grid = WordGrid::new(3).unwrap();
    expect_true!(solver.find_solutions(&grid).is_err());
    expect_true!(solver.find_all_solutions(&grid).is_err());
  }

  #[gtest]
  fn test_no_solutions_is_empty() {
    let solver = ab_solver();
    let grid = WordGrid::from_rows(&["z ", "  "]).unwrap();
    expect_that!(solver.find_solutions(&grid).unwrap().next(), none());
    expect_true!(solver.find_all_solutions(&grid).unwrap().is_empty());
  }

  #[gtest]
  fn test_last_row_preset_keeps_columns_valid() {
    let solver = SquareSolver::from_words(["aa", "ab", "ba"], 2).unwrap();
    let grid = WordGrid::from_rows(&["  ", " b"]).unwrap();
    for square in solver.find_solutions(&grid).unwrap() {
      check_solution(&solver, &grid, &square);
    }
    expect_true!(solver.find_all_solutions(&grid).unwrap().is_empty());
  }

  #[gtest]
  fn test_parallel_matches_sequential() {
    let solver = word_solver();
    let grid = WordGrid::new(3).unwrap();
    let sequential: Vec<_> = solver.find_solutions(&grid).unwrap().collect();
    let parallel = solver.find_all_solutions(&grid).unwrap();

    expect_that!(sequential.len(), eq(26));
    expect_that!(parallel.len(), eq(sequential.len()));
    for square in &sequential {
      check_solution(&solver, &grid, square);
    }
    expect_true!(as_text(sequential) == as_text(parallel));
  }

  #[gtest]
  fn test_corner_presets() {
    let solver = word_solver();
    let grid = WordGrid::from_text("c  \n   \n  n").unwrap();
    let sequential: Vec<_> = solver.find_solutions(&grid).unwrap().collect();
    for square in &sequential {
      check_solution(&solver, &grid, square);
    }
    expect_that!(
      sequential.iter().map(|square| square.to_string()).collect::<Vec<_>>(),
      elements_are![eq("cat\nore\nden"), eq("cod\nare\nten")]
    );
    expect_true!(as_text(sequential) == as_text(solver.find_all_solutions(&grid).unwrap()));
  }

  #[gtest]
  fn test_parallel_matches_sequential_with_presets() {
    let solver = word_solver();
    for text in [" c \n   \n   ", "   \n o \n   ", "  t\n   \no  "] {
      let grid = WordGrid::from_text(text).unwrap();
      let sequential: Vec<_> = solver.find_solutions(&grid).unwrap().collect();
      let parallel = solver.find_all_solutions(&grid).unwrap();
      for square in &sequential {
        check_solution(&solver, &grid, square);
      }
      expect_true!(as_text(sequential) == as_text(parallel));
    }
  }

  #[gtest]
  fn test_sequential_is_deterministic_and_sorted() {
    let solver = word_solver();
    let grid = WordGrid::new(3).unwrap();
    let first: Vec<_> = solver.find_solutions(&grid).unwrap().map(|s| s.to_string()).collect();
    let second: Vec<_> = solver.find_solutions(&grid).unwrap().map(|s| s.to_string()).collect();
    expect_true!(first == second);
    expect_true!(first.windows(2).all(|pair| pair[0] < pair[1]));
  }

  #[gtest]
  fn test_stopping_early() {
    let solver = word_solver();
    let grid = WordGrid::new(3).unwrap();
    let all: Vec<_> = solver.find_solutions(&grid).unwrap().collect();
    let first_two: Vec<_> = solver.find_solutions(&grid).unwrap().take(2).collect();
    expect_true!(all.len() >= 2);
    expect_true!(first_two[..] == all[..2]);
  }

  #[gtest]
  fn test_cancelled_before_start() {
    let solver = word_solver();
    let grid = WordGrid::new(3).unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();
    expect_that!(solver.find_solutions_with_cancel(&grid, &cancel).unwrap().next(), none());
    expect_true!(solver.find_all_solutions_with_cancel(&grid, &cancel).unwrap().is_empty());
  }
}
