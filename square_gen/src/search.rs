use std::collections::HashSet;

use common::{ConstraintMap, WordGrid};
use log::{debug, error};

use crate::{
  cancel::CancelToken,
  letter_set::LetterSet,
  word_trie::{NodeId, WordTrie},
};

/// Everything a search reads. All of it is shared and read-only for the
/// duration of the search.
#[derive(Clone)]
pub(crate) struct SearchContext<'a> {
  pub trie: &'a WordTrie,
  pub grid: &'a WordGrid,
  /// Reject a row that repeats a row placed above it.
  pub distinct_rows: bool,
  pub cancel: CancelToken,
}

impl SearchContext<'_> {
  fn size(&self) -> usize {
    self.grid.size()
  }
}

/// Letters that may extend a column whose letters so far spell `prefix`.
///
/// A letter qualifies only if some dictionary path through it still matches
/// every preset letter further down the column, so presets deep in a column
/// prune choices in the rows above them.
pub(crate) fn column_letters(
  trie: &WordTrie,
  prefix: &str,
  constraints: &ConstraintMap,
) -> LetterSet {
  let Some(node) = trie.find(prefix) else {
    return LetterSet::empty();
  };
  let depth = prefix.len();
  let Some(&last_constrained) = constraints.range(depth..).next_back().map(|(depth, _)| depth)
  else {
    return trie.child_letters(node);
  };

  trie
    .children(node)
    .filter(|&(c, child)| {
      constraints.get(&depth).is_none_or(|&fixed| fixed == c)
        && reaches_constraints(trie, child, depth + 1, last_constrained, constraints)
    })
    .map(|(c, _)| c)
    .collect()
}

/// True if a path from `node` (a prefix of length `depth`) spells every
/// letter fixed in `constraints` up to and including `last_constrained`.
fn reaches_constraints(
  trie: &WordTrie,
  node: NodeId,
  depth: usize,
  last_constrained: usize,
  constraints: &ConstraintMap,
) -> bool {
  let mut stack = vec![(node, depth)];
  while let Some((node, depth)) = stack.pop() {
    if depth > last_constrained {
      return true;
    }
    match constraints.get(&depth) {
      Some(&fixed) => stack.extend(trie.child(node, fixed).map(|child| (child, depth + 1))),
      None => stack.extend(trie.children(node).map(|(_, child)| (child, depth + 1))),
    }
  }
  false
}

struct LetterFrame {
  node: NodeId,
  remaining: LetterSet,
}

/// Lazily enumerates the dictionary words that can fill the next row of a
/// partially solved square, in ascending order.
pub(crate) struct RowCandidates<'a> {
  trie: &'a WordTrie,
  /// Legal letters for each cell of the row, by column.
  legal: Vec<LetterSet>,
  placed: Vec<String>,
  word: String,
  stack: Vec<LetterFrame>,
  cancel: CancelToken,
}

impl<'a> RowCandidates<'a> {
  /// Candidates for row `placed.len()`, given the rows already placed above.
  pub fn new(ctx: &SearchContext<'a>, placed: &[String]) -> Self {
    let row = placed.len();
    let legal: Option<Vec<LetterSet>> = (0..ctx.size())
      .map(|col| {
        let prefix: String =
          placed.iter().filter_map(|word| word.as_bytes().get(col)).map(|&b| b as char).collect();
        let letters = column_letters(ctx.trie, &prefix, &ctx.grid.all_column_constraints()[col]);
        let letters = match ctx.grid.all_row_constraints()[row].get(&col) {
          Some(&preset) => letters.intersection(LetterSet::single(preset)),
          None => letters,
        };
        (!letters.is_empty()).then_some(letters)
      })
      .collect();

    let (legal, stack) = match legal {
      Some(legal) => {
        let root = ctx.trie.root();
        let remaining = legal
          .first()
          .map_or(LetterSet::empty(), |&first| ctx.trie.child_letters(root).intersection(first));
        (legal, vec![LetterFrame { node: root, remaining }])
      }
      None => (Vec::new(), Vec::new()),
    };

    Self {
      trie: ctx.trie,
      legal,
      placed: if ctx.distinct_rows { placed.to_vec() } else { Vec::new() },
      word: String::new(),
      stack,
      cancel: ctx.cancel.clone(),
    }
  }
}

impl Iterator for RowCandidates<'_> {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    loop {
      if self.cancel.is_cancelled() {
        self.stack.clear();
        return None;
      }

      let frame = self.stack.last_mut()?;
      let node = frame.node;
      let Some(c) = frame.remaining.pop_first() else {
        self.stack.pop();
        self.word.pop();
        continue;
      };
      let Some(child) = self.trie.child(node, c) else {
        continue;
      };

      self.word.push(c);
      let depth = self.word.len();
      if depth == self.legal.len() {
        let candidate = self.word.clone();
        self.word.pop();
        if !self.placed.contains(&candidate) {
          return Some(candidate);
        }
      } else {
        let remaining = self.trie.child_letters(child).intersection(self.legal[depth]);
        self.stack.push(LetterFrame { node: child, remaining });
      }
    }
  }
}

/// One level of the row-by-row search: the rows still to try at that depth.
enum RowFrame<'a> {
  Seeded(std::vec::IntoIter<String>),
  Search(RowCandidates<'a>),
}

impl Iterator for RowFrame<'_> {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    match self {
      Self::Seeded(rows) => rows.next(),
      Self::Search(candidates) => candidates.next(),
    }
  }
}

/// Lazy, depth-first enumeration of the word squares completing a grid.
///
/// The search state is an explicit stack with one frame per placed row, so
/// it can stop after any yielded square and resume where it left off.
pub struct Solutions<'a> {
  ctx: SearchContext<'a>,
  rows: Vec<String>,
  stack: Vec<RowFrame<'a>>,
}

impl<'a> Solutions<'a> {
  pub(crate) fn new(ctx: SearchContext<'a>) -> Self {
    let first = RowCandidates::new(&ctx, &[]);
    Self { ctx, rows: Vec::new(), stack: vec![RowFrame::Search(first)] }
  }

  /// A search whose first row is drawn only from `first_rows`.
  pub(crate) fn seeded(ctx: SearchContext<'a>, first_rows: Vec<String>) -> Self {
    Self { ctx, rows: Vec::new(), stack: vec![RowFrame::Seeded(first_rows.into_iter())] }
  }

  /// Builds the square from the placed rows and keeps it only if no word is
  /// both one of its rows and one of its columns.
  fn accept(&self) -> Option<WordGrid> {
    let square = match WordGrid::from_rows(&self.rows) {
      Ok(square) => square,
      Err(err) => {
        error!("Discarding malformed square {:?}: {err}", self.rows);
        return None;
      }
    };

    let columns: HashSet<String> = square.columns().collect();
    (!self.rows.iter().any(|row| columns.contains(row))).then_some(square)
  }
}

impl Iterator for Solutions<'_> {
  type Item = WordGrid;

  fn next(&mut self) -> Option<WordGrid> {
    loop {
      if self.ctx.cancel.is_cancelled() {
        if !self.stack.is_empty() {
          debug!("Search cancelled with {} rows placed", self.rows.len());
          self.stack.clear();
        }
        return None;
      }

      let frame = self.stack.last_mut()?;
      match frame.next() {
        Some(row) => {
          self.rows.push(row);
          if self.rows.len() == self.ctx.size() {
            let square = self.accept();
            self.rows.pop();
            if square.is_some() {
              return square;
            }
          } else {
            let candidates = RowCandidates::new(&self.ctx, &self.rows);
            self.stack.push(RowFrame::Search(candidates));
          }
        }
        None => {
          self.stack.pop();
          self.rows.pop();
        }
      }
    }
  }
}
