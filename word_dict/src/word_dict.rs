use std::{
  borrow::Borrow,
  collections::BTreeSet,
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use log::debug;
use util::error::SquareResult;

/// The set of distinct dictionary words of one fixed length, all lowercase
/// a-z, kept in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordDict {
  words: BTreeSet<String>,
  word_len: usize,
}

impl WordDict {
  /// Trims and lowercases `line`, keeping it only if it is exactly `word_len`
  /// letters in a-z.
  pub fn canonicalize_word(line: &str, word_len: usize) -> Option<String> {
    let word = line.trim().to_lowercase();
    (word.chars().count() == word_len && word.chars().all(|c| c.is_ascii_lowercase()))
      .then_some(word)
  }

  /// Builds a dictionary from candidate lines, silently dropping every line
  /// that doesn't canonicalize to a `word_len` word.
  pub fn from_lines<S>(lines: impl IntoIterator<Item = S>, word_len: usize) -> Self
  where
    S: Borrow<str>,
  {
    let (read, words) =
      lines.into_iter().fold((0usize, BTreeSet::new()), |(read, mut words), line| {
        if let Some(word) = Self::canonicalize_word(line.borrow(), word_len) {
          words.insert(word);
        }
        (read + 1, words)
      });
    debug!("Kept {} of {read} dictionary lines for word length {word_len}", words.len());

    Self { words, word_len }
  }

  pub fn from_reader(reader: impl BufRead, word_len: usize) -> SquareResult<Self> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(Self::from_lines(lines, word_len))
  }

  pub fn from_file(path: impl AsRef<Path>, word_len: usize) -> SquareResult<Self> {
    Self::from_reader(BufReader::new(File::open(path)?), word_len)
  }

  pub fn word_len(&self) -> usize {
    self.word_len
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.words.iter().map(|word| word.as_str())
  }
}
