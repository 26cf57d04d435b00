use std::fmt;

/// A set of lowercase letters a-z, one bit per letter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct LetterSet {
  accepted: u32,
}

impl LetterSet {
  fn bit(letter: char) -> u32 {
    if letter.is_ascii_lowercase() {
      1 << (letter as u32 - 'a' as u32)
    } else {
      0
    }
  }

  pub const fn empty() -> Self {
    Self { accepted: 0 }
  }

  pub fn single(letter: char) -> Self {
    Self { accepted: Self::bit(letter) }
  }

  /// Inserts `letter`. Anything outside a-z is ignored.
  pub fn insert(&mut self, letter: char) {
    self.accepted |= Self::bit(letter);
  }

  pub fn intersection(self, other: Self) -> Self {
    Self { accepted: self.accepted & other.accepted }
  }

  pub fn is_empty(&self) -> bool {
    self.accepted == 0
  }

  /// Removes and returns the smallest letter in the set.
  pub fn pop_first(&mut self) -> Option<char> {
    if self.accepted == 0 {
      return None;
    }
    let offset = self.accepted.trailing_zeros();
    self.accepted &= self.accepted - 1;
    char::from_u32('a' as u32 + offset)
  }

  pub fn iter(&self) -> Letters {
    Letters { remaining: *self }
  }
}

/// The letters of a `LetterSet`, smallest first.
pub struct Letters {
  remaining: LetterSet,
}

impl Iterator for Letters {
  type Item = char;

  fn next(&mut self) -> Option<char> {
    self.remaining.pop_first()
  }
}

impl FromIterator<char> for LetterSet {
  fn from_iter<T>(iter: T) -> Self
  where
    T: IntoIterator<Item = char>,
  {
    let mut set = Self::empty();
    iter.into_iter().for_each(|letter| set.insert(letter));
    set
  }
}

impl fmt::Debug for LetterSet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "[{}]", self.iter().collect::<String>())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::LetterSet;

  #[gtest]
  fn test_iterates_ascending() {
    let set: LetterSet = "zebra".chars().collect();
    expect_that!(set.iter().collect::<String>(), eq("aberz"));
    expect_that!(set.iter().count(), eq(5));
    expect_that!(format!("{set:?}"), eq("[aberz]"));
  }

  #[gtest]
  fn test_pop_first_drains_in_order() {
    let mut set: LetterSet = "cab".chars().collect();
    expect_that!(set.pop_first(), some(eq('a')));
    expect_that!(set.iter().collect::<String>(), eq("bc"));
    expect_that!(set.pop_first(), some(eq('b')));
    expect_that!(set.pop_first(), some(eq('c')));
    expect_that!(set.pop_first(), none());
    expect_true!(set.is_empty());
  }

  #[gtest]
  fn test_intersection() {
    let left: LetterSet = "abc".chars().collect();
    let right: LetterSet = "bcd".chars().collect();
    expect_that!(left.intersection(right).iter().collect::<String>(), eq("bc"));
    expect_true!(left.intersection(LetterSet::single('z')).is_empty());
  }

  #[gtest]
  fn test_ignores_non_letters() {
    let mut set = LetterSet::empty();
    set.insert('A');
    set.insert(' ');
    set.insert('é');
    expect_true!(set.is_empty());
    expect_true!(LetterSet::single('_').is_empty());
    expect_that!(LetterSet::single('z').iter().last(), some(eq('z')));
  }
}
