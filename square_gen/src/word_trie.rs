use std::collections::{btree_map, BTreeMap};

use util::error::{SquareError, SquareResult};

use crate::letter_set::LetterSet;

/// Index of a node in a `WordTrie`'s arena.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct TrieNode {
  children: BTreeMap<char, NodeId>,
  letters: LetterSet,
}

/// Prefix tree over a dictionary of equal-length lowercase words.
///
/// Nodes live in a flat arena and are never removed, so a `NodeId` handed
/// out by this trie stays valid for the trie's lifetime. Since every word
/// has the same length, a node with no children is the end of a word.
#[derive(Clone, Debug)]
pub struct WordTrie {
  nodes: Vec<TrieNode>,
  word_count: usize,
}

impl WordTrie {
  const ROOT: NodeId = NodeId(0);

  pub fn new() -> Self {
    Self { nodes: vec![TrieNode::default()], word_count: 0 }
  }

  pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> SquareResult<Self> {
    words.into_iter().try_fold(Self::new(), |mut trie, word| {
      trie.insert(word.as_ref())?;
      Ok(trie)
    })
  }

  fn node(&self, id: NodeId) -> &TrieNode {
    &self.nodes[id.0]
  }

  /// Adds `word`, creating one node per letter not already on its path.
  /// Inserting a word twice is a no-op.
  pub fn insert(&mut self, word: &str) -> SquareResult {
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
      return Err(
        SquareError::InvalidArgument(format!("Cannot insert \"{word}\", expected letters a-z"))
          .into(),
      );
    }

    let mut node = Self::ROOT;
    let mut created = false;
    for c in word.chars() {
      node = match self.child(node, c) {
        Some(child) => child,
        None => {
          let child = NodeId(self.nodes.len());
          self.nodes.push(TrieNode::default());
          let parent = &mut self.nodes[node.0];
          parent.children.insert(c, child);
          parent.letters.insert(c);
          created = true;
          child
        }
      };
    }

    if created {
      self.word_count += 1;
    }
    Ok(())
  }

  pub fn root(&self) -> NodeId {
    Self::ROOT
  }

  pub fn child(&self, node: NodeId, letter: char) -> Option<NodeId> {
    self.node(node).children.get(&letter).copied()
  }

  /// Letters that extend `node`'s prefix, in ascending order.
  pub fn child_letters(&self, node: NodeId) -> LetterSet {
    self.node(node).letters
  }

  pub fn children(&self, node: NodeId) -> impl Iterator<Item = (char, NodeId)> + '_ {
    self.node(node).children.iter().map(|(&c, &child)| (c, child))
  }

  pub fn is_leaf(&self, node: NodeId) -> bool {
    self.node(node).children.is_empty()
  }

  /// The node spelling `prefix`, if any word starts with it.
  pub fn find(&self, prefix: &str) -> Option<NodeId> {
    prefix.chars().try_fold(Self::ROOT, |node, c| self.child(node, c))
  }

  pub fn contains(&self, word: &str) -> bool {
    !word.is_empty() && self.find(word).is_some_and(|node| self.is_leaf(node))
  }

  /// Number of distinct words inserted.
  pub fn len(&self) -> usize {
    self.word_count
  }

  pub fn is_empty(&self) -> bool {
    self.word_count == 0
  }

  /// Every word in the trie, depth first, in ascending order.
  pub fn traverse_words(&self) -> TraverseWords<'_> {
    TraverseWords {
      trie: self,
      word: String::new(),
      stack: vec![self.node(Self::ROOT).children.iter()],
    }
  }
}

impl Default for WordTrie {
  fn default() -> Self {
    Self::new()
  }
}

/// Lazy depth-first walk over a `WordTrie`. Each frame on the stack holds
/// the children of one node that haven't been visited yet.
pub struct TraverseWords<'a> {
  trie: &'a WordTrie,
  word: String,
  stack: Vec<btree_map::Iter<'a, char, NodeId>>,
}

impl Iterator for TraverseWords<'_> {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    loop {
      let frame = self.stack.last_mut()?;
      match frame.next() {
        Some((&c, &child)) => {
          self.word.push(c);
          let children = &self.trie.node(child).children;
          if children.is_empty() {
            let word = self.word.clone();
            self.word.pop();
            return Some(word);
          }
          self.stack.push(children.iter());
        }
        None => {
          self.stack.pop();
          self.word.pop();
        }
      }
    }
  }
}
