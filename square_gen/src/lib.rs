#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod cancel;
mod letter_set;
mod search;
mod solver;
mod word_trie;

pub use cancel::CancelToken;
pub use letter_set::{LetterSet, Letters};
pub use search::Solutions;
pub use solver::SquareSolver;
pub use word_trie::{NodeId, TraverseWords, WordTrie};
