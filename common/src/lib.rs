#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod word_grid;

pub use word_grid::{ConstraintMap, WordGrid, BLANK};
