#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod word_dict;

pub use word_dict::WordDict;
