use core::fmt;
use std::{
  error::Error,
  fmt::{Display, Formatter},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
  /// A value was rejected at the call site: wrong word length, a letter
  /// outside a-z, or a grid whose size doesn't match.
  InvalidArgument(String),
  /// A row, column or cell index outside `[0, size)`.
  OutOfRange(String),
  Parse(String),
  Internal(String),
}

impl Display for SquareError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      SquareError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
      SquareError::OutOfRange(msg) => write!(f, "Out of range: {msg}"),
      SquareError::Parse(msg) => write!(f, "Parse error: {msg}"),
      SquareError::Internal(msg) => write!(f, "Internal error: {msg}"),
    }
  }
}

impl Error for SquareError {}

pub type SquareResult<T = ()> = Result<T, Box<dyn Error>>;

/// Returns the `SquareError` behind a boxed error, if that's what it is.
pub fn square_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a SquareError> {
  err.downcast_ref::<SquareError>()
}
