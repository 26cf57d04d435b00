use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

/// Cooperative cancellation flag shared between a caller and the searches it
/// started. Searches check it every time they pop their search stack.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
  cancelled: Arc<AtomicBool>,
}

impl CancelToken {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.cancelled.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::Relaxed)
  }
}
