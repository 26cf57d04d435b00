use std::time::{Duration, Instant};

use log::info;

/// Runs `f`, returning how long it took alongside its result.
pub fn time_fn<T>(f: impl FnOnce() -> T) -> (Duration, T) {
  let start = Instant::now();
  let result = f();
  (start.elapsed(), result)
}

/// Runs `f` and logs its wall time under `label` at info level.
pub fn log_time<T>(label: &str, f: impl FnOnce() -> T) -> T {
  let (elapsed, result) = time_fn(f);
  info!("{label} took {:.3}s", elapsed.as_secs_f64());
  result
}
