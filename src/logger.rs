use std::env;

use log::LevelFilter;

/// Sends `log` output to stderr at `Debug` when `verbose` is set and `Info`
/// otherwise. `RUST_LOG`, when set, overrides both.
pub fn init_logger(verbose: bool) {
  let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

  let mut builder = env_logger::Builder::new();
  builder.filter(None, level).format_timestamp(None).format_module_path(false).format_target(false);
  if let Ok(filters) = env::var("RUST_LOG") {
    builder.parse_filters(&filters);
  }

  builder.init();
}
