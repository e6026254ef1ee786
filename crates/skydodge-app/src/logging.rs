//! Logger setup for the runner.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output and
/// the default is info and above.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // Fails only if a logger is already installed.
    let _ = builder.try_init();
}
