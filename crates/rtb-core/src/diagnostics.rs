//! Logging bootstrap for standalone binaries and tests.
//!
//! The filter pipeline itself only ever calls through the `log` facade
//! (never on the hot `filter()` path — see the error-handling design notes);
//! installing a backend is left to the embedder. This module exists for
//! examples, benches, and integration tests that want one line of setup.

/// Installs a terminal logger at `level`. Safe to call more than once; later
/// calls are ignored if a logger is already installed.
pub fn init(level: log::LevelFilter) {
    let _ = simplelog::SimpleLogger::init(level, simplelog::Config::default());
}
