//! Logging setup
//!
//! The library only emits `tracing` events. Applications that do not install
//! a subscriber of their own can call [`try_init`].

use crate::error::{Error, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, at INFO otherwise
pub fn try_init() -> Result<()> {
    try_init_with_level(Level::INFO)
}

/// Install a fmt subscriber filtered by `RUST_LOG`, at `level` otherwise
///
/// Fails if a global subscriber is already set.
pub fn try_init_with_level(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| Error::Other(format!("failed to install tracing subscriber: {e}")))
}
