//! Common utilities for physics simulations
//!
//! This crate provides the shared window and GPU setup, the 2D camera and
//! logger initialisation used by the simulation binaries.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;

/// Initialise the global logger.
///
/// Defaults to `info` and honours `RUST_LOG`. Safe to call more than once;
/// only the first call installs the logger.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
