//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the player (default volume,
//! repeat mode, library filters, UI and logging) and helpers to load them
//! from disk and the environment.

mod load;
mod schema;

pub use load::default_log_dir;
pub use schema::*;
