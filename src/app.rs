//! Application module: the model the TUI renders and the runtime mutates.
//!
//! `App` lives in `app::model` and ties the navigator and the transport
//! together with cursor, view and notification state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
