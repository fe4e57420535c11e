//! Playback transport: the play/pause/stop state machine, seek and volume,
//! track advance over the active playlist, and the repeat policy applied when
//! a track ends.
//!
//! The transport drives an [`AudioDevice`] and learns about playback progress
//! only through [`DeviceEvent`]s passed to [`Transport::handle_event`].

mod device;
mod engine;
mod types;

pub use device::*;
pub use engine::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod mock;
