//! Messages exchanged with the audio thread.

use std::time::Duration;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Open `path` into a fresh paused sink, replacing the current one.
    /// Events about it are tagged with `generation`.
    Load { path: String, generation: u64 },
    /// Resume the current sink.
    Play,
    /// Pause the current sink, keeping its position.
    Pause,
    /// Move the current track to an absolute position.
    SeekTo(Duration),
    /// Volume in `[0, 1]`, kept across loads.
    SetVolume(f32),
    /// Stop playback and leave the thread.
    Quit,
}
