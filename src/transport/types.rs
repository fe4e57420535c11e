//! Transport state types.

use crate::library::Track;

use super::device::PlaybackError;

/// The playback state of the transport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop when the current track ends.
    #[default]
    NoRepeat,
    /// Advance when a track ends, wrapping from the last track to the first.
    RepeatAll,
    /// Restart the current track when it ends.
    RepeatOne,
}

impl RepeatMode {
    /// Next mode in the cycle `NoRepeat -> RepeatAll -> RepeatOne -> NoRepeat`.
    pub fn cycle(self) -> Self {
        match self {
            Self::NoRepeat => Self::RepeatAll,
            Self::RepeatAll => Self::RepeatOne,
            Self::RepeatOne => Self::NoRepeat,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoRepeat => "off",
            Self::RepeatAll => "all",
            Self::RepeatOne => "one",
        }
    }
}

/// Signals reported by the audio device.
///
/// These are the only way anything outside the transport's own operations can
/// change transport state. Each one is delivered together with the generation
/// of the load that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    PositionChanged(f64),
    DurationKnown(f64),
    Ended,
    /// The source could not be opened or decoded after `set_source` returned.
    Failed(PlaybackError),
}

/// A [`DeviceEvent`] with the generation of the load it belongs to, as sent
/// over the device channel.
pub type DeviceMessage = (u64, DeviceEvent);

/// Snapshot of the transport, read by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportState {
    pub current_track: Option<Track>,
    pub status: PlaybackState,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: f32,
    pub repeat_mode: RepeatMode,
}

impl TransportState {
    pub fn new(volume: f32, repeat_mode: RepeatMode) -> Self {
        Self {
            current_track: None,
            status: PlaybackState::Stopped,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: clamp_volume(volume).unwrap_or(1.0),
            repeat_mode,
        }
    }

    /// Fraction of the track played, in `[0, 1]`; zero while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Clamp to `[0, 1]`; `None` for NaN.
pub(crate) fn clamp_volume(volume: f32) -> Option<f32> {
    (!volume.is_nan()).then(|| volume.clamp(0.0, 1.0))
}
