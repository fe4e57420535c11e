use thiserror::Error;

/// The native playback device driven by the transport.
///
/// Progress is reported asynchronously as
/// [`DeviceEvent`](super::DeviceEvent)s; the methods here only issue commands.
pub trait AudioDevice {
    /// Replace the current source.
    ///
    /// Every event about this source must carry `generation`. Errors found
    /// before returning are returned; later ones arrive as
    /// [`DeviceEvent::Failed`](super::DeviceEvent::Failed).
    fn set_source(&mut self, uri: &str, generation: u64) -> Result<(), PlaybackError>;
    /// Start or resume playback of the current source.
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, secs: f64);
    fn set_volume(&mut self, volume: f32);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("unsupported source {0}")]
    UnsupportedSource(String),
    #[error("cannot open {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("cannot decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("audio output is not available")]
    DeviceUnavailable,
}
