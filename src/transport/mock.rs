//! Recording audio device for tests.

use super::device::{AudioDevice, PlaybackError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SetSource(String),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingDevice {
    pub calls: Vec<Call>,
    /// Sources whose URI contains this text are rejected.
    pub reject_containing: Option<String>,
    pub fail_play: bool,
}

impl RecordingDevice {
    pub fn rejecting(fragment: &str) -> Self {
        Self {
            reject_containing: Some(fragment.to_string()),
            ..Self::default()
        }
    }

    pub fn sources(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetSource(uri) => Some(uri.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&Call> {
        self.calls.last()
    }
}

impl AudioDevice for RecordingDevice {
    fn set_source(&mut self, uri: &str, _generation: u64) -> Result<(), PlaybackError> {
        self.calls.push(Call::SetSource(uri.to_string()));
        match &self.reject_containing {
            Some(fragment) if uri.contains(fragment.as_str()) => Err(PlaybackError::Decode {
                path: uri.to_string(),
                reason: "unrecognized format".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(Call::Play);
        if self.fail_play {
            Err(PlaybackError::DeviceUnavailable)
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn set_current_time(&mut self, secs: f64) {
        self.calls.push(Call::SetCurrentTime(secs));
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::SetVolume(volume));
    }
}
