use tracing::{debug, error};

use crate::library::{Playlist, Track};
use crate::paths;

use super::device::{AudioDevice, PlaybackError};
use super::types::{DeviceEvent, PlaybackState, RepeatMode, TransportState, clamp_volume};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// Playback transport over an [`AudioDevice`].
///
/// Every operation is defined for a set of source states; called from any
/// other state it does nothing.
pub struct Transport<D> {
    device: D,
    state: TransportState,
    /// Bumped on every load; device events from older loads are dropped.
    generation: u64,
}

impl<D: AudioDevice> Transport<D> {
    pub fn new(device: D, volume: f32, repeat_mode: RepeatMode) -> Self {
        Self {
            device,
            state: TransportState::new(volume, repeat_mode),
            generation: 0,
        }
    }

    pub fn state(&self) -> &TransportState {
        &self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Generation of the most recent load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `track` is the one loaded in the transport.
    pub fn is_current(&self, track: &Track) -> bool {
        self.state
            .current_track
            .as_ref()
            .is_some_and(|t| t.path == track.path)
    }

    /// Load `track` and start playing it from the beginning.
    ///
    /// On failure the transport is stopped and forgets the track.
    pub fn load(&mut self, track: Track) -> Result<(), PlaybackError> {
        debug!(path = %track.path, "loading track");
        let uri = paths::source_uri(&track.path);
        self.generation += 1;
        self.state.current_track = Some(track);
        self.state.position_secs = 0.0;
        self.state.duration_secs = 0.0;

        if let Err(err) = self.device.set_source(&uri, self.generation) {
            return Err(self.fail(err));
        }
        self.device.set_volume(self.state.volume);
        if let Err(err) = self.device.play() {
            return Err(self.fail(err));
        }
        self.state.status = PlaybackState::Playing;
        Ok(())
    }

    /// Resume a paused track, or restart a stopped one.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        match self.state.status {
            PlaybackState::Playing => Ok(()),
            PlaybackState::Paused => {
                if let Err(err) = self.device.play() {
                    return Err(self.fail(err));
                }
                self.state.status = PlaybackState::Playing;
                Ok(())
            }
            PlaybackState::Stopped => {
                if self.state.current_track.is_none() {
                    return Ok(());
                }
                self.state.position_secs = 0.0;
                self.device.set_current_time(0.0);
                if let Err(err) = self.device.play() {
                    return Err(self.fail(err));
                }
                self.state.status = PlaybackState::Playing;
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state.status == PlaybackState::Playing {
            self.device.pause();
            self.state.status = PlaybackState::Paused;
        }
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), PlaybackError> {
        if self.state.status == PlaybackState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Stop and rewind. The track stays loaded.
    pub fn stop(&mut self) {
        if self.state.status == PlaybackState::Stopped {
            return;
        }
        self.device.pause();
        self.device.set_current_time(0.0);
        self.state.position_secs = 0.0;
        self.state.status = PlaybackState::Stopped;
    }

    /// Jump to `secs`, clamped to `[0, duration]`.
    pub fn seek(&mut self, secs: f64) {
        if self.state.status == PlaybackState::Stopped || secs.is_nan() {
            return;
        }
        let target = secs.clamp(0.0, self.state.duration_secs.max(0.0));
        self.state.position_secs = target;
        self.device.set_current_time(target);
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        self.seek(self.state.position_secs + delta_secs);
    }

    /// Set the volume, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        let Some(volume) = clamp_volume(volume) else {
            return;
        };
        self.state.volume = volume;
        self.device.set_volume(volume);
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.set_volume(self.state.volume + delta);
    }

    /// Advance the repeat mode one step and return the new mode.
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.state.repeat_mode = self.state.repeat_mode.cycle();
        debug!(mode = self.state.repeat_mode.label(), "repeat mode changed");
        self.state.repeat_mode
    }

    pub fn next_track(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        self.advance(playlist, Direction::Next)
    }

    pub fn previous_track(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        self.advance(playlist, Direction::Previous)
    }

    /// Apply a signal from the audio device.
    ///
    /// `generation` identifies the load the event belongs to; events from any
    /// load but the latest are ignored. `playlist` is the playlist active now;
    /// it is only consulted when a finished track advances under
    /// [`RepeatMode::RepeatAll`].
    pub fn handle_event(
        &mut self,
        generation: u64,
        event: DeviceEvent,
        playlist: &Playlist,
    ) -> Result<(), PlaybackError> {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale device event");
            return Ok(());
        }
        match event {
            DeviceEvent::PositionChanged(secs) => {
                if self.state.status != PlaybackState::Stopped && secs.is_finite() {
                    self.state.position_secs = secs.max(0.0);
                }
                Ok(())
            }
            DeviceEvent::DurationKnown(secs) => {
                if self.state.current_track.is_some() && secs.is_finite() {
                    self.state.duration_secs = secs.max(0.0);
                }
                Ok(())
            }
            DeviceEvent::Ended => self.on_ended(playlist),
            DeviceEvent::Failed(err) => {
                if self.state.current_track.is_none() {
                    return Ok(());
                }
                Err(self.fail(err))
            }
        }
    }

    fn on_ended(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        if self.state.status != PlaybackState::Playing {
            return Ok(());
        }
        debug!(mode = self.state.repeat_mode.label(), "track ended");

        match self.state.repeat_mode {
            RepeatMode::NoRepeat => {
                self.state.status = PlaybackState::Stopped;
                self.state.position_secs = self.state.duration_secs;
                Ok(())
            }
            RepeatMode::RepeatAll => self.next_track(playlist),
            RepeatMode::RepeatOne => {
                self.seek(0.0);
                if let Err(err) = self.device.play() {
                    return Err(self.fail(err));
                }
                Ok(())
            }
        }
    }

    fn advance(&mut self, playlist: &Playlist, direction: Direction) -> Result<(), PlaybackError> {
        if self.state.status == PlaybackState::Stopped || playlist.is_empty() {
            return Ok(());
        }
        let Some(current) = self.state.current_track.as_ref() else {
            return Ok(());
        };

        let len = playlist.len();
        let index = playlist.position_of(&current.path).unwrap_or(0);
        let next = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Previous => (index + len - 1) % len,
        };

        match playlist.get(next) {
            Some(track) => self.load(track.clone()),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: PlaybackError) -> PlaybackError {
        error!(error = %err, "playback failed");
        self.device.pause();
        self.state.status = PlaybackState::Stopped;
        self.state.current_track = None;
        self.state.position_secs = 0.0;
        self.state.duration_secs = 0.0;
        err
    }
}
