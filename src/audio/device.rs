use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::paths;
use crate::transport::{AudioDevice, DeviceMessage, PlaybackError};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// [`AudioDevice`] backed by a `rodio` output stream on a dedicated thread.
///
/// Progress, end-of-track and open failures are reported on the `events`
/// channel given to [`RodioDevice::spawn`]. Commands never wait for the
/// audio thread.
pub struct RodioDevice {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioDevice {
    pub fn spawn(events: Sender<DeviceMessage>, settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let tick = Duration::from_millis(settings.tick_ms.max(1));
        let join = spawn_audio_thread(rx, events, tick, settings.default_volume);

        Self {
            tx,
            join: Some(join),
        }
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn shutdown(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(handle) = self.join.take() {
            let _ = handle.join();
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        self.tx
            .send(cmd)
            .map_err(|_| PlaybackError::DeviceUnavailable)
    }

    /// Fire-and-forget commands; a dead thread already surfaced on load.
    fn send_quietly(&self, cmd: AudioCmd) {
        if self.send(cmd).is_err() {
            warn!("audio thread is gone");
        }
    }
}

impl AudioDevice for RodioDevice {
    fn set_source(&mut self, uri: &str, generation: u64) -> Result<(), PlaybackError> {
        let path = paths::path_from_uri(uri)
            .ok_or_else(|| PlaybackError::UnsupportedSource(uri.to_string()))?;

        self.send(AudioCmd::Load {
            path: path.to_string(),
            generation,
        })
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        self.send_quietly(AudioCmd::Pause);
    }

    fn set_current_time(&mut self, secs: f64) {
        let target = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO);
        self.send_quietly(AudioCmd::SeekTo(target));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send_quietly(AudioCmd::SetVolume(volume));
    }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        self.shutdown();
    }
}
