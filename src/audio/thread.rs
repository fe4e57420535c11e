use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::transport::{DeviceEvent, DeviceMessage, PlaybackError};

use super::sink::{create_sink_at, open_source, track_duration};
use super::types::AudioCmd;

/// The track currently attached to the output stream.
struct Playback {
    path: String,
    generation: u64,
    sink: Sink,
    paused: bool,
    /// Set once `Ended` has been reported, so it is sent only once per run.
    ended: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Playback {
    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn resume(&mut self) {
        if self.paused {
            self.sink.play();
            self.started_at = Some(Instant::now());
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        if !self.paused {
            self.sink.pause();
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
            self.paused = true;
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<DeviceMessage>,
    tick: Duration,
    volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "no audio output device");
                return;
            }
        };
        // rodio prints to stderr when the stream is dropped, which corrupts the TUI.
        stream.log_on_drop(false);
        info!("audio output opened");

        let mut volume = volume;
        let mut current: Option<Playback> = None;

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Load { path, generation }) => {
                    if let Some(old) = current.take() {
                        old.sink.stop();
                    }
                    match load(&stream, &path, generation, volume, &events) {
                        Ok(p) => current = Some(p),
                        Err(e) => {
                            warn!(error = %e, "load failed");
                            let _ = events.send((generation, DeviceEvent::Failed(e)));
                        }
                    }
                }
                Ok(AudioCmd::Play) => {
                    if let Some(p) = current.as_mut() {
                        p.ended = false;
                        p.resume();
                    }
                }
                Ok(AudioCmd::Pause) => {
                    if let Some(p) = current.as_mut() {
                        p.pause();
                    }
                }
                Ok(AudioCmd::SeekTo(target)) => {
                    if let Some(p) = current.as_mut() {
                        seek(&stream, p, target, volume);
                    }
                }
                Ok(AudioCmd::SetVolume(v)) => {
                    volume = v;
                    if let Some(p) = current.as_ref() {
                        p.sink.set_volume(v);
                    }
                }
                Ok(AudioCmd::Quit) => {
                    if let Some(p) = current.take() {
                        p.sink.stop();
                    }
                    debug!("audio thread quitting");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let Some(p) = current.as_mut() else {
                        continue;
                    };
                    if p.paused || p.ended {
                        continue;
                    }
                    if p.sink.empty() {
                        p.ended = true;
                        p.pause();
                        let _ = events.send((p.generation, DeviceEvent::Ended));
                    } else {
                        let position = p.elapsed().as_secs_f64();
                        let _ = events
                            .send((p.generation, DeviceEvent::PositionChanged(position)));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn load(
    stream: &OutputStream,
    path: &str,
    generation: u64,
    volume: f32,
    events: &Sender<DeviceMessage>,
) -> Result<Playback, PlaybackError> {
    let source = open_source(path)?;
    if let Some(total) = track_duration(path, &source) {
        let _ = events.send((generation, DeviceEvent::DurationKnown(total.as_secs_f64())));
    }

    debug!(path, "sink ready");
    Ok(Playback {
        path: path.to_string(),
        generation,
        sink: create_sink_at(stream, source, Duration::ZERO, volume),
        paused: true,
        ended: false,
        started_at: None,
        accumulated: Duration::ZERO,
    })
}

/// Rebuild the sink and skip into the file. Works for the formats rodio decodes.
fn seek(stream: &OutputStream, p: &mut Playback, target: Duration, volume: f32) {
    let source = match open_source(&p.path) {
        Ok(source) => source,
        Err(e) => {
            warn!(error = %e, "seek failed, keeping current position");
            return;
        }
    };

    p.sink.stop();
    p.sink = create_sink_at(stream, source, target, volume);
    p.accumulated = target;
    p.ended = false;
    if p.paused {
        p.started_at = None;
    } else {
        p.sink.play();
        p.started_at = Some(Instant::now());
    }
}
