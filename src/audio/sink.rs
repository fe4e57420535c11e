//! Opening files into `rodio` sinks.
//!
//! Seeking rebuilds the sink from the file and skips into it, so opening is
//! kept separate from attaching the decoded source to a mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::transport::PlaybackError;

pub(super) type FileSource = Decoder<BufReader<File>>;

pub(super) fn open_source(path: &str) -> Result<FileSource, PlaybackError> {
    let file = File::open(path).map_err(|e| PlaybackError::Open {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Attach `source` to a new paused sink that starts at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    source: FileSource,
    start_at: Duration,
    volume: f32,
) -> Sink {
    let sink = Sink::connect_new(handle.mixer());
    sink.set_volume(volume);
    // Duration::ZERO is fine here.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    sink
}

/// Track length from the decoder, or from the container headers when the
/// decoder cannot tell.
pub(super) fn track_duration(path: &str, source: &FileSource) -> Option<Duration> {
    source.total_duration().or_else(|| {
        lofty::read_from_path(Path::new(path))
            .ok()
            .map(|tagged| tagged.properties().duration())
            .filter(|d| !d.is_zero())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn open_source_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.mp3");
        let err = open_source(path.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, PlaybackError::Open { .. }));
    }

    #[test]
    fn open_source_reports_undecodable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        fs::write(&path, b"definitely not audio").unwrap();
        let err = open_source(path.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, PlaybackError::Decode { .. }));
    }
}
