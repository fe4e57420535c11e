use thiserror::Error;

use crate::paths;

/// A raw item returned by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    pub is_file: bool,
    pub is_symlink: bool,
}

/// A subdirectory the user can descend into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub name: String,
    pub path: String,
}

/// A file recognized as playable audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub path: String,
}

impl Track {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// File name without extension, as shown in lists and the now-playing line.
    pub fn title(&self) -> &str {
        paths::title_of(&self.name)
    }
}

/// Ordered tracks of one directory listing.
///
/// A playlist is never edited after it is built; navigation swaps in a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the track whose path equals `path`.
    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }
}

/// Everything derived from one successful listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub directories: Vec<Directory>,
    pub playlist: Playlist,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("{path} does not exist")]
    NotFound { path: String },
    #[error("{path} is not a directory")]
    NotADirectory { path: String },
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
