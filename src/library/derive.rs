use super::model::{Directory, Entry, Listing, Playlist, Track};
use crate::paths;

/// Audio suffixes recognized when no `library.extensions` are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a", "aac", "opus"];

/// Case-insensitive allow-list of audio file suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioExtensions {
    // Lowercase, each with a leading dot.
    suffixes: Vec<String>,
}

impl AudioExtensions {
    /// Build the allow-list from user-facing values such as `"mp3"`, `".FLAC"`.
    /// Blank values are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if ext.is_empty() {
                continue;
            }
            let suffix = format!(".{ext}");
            if !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }
        Self { suffixes }
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

impl Default for AudioExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Split `entries` into subdirectories and audio tracks.
///
/// Paths are rebuilt from `base_path` and each entry's name. Input order is
/// kept and nothing is sorted or deduplicated.
pub fn derive(entries: &[Entry], base_path: &str, extensions: &AudioExtensions) -> Listing {
    let directories = entries
        .iter()
        .filter(|e| e.is_directory)
        .map(|e| Directory {
            name: e.name.clone(),
            path: paths::join(base_path, &e.name),
        })
        .collect();

    let tracks = entries
        .iter()
        .filter(|e| e.is_file && extensions.matches(&e.name))
        .map(|e| Track::new(e.name.clone(), paths::join(base_path, &e.name)))
        .collect();

    Listing {
        directories,
        playlist: Playlist::new(tracks),
    }
}
