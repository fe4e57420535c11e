//! Navigation state machine.
//!
//! Listing a directory is asynchronous from the navigator's point of view:
//! [`Navigator::descend`] hands out a [`NavRequest`], the caller runs the
//! listing wherever it likes and reports back through
//! [`Navigator::complete`]. Only the latest request can change state, so a
//! slow listing for a directory the user already left is dropped.

use tracing::{debug, warn};

use crate::library::{
    AudioExtensions, Directory, DirectoryLister, Entry, ListError, Listing, Playlist, derive,
};
use crate::paths;

/// A listing the caller must perform for the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRequest {
    pub token: u64,
    pub path: String,
}

/// What [`Navigator::complete`] did with a listing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The listing replaced the current directory.
    Applied,
    /// A newer request superseded this one; nothing changed.
    Stale,
    /// The latest request failed; the previous directory is kept.
    Failed(ListError),
}

pub struct Navigator {
    home: String,
    current: String,
    listing: Listing,
    extensions: AudioExtensions,
    generation: u64,
    in_flight: Option<NavRequest>,
}

impl Navigator {
    /// Create a navigator rooted at `home`. Nothing is listed until the first
    /// request completes.
    pub fn new(home: impl Into<String>, extensions: AudioExtensions) -> Self {
        let home = home.into();
        Self {
            current: home.clone(),
            home,
            listing: Listing::default(),
            extensions,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn directories(&self) -> &[Directory] {
        &self.listing.directories
    }

    pub fn playlist(&self) -> &Playlist {
        &self.listing.playlist
    }

    /// Request the home directory. Called once at startup.
    pub fn start(&mut self) -> NavRequest {
        let home = self.home.clone();
        self.descend(home)
    }

    /// Start navigating to `target`; any earlier in-flight request becomes stale.
    pub fn descend(&mut self, target: impl Into<String>) -> NavRequest {
        self.generation += 1;
        let request = NavRequest {
            token: self.generation,
            path: target.into(),
        };
        debug!(token = request.token, path = %request.path, "navigation requested");
        self.in_flight = Some(request.clone());
        request
    }

    /// Navigate to the parent of the current directory.
    ///
    /// Returns `None` without issuing a request when the current path has no
    /// parent segment.
    pub fn ascend(&mut self) -> Option<NavRequest> {
        let parent = paths::parent_of(&self.current)?;
        Some(self.descend(parent))
    }

    /// Apply the result of the listing identified by `token`.
    pub fn complete(&mut self, token: u64, result: Result<Vec<Entry>, ListError>) -> NavOutcome {
        let request = match self.in_flight.take() {
            Some(r) if r.token == token => r,
            other => {
                self.in_flight = other;
                debug!(token, "discarding superseded listing");
                return NavOutcome::Stale;
            }
        };

        match result {
            Ok(entries) => {
                self.listing = derive(&entries, &request.path, &self.extensions);
                debug!(
                    path = %request.path,
                    directories = self.listing.directories.len(),
                    tracks = self.listing.playlist.len(),
                    "navigated"
                );
                self.current = request.path;
                NavOutcome::Applied
            }
            Err(err) => {
                warn!(path = %request.path, error = %err, "navigation failed");
                NavOutcome::Failed(err)
            }
        }
    }

    /// List `request.path` with `lister` and apply the result immediately.
    pub fn navigate<L>(&mut self, lister: &L, request: NavRequest) -> Result<(), ListError>
    where
        L: DirectoryLister + ?Sized,
    {
        let result = lister.list(&request.path);
        match self.complete(request.token, result) {
            NavOutcome::Failed(err) => Err(err),
            NavOutcome::Applied | NavOutcome::Stale => Ok(()),
        }
    }

    /// Whether the browser should offer a `..` row.
    ///
    /// This is a presentation policy (stay below home); [`Navigator::ascend`]
    /// itself only stops at a path without a parent.
    pub fn can_ascend(&self) -> bool {
        self.current != self.home && paths::parent_of(&self.current).is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending_path(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|r| r.path.as_str())
    }
}
