use std::fs;
use std::io;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::{Entry, ListError};

/// Source of directory listings.
///
/// Implementations return the immediate children of `path`; they do not
/// recurse.
pub trait DirectoryLister {
    fn list(&self, path: &str) -> Result<Vec<Entry>, ListError>;
}

/// Lists one directory level of the local file system.
#[derive(Debug, Clone)]
pub struct FsLister {
    follow_links: bool,
    include_hidden: bool,
    sort_by_name: bool,
}

impl FsLister {
    pub fn new(settings: &LibrarySettings) -> Self {
        Self {
            follow_links: settings.follow_links,
            include_hidden: settings.include_hidden,
            sort_by_name: settings.sort_by_name,
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn open_error(path: &str, err: io::Error) -> ListError {
    match err.kind() {
        io::ErrorKind::NotFound => ListError::NotFound {
            path: path.to_string(),
        },
        _ => ListError::Unreadable {
            path: path.to_string(),
            reason: err.to_string(),
        },
    }
}

/// `None` when the path is not valid UTF-8.
fn to_entry(entry: &DirEntry) -> Option<Entry> {
    let name = entry.file_name().to_str()?;
    let path = entry.path().to_str()?;
    let file_type = entry.file_type();
    Some(Entry {
        name: name.to_string(),
        path: path.to_string(),
        is_directory: file_type.is_dir(),
        is_file: file_type.is_file(),
        is_symlink: entry.path_is_symlink(),
    })
}

impl DirectoryLister for FsLister {
    fn list(&self, path: &str) -> Result<Vec<Entry>, ListError> {
        let meta = fs::metadata(path).map_err(|e| open_error(path, e))?;
        if !meta.is_dir() {
            return Err(ListError::NotADirectory {
                path: path.to_string(),
            });
        }

        let mut walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links);
        if self.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for item in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.include_hidden || !is_hidden(e))
        {
            match item {
                Ok(entry) => match to_entry(&entry) {
                    Some(e) => entries.push(e),
                    None => warn!(
                        path = %entry.path().display(),
                        "skipping entry with a non UTF-8 name"
                    ),
                },
                // Depth 0 is the directory itself: the whole listing failed.
                Err(err) if err.depth() == 0 => {
                    return Err(ListError::Unreadable {
                        path: path.to_string(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => warn!(%path, error = %err, "skipping unreadable entry"),
            }
        }

        debug!(%path, count = entries.len(), "listed directory");
        Ok(entries)
    }
}
