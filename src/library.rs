//! Directory listing and playlist derivation.
//!
//! A [`DirectoryLister`] turns a path into raw [`Entry`] values; [`derive`]
//! splits those into navigable directories and the playable tracks that form
//! the implicit playlist of the directory.

mod derive;
mod lister;
mod model;

pub use derive::{AudioExtensions, DEFAULT_EXTENSIONS, derive};
pub use lister::{DirectoryLister, FsLister};
pub use model::*;
