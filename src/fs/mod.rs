//! The simulated file system: a static compiled-in tree merged with dynamic
//! entries fetched from the content repository.

pub mod browser;
pub mod kind;
pub mod path;
pub mod tree;
mod view;

pub use browser::{BrowserAction, BrowserState, FileBrowser, ListingTicket};
pub use kind::{FileKind, classify};
pub use path::{PathResolver, canonicalize, join_segments};
pub use tree::{Mutation, Node, NodeId, StaticEntry, StaticTree};
pub use view::{DirEntry, EntrySource, VirtualFileSystemView};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a directory")]
    NotADirectory,
    #[error("Is a directory")]
    IsADirectory,
    #[error("File exists")]
    AlreadyExists,
    #[error("Directory not empty")]
    DirectoryNotEmpty,
    #[error("Device or resource busy")]
    RootImmutable,
    #[error("Invalid argument")]
    InvalidArgument,
}

/// Failure of a merged lookup or listing: either the path itself is wrong,
/// or the repository could not be reached.
#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

impl EntryKind {
    pub fn is_folder(self) -> bool {
        self == EntryKind::Folder
    }
}
