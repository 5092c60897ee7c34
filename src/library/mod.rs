//! Content library
//!
//! Maps browser-supplied URL paths onto the content root:
//! - `path`: decoding, lexical normalization and containment, classification
//! - `listing`: directory listings ordered for display
//! - `responder`: video page data and raw byte streaming with range support
//!
//! Every failure in this module surfaces to clients as a plain 404, whether
//! the path was missing, unreadable, or tried to climb out of the root.

mod error;
mod path;
mod listing;
mod responder;

pub use error::LibraryError;
pub use path::{contain, decode_request_path, normalize, EntryKind, Resolved};
pub use listing::{list_directory, DirEntry, Listing, MAX_DISPLAY_NAME, SUBTITLE_EXTENSION};
pub use responder::{extension_of, respond_raw, video_page, VideoPageData};

use std::path::{Path, PathBuf};

/// The served directory tree
///
/// The root is canonicalized once when the library is opened and never
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open a library rooted at `root`, which must be an existing directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let requested = root.as_ref();
        let root = std::fs::canonicalize(requested).map_err(|source| LibraryError::InvalidRoot {
            path: requested.display().to_string(),
            reason: source.to_string(),
        })?;

        if !root.is_dir() {
            return Err(LibraryError::InvalidRoot {
                path: root.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }

        Ok(Self { root })
    }

    /// Absolute path of the content root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode, normalize and classify a raw (percent-encoded) URL path
    pub fn resolve(&self, raw_path: &str) -> Result<Resolved, LibraryError> {
        let decoded = decode_request_path(raw_path)?;
        path::resolve(&self.root, &decoded)
    }

    /// List a directory previously returned by [`Library::resolve`]
    pub fn list(&self, dir: &Path) -> Result<Listing, LibraryError> {
        list_directory(&self.root, dir)
    }
}
