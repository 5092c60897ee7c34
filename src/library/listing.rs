//! Directory listings

use std::path::{Component, Path};

use chrono::{DateTime, Local};

use super::error::LibraryError;
use crate::core::utils::{truncate_display, FOG_PLACEHOLDER};

/// Files with this suffix are companion subtitles and never listed
pub const SUBTITLE_EXTENSION: &str = ".vtt";

/// Maximum display name length in characters, ellipsis included
pub const MAX_DISPLAY_NAME: usize = 60;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Possibly truncated name, `/`-suffixed for directories
    pub display_name: String,
    /// Root-relative URL path carrying the full name
    pub url: String,
    /// Size in bytes as reported by the filesystem
    pub size_bytes: u64,
    /// Last modification time
    pub modified_at: DateTime<Local>,
}

/// A directory listing ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Directory path relative to the root
    pub title: String,
    /// Entries, ordered by display name descending
    pub entries: Vec<DirEntry>,
}

/// List the direct children of `dir`, which must lie under `root`
///
/// A failure to read any single entry's metadata fails the whole listing.
pub fn list_directory(root: &Path, dir: &Path) -> Result<Listing, LibraryError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| LibraryError::ReadDir {
        path: dir.display().to_string(),
        source,
    })?;

    let mut children = Vec::new();
    for child in read_dir {
        let child = child.map_err(|source| LibraryError::ReadDir {
            path: dir.display().to_string(),
            source,
        })?;
        match child.file_name().into_string() {
            Ok(name) => children.push((name, child)),
            Err(raw) => {
                tracing::debug!("skipping non UTF-8 entry {:?} in {}", raw, dir.display());
            }
        }
    }
    // Fixed enumeration order so equal display names always tie the same way
    children.sort_by(|a, b| a.0.cmp(&b.0));

    let base_url = relative_url(root, dir);
    let mut entries = Vec::with_capacity(children.len());

    for (name, child) in children {
        if name.ends_with(SUBTITLE_EXTENSION) {
            continue;
        }

        let metadata = child.metadata().map_err(|source| LibraryError::Metadata {
            path: child.path().display().to_string(),
            source,
        })?;
        let modified = metadata.modified().map_err(|source| LibraryError::Metadata {
            path: child.path().display().to_string(),
            source,
        })?;

        let mut display_name = truncate_display(&name, MAX_DISPLAY_NAME);
        if metadata.is_dir() {
            display_name.push('/');
        }

        entries.push(DirEntry {
            display_name,
            url: format!("{}/{}", base_url, name),
            size_bytes: metadata.len(),
            modified_at: DateTime::<Local>::from(modified),
        });
    }

    // Stable sort, so ties keep enumeration order
    entries.sort_by(|a, b| b.display_name.cmp(&a.display_name));

    let title = base_url.trim_start_matches('/').to_string();
    let title = if title.is_empty() {
        FOG_PLACEHOLDER.to_string()
    } else {
        title
    };

    Ok(Listing { title, entries })
}

/// URL path of `dir` relative to `root`, without a trailing slash
///
/// The root itself maps to the empty string.
fn relative_url(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(Path::new(""));
    let mut url = String::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            url.push('/');
            url.push_str(&name.to_string_lossy());
        }
    }
    url
}
