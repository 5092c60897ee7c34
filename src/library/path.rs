//! Request path decoding, normalization and containment

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

use super::error::LibraryError;

/// Kind of filesystem entry a request path resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A request path that exists under the content root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Directory or file
    pub kind: EntryKind,
    /// Absolute filesystem path, always inside the root
    pub absolute_path: PathBuf,
    /// Decoded, normalized URL path (rooted, `/` for the root itself)
    pub url_path: String,
}

/// Percent-decode a raw URL path
///
/// Paths that do not decode to UTF-8 are rejected.
pub fn decode_request_path(raw: &str) -> Result<String, LibraryError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| LibraryError::InvalidPath {
            raw: raw.to_string(),
        })
}

/// Lexically normalize a URL path into a rooted form
///
/// Empty and `.` segments are dropped, `..` removes the previous segment and
/// is discarded at the root. The result always starts with `/` and never
/// ends with one unless it is the root.
pub fn normalize(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Join a request path onto `root` without ever leaving it
///
/// The path is normalized first; any segment the platform would not treat
/// as a plain file name (drive prefixes, embedded separators) is skipped.
pub fn contain(root: &Path, raw: &str) -> PathBuf {
    let mut joined = root.to_path_buf();
    for segment in normalize(raw).split('/').filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        if let (Some(Component::Normal(name)), None) = (components.next(), components.next()) {
            joined.push(name);
        }
    }
    joined
}

/// Resolve a decoded request path to a directory or file under `root`
///
/// Any stat failure is reported as [`LibraryError::NotFound`].
pub fn resolve(root: &Path, decoded: &str) -> Result<Resolved, LibraryError> {
    let url_path = normalize(decoded);
    let absolute_path = contain(root, &url_path);

    let metadata = std::fs::metadata(&absolute_path).map_err(|e| {
        tracing::debug!("stat failed for {}: {}", absolute_path.display(), e);
        LibraryError::NotFound {
            path: absolute_path.display().to_string(),
        }
    })?;

    let kind = if metadata.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };

    Ok(Resolved {
        kind,
        absolute_path,
        url_path,
    })
}
