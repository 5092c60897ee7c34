//! Video page data and raw file streaming

use std::path::Path;

use axum::{
    body::Body,
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::error::LibraryError;
use super::listing::SUBTITLE_EXTENSION;
use crate::core::utils::FOG_PLACEHOLDER;

/// Data rendered by the video playback page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPageData {
    /// File base name with its extension trimmed
    pub title: String,
    /// Parent directory path, without a leading slash
    pub parent_directory: String,
    /// Normalized URL path of the video itself
    pub canonical_url: String,
    /// URL path of the companion subtitle file
    pub subtitle_url: String,
    /// Extension without the leading dot
    pub extension: String,
}

/// Extension of the last path segment, including the dot
///
/// Returns an empty string when the last segment has no dot. A dotfile such
/// as `.mp4` is all extension.
pub fn extension_of(path: &str) -> &str {
    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}

/// Build video page data from a normalized URL path
///
/// Pure: no file bytes are read, so repeated calls agree.
pub fn video_page(url_path: &str) -> VideoPageData {
    let extension = extension_of(url_path);
    let base = url_path.rsplit('/').next().unwrap_or(url_path);

    let title = base.strip_suffix(extension).unwrap_or(base);
    let title = if title.is_empty() {
        FOG_PLACEHOLDER.to_string()
    } else {
        title.to_string()
    };

    let parent_directory = match url_path.rsplit_once('/') {
        Some((parent, _)) => parent.trim_start_matches('/').to_string(),
        None => String::new(),
    };

    let stem = url_path.strip_suffix(extension).unwrap_or(url_path);

    VideoPageData {
        title,
        parent_directory,
        canonical_url: url_path.to_string(),
        subtitle_url: format!("{}{}", stem, SUBTITLE_EXTENSION),
        extension: extension.trim_start_matches('.').to_string(),
    }
}

/// Stream the file at `path` honouring range and conditional headers
///
/// The body is streamed from disk rather than buffered. A file that vanishes
/// between the metadata check and the open is answered by `ServeFile` with a
/// plain 404.
pub async fn respond_raw(path: &Path, request: Request) -> Result<Response, LibraryError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| LibraryError::Metadata {
            path: path.display().to_string(),
            source,
        })?;
    if metadata.is_dir() {
        return Err(LibraryError::NotFound {
            path: path.display().to_string(),
        });
    }

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new).into_response()),
        Err(never) => match never {},
    }
}
