//! Page data handed to the views

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::core::utils::format_file_size;
use crate::library::{DirEntry, Listing, VideoPageData};

/// Characters escaped when a URL path is placed in an `href` or `src`
///
/// `/` is left alone so whole paths can be encoded at once. `\` is escaped
/// because browsers read it as a separator in http URLs.
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Listing timestamp layout, e.g. `Jan 02 15:04 2006`
const TIME_FORMAT: &str = "%b %d %H:%M %Y";

/// Percent-encode a URL path for use in a link
pub fn encode_url_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ESCAPES).to_string()
}

/// Data for the riddle page
#[derive(Debug, Clone)]
pub struct RiddlePage {
    pub riddle: String,
}

/// One listing row
#[derive(Debug, Clone)]
pub struct EntryView {
    pub name: String,
    pub url: String,
    pub size: String,
    pub time: String,
}

impl From<&DirEntry> for EntryView {
    fn from(entry: &DirEntry) -> Self {
        Self {
            name: entry.display_name.clone(),
            url: encode_url_path(&entry.url),
            size: format_file_size(entry.size_bytes),
            time: entry.modified_at.format(TIME_FORMAT).to_string(),
        }
    }
}

/// Data for a directory listing page
#[derive(Debug, Clone)]
pub struct ListPage {
    pub title: String,
    pub entries: Vec<EntryView>,
}

impl From<&Listing> for ListPage {
    fn from(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            entries: listing.entries.iter().map(EntryView::from).collect(),
        }
    }
}

/// Data for the video playback page
#[derive(Debug, Clone)]
pub struct VideoPage {
    pub title: String,
    pub directory: String,
    pub directory_url: String,
    pub url: String,
    pub vtt: String,
    pub ext: String,
}

impl From<&VideoPageData> for VideoPage {
    fn from(data: &VideoPageData) -> Self {
        Self {
            title: data.title.clone(),
            directory: data.parent_directory.clone(),
            directory_url: encode_url_path(&format!("/{}", data.parent_directory)),
            url: encode_url_path(&data.canonical_url),
            vtt: encode_url_path(&data.subtitle_url),
            ext: data.extension.clone(),
        }
    }
}
