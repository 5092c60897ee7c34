//! HTML rendering and embedded assets
//!
//! Views are compiled into the binary with `maud`. Static files are embedded
//! and looked up through a read-only table that request handlers receive
//! through the server state.

mod pages;
mod views;
mod assets;
#[cfg(test)]
mod tests;

pub use pages::{encode_url_path, EntryView, ListPage, RiddlePage, VideoPage};
pub use views::{list_view, riddle_view, video_view};
pub use assets::{StaticAsset, StaticAssets};
