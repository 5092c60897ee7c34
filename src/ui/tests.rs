//! Tests for views, page data and embedded assets

use super::*;
use chrono::{Local, TimeZone};

use crate::library::{video_page, DirEntry, Listing};

fn entry(display_name: &str, url: &str) -> DirEntry {
    DirEntry {
        display_name: display_name.to_string(),
        url: url.to_string(),
        size_bytes: 2048,
        modified_at: Local.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
    }
}

#[test]
fn test_riddle_view() {
    let html = riddle_view(&RiddlePage {
        riddle: "What walks <on> four legs?\nand two?".to_string(),
    })
    .into_string();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("What walks &lt;on&gt; four legs?\nand two?"));
    assert!(html.contains("action=\"/answer\""));
    assert!(html.contains("name=\"answer\""));
}

#[test]
fn test_list_view() {
    let listing = Listing {
        title: "shows".to_string(),
        entries: vec![entry("season #1/", "/shows/season #1")],
    };
    let page = ListPage::from(&listing);
    assert_eq!(page.entries[0].url, "/shows/season%20%231");
    assert_eq!(page.entries[0].size, "2.00 KB");
    assert_eq!(page.entries[0].time, "Jan 02 15:04 2006");

    let html = list_view(&page).into_string();
    assert!(html.contains("<title>shows</title>"));
    assert!(html.contains("<a href=\"/shows/season%20%231\">season #1/</a>"));
}

#[test]
fn test_list_view_escapes_names() {
    let listing = Listing {
        title: "<b>".to_string(),
        entries: vec![entry("\"quoted\" & <tagged>.mp4", "/\"quoted\" & <tagged>.mp4")],
    };
    let html = list_view(&ListPage::from(&listing)).into_string();

    assert!(html.contains("<h1>&lt;b&gt;</h1>"));
    assert!(html.contains("&quot;quoted&quot; &amp; &lt;tagged&gt;.mp4</a>"));
    assert!(html.contains("href=\"/%22quoted%22%20&amp;%20%3Ctagged%3E.mp4\""));
}

#[test]
fn test_backslash_names_stay_one_segment() {
    let listing = Listing {
        title: "movies".to_string(),
        entries: vec![entry("a\\b.mp4", "/movies/a\\b.mp4")],
    };
    let html = list_view(&ListPage::from(&listing)).into_string();
    assert!(html.contains("href=\"/movies/a%5Cb.mp4\""));

    let page = VideoPage::from(&video_page("/movies/a\\b.mp4"));
    assert_eq!(page.url, "/movies/a%5Cb.mp4");
    assert_eq!(page.vtt, "/movies/a%5Cb.vtt");
}

#[test]
fn test_empty_listing() {
    let listing = Listing {
        title: "empty".to_string(),
        entries: Vec::new(),
    };
    let html = list_view(&ListPage::from(&listing)).into_string();
    assert!(html.contains("<tbody></tbody>"));
}

#[test]
fn test_video_view() {
    let page = VideoPage::from(&video_page("/my shows/pilot.mp4"));
    assert_eq!(page.url, "/my%20shows/pilot.mp4");
    assert_eq!(page.vtt, "/my%20shows/pilot.vtt");
    assert_eq!(page.directory, "my shows");
    assert_eq!(page.directory_url, "/my%20shows");

    let html = video_view(&page).into_string();
    assert!(html.contains("<title>pilot</title>"));
    assert!(html.contains("src=\"/my%20shows/pilot.mp4?direct\" type=\"video/mp4\""));
    assert!(html.contains("src=\"/my%20shows/pilot.vtt?direct\""));
    assert!(html.contains("<a href=\"/my%20shows\">/my shows</a>"));
}

#[test]
fn test_encode_url_path() {
    assert_eq!(encode_url_path("/a b/c?d#e"), "/a%20b/c%3Fd%23e");
    assert_eq!(encode_url_path("/100%/x"), "/100%25/x");
    assert_eq!(encode_url_path("/a\\b"), "/a%5Cb");
    assert_eq!(encode_url_path("/霧.mp4"), "/%E9%9C%A7.mp4");
}

#[test]
fn test_static_assets() {
    let assets = StaticAssets::load();
    assert_eq!(assets.len(), 3);

    let css = assets.get("style.css").unwrap();
    assert_eq!(css.content_type, "text/css; charset=utf-8");
    assert!(!css.data.is_empty());

    assert!(assets.get("/player.js").is_some());
    assert!(assets.get("missing.css").is_none());
}
