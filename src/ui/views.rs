//! HTML views
//!
//! Pages are built with `maud`; every interpolated value is escaped.

use maud::{html, Markup, DOCTYPE};

use super::pages::{ListPage, RiddlePage, VideoPage};
use crate::web::DIRECT_QUERY_KEY;

/// Document shell shared by every page
fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="icon" href="/static/favicon.svg";
                link rel="stylesheet" href="/static/style.css";
            }
            body { (body) }
        }
    }
}

/// The riddle and its answer form
pub fn riddle_view(page: &RiddlePage) -> Markup {
    layout(
        "fog",
        html! {
            main class="riddle" {
                pre class="riddle-body" { (page.riddle) }
                form method="post" action="/answer" {
                    input type="text" name="answer" autocomplete="off" autofocus;
                    button type="submit" { "answer" }
                }
            }
        },
    )
}

/// A directory listing
pub fn list_view(page: &ListPage) -> Markup {
    layout(
        &page.title,
        html! {
            header {
                a href="/" { "fog" }
                " "
                h1 { (page.title) }
            }
            main {
                table class="listing" {
                    tbody {
                        @for entry in &page.entries {
                            tr {
                                td class="name" { a href=(entry.url) { (entry.name) } }
                                td class="size" { (entry.size) }
                                td class="time" { (entry.time) }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// The player page for one video
pub fn video_view(page: &VideoPage) -> Markup {
    let video_src = format!("{}?{}", page.url, DIRECT_QUERY_KEY);
    let subtitle_src = format!("{}?{}", page.vtt, DIRECT_QUERY_KEY);
    let video_type = format!("video/{}", page.ext);

    layout(
        &page.title,
        html! {
            header {
                a href=(page.directory_url) { "/" (page.directory) }
                " "
                h1 { (page.title) }
            }
            main {
                video id="player" controls autoplay preload="metadata" {
                    source src=(video_src) type=(video_type);
                    track kind="subtitles" src=(subtitle_src) srclang="en" label="subtitles" default;
                }
                p { a href=(video_src) download { "download" } }
            }
            script src="/static/player.js" {}
        },
    )
}
