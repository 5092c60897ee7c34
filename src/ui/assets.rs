//! Embedded static assets served under `/static/`

use std::collections::HashMap;

/// Assets compiled into the binary: name, content type, bytes
const ASSETS: &[(&str, &str, &[u8])] = &[
    ("style.css", "text/css; charset=utf-8", include_bytes!("static/style.css")),
    ("player.js", "text/javascript; charset=utf-8", include_bytes!("static/player.js")),
    ("favicon.svg", "image/svg+xml", include_bytes!("static/favicon.svg")),
];

/// A single embedded asset
#[derive(Debug, Clone, Copy)]
pub struct StaticAsset {
    pub content_type: &'static str,
    pub data: &'static [u8],
}

/// Lookup table over the embedded assets
#[derive(Debug, Clone)]
pub struct StaticAssets {
    assets: HashMap<&'static str, StaticAsset>,
}

impl StaticAssets {
    /// Build the table of embedded assets
    pub fn load() -> Self {
        let assets = ASSETS
            .iter()
            .map(|&(name, content_type, data)| (name, StaticAsset { content_type, data }))
            .collect();
        Self { assets }
    }

    /// Find an asset by its path below `/static/`
    pub fn get(&self, name: &str) -> Option<StaticAsset> {
        self.assets.get(name.trim_start_matches('/')).copied()
    }

    /// Number of embedded assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no assets are embedded
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
