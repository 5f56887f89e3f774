//! Generated placeholder images.
//!
//! Product and section images default to `/placeholder.svg?height=H&width=W`.
//! This handler draws a neutral SVG of that size.

use axum::{
    extract::Query,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use serde::Deserialize;

/// Width used when the query omits it.
pub const DEFAULT_WIDTH: u32 = 400;

/// Height used when the query omits it.
pub const DEFAULT_HEIGHT: u32 = 256;

/// Largest accepted dimension.
pub const MAX_DIMENSION: u32 = 2000;

/// Query parameters. Unparsable values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceholderQuery {
    pub width: Option<String>,
    pub height: Option<String>,
}

impl PlaceholderQuery {
    /// Requested `(width, height)`, defaulted and clamped to `1..=MAX_DIMENSION`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (
            dimension(self.width.as_deref(), DEFAULT_WIDTH),
            dimension(self.height.as_deref(), DEFAULT_HEIGHT),
        )
    }
}

fn dimension(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(default, |v| {
            u32::try_from(v.clamp(1, u64::from(MAX_DIMENSION))).unwrap_or(MAX_DIMENSION)
        })
}

/// Render the SVG for a `width` x `height` placeholder.
#[must_use]
pub fn render_svg(width: u32, height: u32) -> String {
    let font_size = (width.min(height) / 8).clamp(8, 48);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><rect width="100%" height="100%" fill="#e5e7eb"/><text x="50%" y="50%" fill="#6b7280" font-family="sans-serif" font-size="{font_size}" text-anchor="middle" dominant-baseline="middle">{width}×{height}</text></svg>"##
    )
}

/// Serve a placeholder image.
///
/// GET /placeholder.svg?width=W&height=H
pub async fn placeholder(Query(query): Query<PlaceholderQuery>) -> impl IntoResponse {
    let (width, height) = query.dimensions();
    (
        [
            (CONTENT_TYPE, "image/svg+xml"),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        render_svg(width, height),
    )
}
