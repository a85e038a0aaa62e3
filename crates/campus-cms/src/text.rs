//! Presentation helpers: image resolution, plain-text extraction, dates.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::types::{Page, Post, Program};

/// Image shown when an item has no media of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=400";

/// Anything that may carry a featured image.
pub trait FeaturedImage {
    /// URL of CMS-embedded featured media.
    fn embedded_media_url(&self) -> Option<&str>;

    /// URL of an image stored in the item's custom fields.
    fn attribute_image_url(&self) -> Option<&str> {
        None
    }
}

impl FeaturedImage for Program {
    fn embedded_media_url(&self) -> Option<&str> {
        self.embedded.as_ref().and_then(|e| e.featured_url())
    }

    fn attribute_image_url(&self) -> Option<&str> {
        self.acf
            .program_image
            .as_ref()
            .map(|img| img.url.as_str())
            .filter(|url| !url.trim().is_empty())
    }
}

impl FeaturedImage for Post {
    fn embedded_media_url(&self) -> Option<&str> {
        self.embedded.as_ref().and_then(|e| e.featured_url())
    }
}

impl FeaturedImage for Page {
    fn embedded_media_url(&self) -> Option<&str> {
        self.embedded.as_ref().and_then(|e| e.featured_url())
    }
}

/// Resolve the image to show for an item.
///
/// Embedded featured media wins, then the custom-field image, then
/// [`PLACEHOLDER_IMAGE`]. Never returns an empty string.
pub fn featured_image_url<T: FeaturedImage + ?Sized>(item: &T) -> &str {
    featured_image_url_or(item, PLACEHOLDER_IMAGE)
}

/// Like [`featured_image_url`] with a caller-chosen fallback. A blank
/// fallback is replaced by [`PLACEHOLDER_IMAGE`].
pub fn featured_image_url_or<'a, T: FeaturedImage + ?Sized>(
    item: &'a T,
    fallback: &'a str,
) -> &'a str {
    item.embedded_media_url()
        .or_else(|| item.attribute_image_url())
        .unwrap_or(if fallback.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            fallback
        })
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"))
}

/// Remove markup tags and trim surrounding whitespace.
///
/// Entities such as `&amp;` are left as-is.
pub fn strip_html(html: &str) -> String {
    tag_regex().replace_all(html, "").trim().to_string()
}

/// Format a CMS timestamp as `March 15, 2024`.
///
/// Accepts the CMS's local `2024-03-15T00:00:00` form, RFC 3339 and bare
/// dates. Anything else is returned unchanged.
pub fn format_date(date: &str) -> String {
    let trimmed = date.trim();
    let parsed = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match parsed {
        Ok(day) => day.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
