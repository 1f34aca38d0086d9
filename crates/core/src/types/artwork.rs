//! Artwork catalog records.

use serde::{Deserialize, Serialize};

use super::id::ArtworkId;
use super::price::Price;

/// A single artwork offered in the shop.
///
/// Artworks are seeded once at startup and never mutated afterwards. The
/// serialized form is also the prefix of a cart line item, so field names
/// here are part of the cookie format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    /// Image path, relative to the site root.
    pub image: String,
    pub title: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

impl Artwork {
    /// Year used for ordering; artworks without one sort as year 0.
    #[must_use]
    pub fn sort_year(&self) -> i32 {
        self.year.unwrap_or(0)
    }

    /// Returns true if `needle` (already lowercased) appears in the title,
    /// artist, or description, ignoring case.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.title)
            || self.artist.as_deref().is_some_and(contains)
            || self.description.as_deref().is_some_and(contains)
    }
}
