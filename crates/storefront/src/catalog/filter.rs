//! Shop listing filter and sort pipeline.
//!
//! Every request recomputes from the full catalog, in a fixed order:
//! text search, category, price range, then sort.

use std::cmp::Ordering;

use atelier_core::Artwork;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Artworks priced strictly above this are "featured".
pub const FEATURED_PRICE_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

/// Category selector for the shop listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Pseudo-category: everything above [`FEATURED_PRICE_THRESHOLD`].
    Featured,
    /// Exact match on the artwork's medium.
    Medium(String),
}

impl CategoryFilter {
    /// Parse the `medium` query value. Empty and `all` select everything.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => Self::All,
            "featured" => Self::Featured,
            medium => Self::Medium(medium.to_string()),
        }
    }

    fn matches(&self, artwork: &Artwork) -> bool {
        match self {
            Self::All => true,
            Self::Featured => artwork.price.amount() > FEATURED_PRICE_THRESHOLD,
            Self::Medium(medium) => artwork.medium.as_deref() == Some(medium.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
    /// Newest first; artworks without a year sort as year 0.
    YearDesc,
}

impl SortKey {
    fn compare(self, a: &Artwork, b: &Artwork) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::TitleAsc => compare_titles(&a.title, &b.title),
            Self::TitleDesc => compare_titles(&b.title, &a.title),
            Self::YearDesc => b.sort_year().cmp(&a.sort_year()),
        }
    }
}

/// Case-insensitive title order, falling back to byte order for ties.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Parameters of the shop listing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkFilter {
    /// Case-insensitive substring over title, artist, and description.
    pub search: Option<String>,
    pub category: CategoryFilter,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub sort: SortKey,
}

impl ArtworkFilter {
    /// Run the pipeline over `artworks`, returning matches in display order.
    ///
    /// A blank search is ignored; otherwise the query is matched as typed,
    /// surrounding whitespace included.
    ///
    /// The input slice is never reordered; sorting is stable, so ties keep
    /// catalog order.
    #[must_use]
    pub fn apply(&self, artworks: &[Artwork]) -> Vec<Artwork> {
        let needle = self
            .search
            .as_deref()
            .filter(|query| !query.trim().is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<Artwork> = artworks
            .iter()
            .filter(|artwork| needle.as_deref().is_none_or(|q| artwork.matches_text(q)))
            .filter(|artwork| self.category.matches(artwork))
            .filter(|artwork| self.in_price_range(artwork))
            .cloned()
            .collect();

        if self.sort != SortKey::Default {
            matched.sort_by(|a, b| self.sort.compare(a, b));
        }

        matched
    }

    fn in_price_range(&self, artwork: &Artwork) -> bool {
        let price = artwork.price.amount();
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }
}
