//! In-memory artwork catalog.
//!
//! The catalog is built once at startup (from the built-in fixture or a JSON
//! file) and is read-only afterwards, so it is shared across requests behind
//! an `Arc` without any locking.

mod filter;
mod fixture;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use atelier_core::{Artwork, ArtworkId, Price};
use serde::Serialize;
use thiserror::Error;

pub use filter::{ArtworkFilter, CategoryFilter, FEATURED_PRICE_THRESHOLD, SortKey};

/// Maximum number of artworks in the featured carousel.
pub const FEATURED_LIMIT: usize = 3;

/// Errors building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate artwork id: {0}")]
    DuplicateId(ArtworkId),
    #[error("artwork {0} has a negative price")]
    NegativePrice(ArtworkId),
}

/// A browse category with its artwork count and cover image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Value accepted by the `medium` filter.
    pub key: String,
    pub label: String,
    pub count: usize,
    pub image: Option<String>,
}

/// Read-only artwork catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    artworks: Arc<[Artwork]>,
}

impl Catalog {
    /// The built-in four-artwork catalog.
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            artworks: fixture::artworks().into(),
        }
    }

    /// Build a catalog, checking that identifiers are unique and prices are
    /// non-negative.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` or `CatalogError::NegativePrice`.
    pub fn from_artworks(artworks: Vec<Artwork>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(artworks.len());
        for artwork in &artworks {
            if !seen.insert(&artwork.id) {
                return Err(CatalogError::DuplicateId(artwork.id.clone()));
            }
            if artwork.price.is_negative() {
                return Err(CatalogError::NegativePrice(artwork.id.clone()));
            }
        }

        Ok(Self {
            artworks: artworks.into(),
        })
    }

    /// Load a catalog from a JSON array of artworks.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: display.clone(),
            source,
        })?;
        let artworks: Vec<Artwork> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: display,
                source,
            })?;
        Self::from_artworks(artworks)
    }

    /// All artworks in catalog order.
    #[must_use]
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    /// Look up an artwork by identifier.
    #[must_use]
    pub fn get(&self, id: &ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|artwork| &artwork.id == id)
    }

    /// Distinct mediums, in order of first appearance.
    #[must_use]
    pub fn mediums(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.artworks
            .iter()
            .filter_map(|artwork| artwork.medium.as_deref())
            .filter(|medium| !medium.is_empty() && seen.insert(*medium))
            .collect()
    }

    /// Works above the featured threshold in catalog order,
    /// topped up with the first work at or below it, capped at three.
    #[must_use]
    pub fn featured(&self) -> Vec<&Artwork> {
        let premium = self
            .artworks
            .iter()
            .filter(|artwork| is_featured(artwork.price))
            .take(FEATURED_LIMIT);
        let regular = self
            .artworks
            .iter()
            .filter(|artwork| !is_featured(artwork.price))
            .take(1);
        premium.chain(regular).take(FEATURED_LIMIT).collect()
    }

    /// Browse categories: all works, featured works, then one per medium.
    #[must_use]
    pub fn categories(&self) -> Vec<CategorySummary> {
        let fallback_image = self.artworks.first().map(|artwork| artwork.image.clone());
        let cover = |found: Option<&Artwork>| {
            found
                .map(|artwork| artwork.image.clone())
                .or_else(|| fallback_image.clone())
        };

        let featured: Vec<&Artwork> = self
            .artworks
            .iter()
            .filter(|artwork| is_featured(artwork.price))
            .collect();

        let mut categories = vec![
            CategorySummary {
                key: "all".to_string(),
                label: "All Collections".to_string(),
                count: self.artworks.len(),
                image: fallback_image.clone(),
            },
            CategorySummary {
                key: "featured".to_string(),
                label: "Featured Works".to_string(),
                count: featured.len(),
                image: cover(featured.first().copied()),
            },
        ];

        for medium in self.mediums() {
            let mut matching = self
                .artworks
                .iter()
                .filter(|artwork| artwork.medium.as_deref() == Some(medium));
            let first = matching.next();
            categories.push(CategorySummary {
                key: medium.to_string(),
                label: medium.to_string(),
                count: usize::from(first.is_some()) + matching.count(),
                image: cover(first),
            });
        }

        categories
    }
}

fn is_featured(price: Price) -> bool {
    price.amount() > FEATURED_PRICE_THRESHOLD
}
