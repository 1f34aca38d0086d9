//! Catalog route handlers: shop listing, artwork detail, featured works, and
//! browse categories.

use atelier_core::{Artwork, ArtworkId};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{ArtworkFilter, CategoryFilter, CategorySummary, SortKey};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Artworks shown per listing page.
pub const ITEMS_PER_PAGE: usize = 9;

/// Shop listing query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub medium: CategoryFilter,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: SortKey,
    pub page: Option<u32>,
}

impl ListingQuery {
    fn filter(&self) -> ArtworkFilter {
        ArtworkFilter {
            search: self.q.clone(),
            category: self.medium.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort,
        }
    }

    /// Requested page, 1-based. Page 0 is treated as page 1.
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One page of the shop listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub artworks: Vec<Artwork>,
    /// Number of artworks matching the filters, across all pages.
    pub total: usize,
    pub page: u32,
    pub total_pages: u32,
}

impl Listing {
    fn paginate(matched: Vec<Artwork>, page: u32) -> Self {
        let total = matched.len();
        let total_pages = u32::try_from(total.div_ceil(ITEMS_PER_PAGE)).unwrap_or(u32::MAX);
        let skip = usize::try_from(page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(ITEMS_PER_PAGE);
        let artworks = matched.into_iter().skip(skip).take(ITEMS_PER_PAGE).collect();

        Self {
            artworks,
            total,
            page,
            total_pages,
        }
    }
}

/// Filtered, sorted, paginated shop listing.
#[instrument(skip(state, query))]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<Listing>> {
    let Query(query) = query?;
    let matched = query.filter().apply(state.catalog().artworks());
    tracing::debug!(matched = matched.len(), "Filtered shop listing");
    Ok(Json(Listing::paginate(matched, query.page())))
}

/// Single artwork detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Artwork>> {
    state
        .catalog()
        .get(&ArtworkId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))
}

/// Works for the home page carousel.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<Vec<Artwork>> {
    Json(state.catalog().featured().into_iter().cloned().collect())
}

/// Browse categories with counts.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    Json(state.catalog().categories())
}
