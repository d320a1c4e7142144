use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum page size accepted by paginated endpoints.
pub const MAX_ENTRIES: u64 = 100;

/// Highest page index passed on to the database; later pages are simply empty.
pub const MAX_PAGE: u64 = 1_000_000_000;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

/// A label with the number of records carrying it, used by statistics endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabelCountDto {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub database: String,
}

/// Page selection shared by every paginated listing.
///
/// `page` is zero-based. `entries` defaults to 10 and is clamped to
/// [`MAX_ENTRIES`] by [`PaginationParams::per_page`].
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl PaginationParams {
    pub fn per_page(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            entries: default_entries(),
        }
    }
}

pub fn default_entries() -> u64 {
    10
}

/// Computes the number of pages needed to show `total` items.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        (total as f64 / per_page as f64).ceil() as u64
    } else {
        0
    }
}
