use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_SIZE: u32 = 10;
pub const MAX_SIZE: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

/// PageParams
///
/// Pagination query parameters accepted by the list endpoints. Absent
/// parameters fall back to page 1 with 10 items.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page, capped at 100.
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

impl PageParams {
    /// Bounds check: `page >= 1`, `1 <= size <= 100`. Violations surface as a
    /// 422 validation error, matching the credential failure class.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page < 1 {
            return Err(ApiError::Validation(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if self.size < 1 || self.size > MAX_SIZE {
            return Err(ApiError::Validation(format!(
                "size must be between 1 and {MAX_SIZE}"
            )));
        }
        Ok(())
    }
}

/// Page
///
/// Envelope returned by the paginated list endpoints. `total` is the size of
/// the whole filtered set, not of the returned slice.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub total: usize,
    pub page: u32,
    pub size: u32,
    pub data: Vec<T>,
}

/// paginate
///
/// Slices an already filtered and ordered result set into the requested page.
/// The slice is `[(page-1)*size, page*size)`; a page past the end of the set
/// yields empty `data` rather than an error.
pub fn paginate<T>(params: &PageParams, items: Vec<T>) -> Page<T> {
    let total = items.len();
    let start = (params.page as usize)
        .saturating_sub(1)
        .saturating_mul(params.size as usize);
    let data = items
        .into_iter()
        .skip(start)
        .take(params.size as usize)
        .collect();

    Page {
        total,
        page: params.page,
        size: params.size,
        data,
    }
}
