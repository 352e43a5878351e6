use serde::Deserialize;

use crate::db::models::{DartsInput, DartsRecord, DartsUpdate};
use crate::error::DartsError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 1000;

/// `?page=&limit=` of `GET /darts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), DartsError> {
        if self.page < 1 {
            return Err(DartsError::Validation("page must be at least 1".to_string()));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(DartsError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(())
    }

    /// `(page - 1) * limit`, saturating for absurd page numbers.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Persistence seam used by the HTTP layer. Each call acquires and releases
/// its own connection or transaction.
pub trait DartsRepository: Clone + Send + Sync + 'static {
    /// Records ordered by ascending `id`.
    fn list(
        &self,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<DartsRecord>, DartsError>> + Send;

    fn create(
        &self,
        input: DartsInput,
    ) -> impl Future<Output = Result<DartsRecord, DartsError>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<DartsRecord, DartsError>> + Send;

    fn update(
        &self,
        id: i64,
        update: DartsUpdate,
    ) -> impl Future<Output = Result<DartsRecord, DartsError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), DartsError>> + Send;
}
