//! Application State - shared state of the HTTP layer

use crate::repositories::TripStore;
use std::sync::Arc;

const DEFAULT_PAGE_SIZE: i32 = 10;

/// State shared by every route
pub struct AppState {
    /// Store of trips, clients and enrollments
    pub store: Arc<dyn TripStore>,

    /// Page size used when `pageSize` is missing from the query
    pub default_page_size: i32,
}

impl AppState {
    /// Creates the state on top of the given store
    ///
    /// # Arguments
    /// * `store` - any [`TripStore`], `MySqlStore` in production
    pub fn new(store: Arc<dyn TripStore>) -> Self {
        Self {
            store,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_default_page_size(mut self, page_size: i32) -> Self {
        self.default_page_size = page_size;
        self
    }
}
