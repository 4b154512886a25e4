//! Pagination helper shared by the listing and the stores

use std::iter::{Skip, Take};

/// A 1-based page request
///
/// Values are taken as the caller sent them: a page below 1 or a page size
/// below 1 selects nothing instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i32,
    pub page_size: i32,
}

impl PageRequest {
    pub fn new(page: i32, page_size: i32) -> Self {
        Self { page, page_size }
    }

    /// True when the request cannot select any element
    pub fn is_empty(&self) -> bool {
        self.page < 1 || self.page_size < 1
    }

    /// Number of elements to skip, `(page - 1) * page_size`
    pub fn offset(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    /// Number of elements to take
    pub fn limit(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        i64::from(self.page_size)
    }

    /// `ceil(total / page_size)`, or 0 when the page size is not positive
    pub fn total_pages(&self, total: i64) -> i32 {
        if self.page_size < 1 || total <= 0 {
            return 0;
        }
        let page_size = i64::from(self.page_size);
        let pages = (total + page_size - 1) / page_size;
        i32::try_from(pages).unwrap_or(i32::MAX)
    }
}

/// Skip/take over an already ordered iterator
pub trait Paginate: Iterator + Sized {
    fn paginate(self, page: PageRequest) -> Take<Skip<Self>> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        self.skip(offset).take(limit)
    }
}

impl<I: Iterator> Paginate for I {}
