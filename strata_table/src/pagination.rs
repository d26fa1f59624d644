// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page state and the slice of rows it selects.

use core::ops::Range;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Initial pagination settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaginationConfig {
    /// Current page, starting at `1`.
    pub current: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total rows on the server, when the table only holds the current page.
    pub total: Option<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: None,
        }
    }
}

/// A page transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageChange {
    /// New page.
    pub current: usize,
    /// Page before the change.
    pub previous: usize,
    /// Rows per page after the change.
    pub page_size: usize,
}

/// Current page of a table.
///
/// When the table holds more rows than fit on one page, it pages locally and
/// renders only the slice for the current page. Otherwise the rows are taken
/// to be the page the host fetched, and all of them render.
///
/// ```rust
/// use strata_table::{Pagination, PaginationConfig};
///
/// let mut pagination = Pagination::new(PaginationConfig { page_size: 20, ..Default::default() });
/// pagination.set_row_count(45);
/// assert_eq!(pagination.page_count(), 3);
///
/// let change = pagination.set_current(3).unwrap();
/// assert_eq!(change.previous, 1);
/// assert_eq!(pagination.data_range(), 40..45);
/// ```
#[derive(Clone, Debug)]
pub struct Pagination {
    current: usize,
    page_size: usize,
    total: Option<usize>,
    row_count: usize,
}

impl Pagination {
    /// Creates the page state.
    #[must_use]
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            current: config.current.max(1),
            page_size: config.page_size.max(1),
            total: config.total,
            row_count: 0,
        }
    }

    /// Current page, starting at `1`.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of rows the pages are counted over.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total.unwrap_or(self.row_count)
    }

    /// Number of pages, at least `1`.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total().div_ceil(self.page_size).max(1)
    }

    /// Returns `true` if rows are sliced locally.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.row_count > self.page_size
    }

    /// Rows of the table data that render on the current page.
    #[must_use]
    pub fn data_range(&self) -> Range<usize> {
        if !self.is_local() {
            return 0..self.row_count;
        }
        let start = ((self.current - 1) * self.page_size).min(self.row_count);
        let end = (self.current * self.page_size).min(self.row_count);
        start..end
    }

    /// Sets the number of rows the table holds.
    ///
    /// # Returns
    /// A change if the current page no longer exists.
    pub fn set_row_count(&mut self, row_count: usize) -> Option<PageChange> {
        self.row_count = row_count;
        self.clamp_current()
    }

    /// Sets the server-side total.
    ///
    /// # Returns
    /// A change if the current page no longer exists.
    pub fn set_total(&mut self, total: Option<usize>) -> Option<PageChange> {
        self.total = total;
        self.clamp_current()
    }

    /// Moves to `page`, clamped to the existing pages.
    ///
    /// # Returns
    /// The change, or `None` if already on that page.
    pub fn set_current(&mut self, page: usize) -> Option<PageChange> {
        let page = page.clamp(1, self.page_count());
        if page == self.current {
            return None;
        }
        let previous = self.current;
        self.current = page;
        Some(PageChange {
            current: page,
            previous,
            page_size: self.page_size,
        })
    }

    /// Changes the page size, keeping the first row of the current page in view.
    ///
    /// # Returns
    /// The change, or `None` if the page size and page stay the same.
    pub fn set_page_size(&mut self, page_size: usize) -> Option<PageChange> {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return None;
        }
        let first_row = (self.current - 1) * self.page_size;
        let previous = self.current;
        self.page_size = page_size;
        self.current = (first_row / page_size + 1).min(self.page_count());
        Some(PageChange {
            current: self.current,
            previous,
            page_size,
        })
    }

    fn clamp_current(&mut self) -> Option<PageChange> {
        let last = self.page_count();
        if self.current <= last {
            return None;
        }
        log::debug!("pagination: page {} no longer exists, moving to {last}", self.current);
        let previous = self.current;
        self.current = last;
        Some(PageChange {
            current: last,
            previous,
            page_size: self.page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{PageChange, Pagination, PaginationConfig};

    fn paged(page_size: usize, rows: usize) -> Pagination {
        let mut p = Pagination::new(PaginationConfig {
            page_size,
            ..PaginationConfig::default()
        });
        p.set_row_count(rows);
        p
    }

    #[test]
    fn small_data_is_not_sliced() {
        let p = paged(10, 10);
        assert!(!p.is_local());
        assert_eq!(p.data_range(), 0..10);
    }

    #[test]
    fn local_slices_follow_the_current_page() {
        let mut p = paged(10, 25);
        assert_eq!(p.data_range(), 0..10);
        p.set_current(2);
        assert_eq!(p.data_range(), 10..20);
        p.set_current(3);
        assert_eq!(p.data_range(), 20..25);
    }

    #[test]
    fn page_change_is_emitted_once_and_clamped() {
        let mut p = paged(10, 25);
        assert_eq!(
            p.set_current(9),
            Some(PageChange {
                current: 3,
                previous: 1,
                page_size: 10
            })
        );
        assert_eq!(p.set_current(3), None);
        assert_eq!(p.set_current(0).map(|c| c.current), Some(1));
    }

    #[test]
    fn shrinking_data_moves_to_the_last_page() {
        let mut p = paged(10, 50);
        p.set_current(5);
        let change = p.set_row_count(21).unwrap();
        assert_eq!((change.previous, change.current), (5, 3));
        assert_eq!(p.set_row_count(30), None);
    }

    #[test]
    fn page_size_change_keeps_the_first_row() {
        let mut p = paged(10, 100);
        p.set_current(4);
        let change = p.set_page_size(25).unwrap();
        // Row 30 is on page 2 of 25.
        assert_eq!(change.current, 2);
        assert_eq!(p.data_range(), 25..50);
    }

    #[test]
    fn server_total_counts_pages_without_slicing() {
        let mut p = paged(10, 10);
        p.set_total(Some(95));
        assert_eq!(p.page_count(), 10);
        p.set_current(7);
        assert_eq!(p.data_range(), 0..10);
    }

    proptest! {
        #[test]
        fn pages_partition_the_rows(rows in 0_usize..500, page_size in 1_usize..60) {
            let mut p = paged(page_size, rows);
            let mut next = 0;
            for page in 1..=p.page_count() {
                p.set_current(page);
                let range = p.data_range();
                prop_assert_eq!(range.start, next);
                prop_assert!(range.len() <= page_size);
                next = range.end;
                if !p.is_local() {
                    break;
                }
            }
            prop_assert_eq!(next, rows);
        }
    }
}
