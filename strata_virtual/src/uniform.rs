// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rows that all share one height.

use crate::model::{RowExtents, uniform_rows_in_viewport};
use crate::util::floor_to_usize;

/// A [`RowExtents`] where every row has the same height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformRowHeights {
    len: usize,
    row_height: f64,
}

impl UniformRowHeights {
    /// Creates `len` rows of `row_height` each.
    #[must_use]
    pub fn new(len: usize, row_height: f64) -> Self {
        debug_assert!(
            row_height.is_finite(),
            "row heights must be finite; got {row_height:?}"
        );
        Self {
            len,
            row_height: row_height.max(0.0),
        }
    }

    /// Sets the number of rows.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Sets the height shared by all rows. Negative heights are clamped to `0`.
    pub fn set_row_height(&mut self, row_height: f64) {
        debug_assert!(
            row_height.is_finite(),
            "row heights must be finite; got {row_height:?}"
        );
        self.row_height = row_height.max(0.0);
    }

    /// Height shared by all rows.
    #[must_use]
    pub const fn row_height(&self) -> f64 {
        self.row_height
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "row counts are far below f64 precision"
)]
impl RowExtents for UniformRowHeights {
    fn len(&self) -> usize {
        self.len
    }

    fn total_height(&mut self) -> f64 {
        self.row_height * self.len as f64
    }

    fn height_of(&mut self, _index: usize) -> f64 {
        self.row_height
    }

    fn offset_of(&mut self, index: usize) -> f64 {
        index as f64 * self.row_height
    }

    fn index_at_offset(&mut self, offset: f64) -> usize {
        if self.len == 0 || self.row_height <= 0.0 {
            return 0;
        }
        floor_to_usize(offset / self.row_height).min(self.len - 1)
    }

    fn rows_in_viewport(&mut self, first: usize, _scroll_top: f64, viewport_height: f64) -> usize {
        uniform_rows_in_viewport(self.row_height, viewport_height).min(self.len.saturating_sub(first))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::UniformRowHeights;
    use crate::model::{RowExtents, compute_visible_range};
    use crate::util::ceil_to_usize;

    #[test]
    fn offsets_and_indices() {
        let mut rows = UniformRowHeights::new(5, 10.0);
        assert_eq!(rows.total_height(), 50.0);
        assert_eq!(rows.offset_of(3), 30.0);
        assert_eq!(rows.index_at_offset(0.0), 0);
        assert_eq!(rows.index_at_offset(9.9), 0);
        assert_eq!(rows.index_at_offset(10.0), 1);
        assert_eq!(rows.index_at_offset(100.0), 4);
        assert_eq!(rows.index_at_offset(-5.0), 0);
    }

    #[test]
    fn negative_heights_are_clamped_to_zero() {
        let mut rows = UniformRowHeights::new(3, -5.0);
        assert_eq!(rows.row_height(), 0.0);
        rows.set_row_height(-1.0);
        assert_eq!(rows.row_height(), 0.0);
        assert_eq!(rows.index_at_offset(10.0), 0);
    }

    #[test]
    fn window_at_top_starts_at_zero() {
        let mut rows = UniformRowHeights::new(100, 40.0);
        let window = compute_visible_range(&mut rows, 40.0, 400.0, 2);
        assert_eq!((window.start, window.end), (0, 14));
        assert_eq!(window.offset_y, 0.0);
    }

    #[test]
    fn window_near_the_end_is_clamped() {
        let mut rows = UniformRowHeights::new(100, 40.0);
        let window = compute_visible_range(&mut rows, 3800.0, 400.0, 2);
        assert_eq!((window.start, window.end), (93, 100));
        assert_eq!(window.offset_y, 3720.0);
    }

    proptest! {
        #[test]
        fn window_covers_viewport_and_offset_matches_start(
            len in 1_usize..5000,
            row_height in 1_u32..200,
            viewport in 0_u32..2000,
            buffer in 0_usize..30,
            scroll_frac in 0.0_f64..1.0,
        ) {
            let h = f64::from(row_height);
            let v = f64::from(viewport);
            let mut rows = UniformRowHeights::new(len, h);
            let total = rows.total_height();
            let scroll_top = scroll_frac * (total - v).max(0.0);
            let window = compute_visible_range(&mut rows, scroll_top, v, buffer);

            prop_assert!(window.start < len);
            prop_assert!(window.end <= len);
            let wanted = ceil_to_usize(v / h);
            if window.start + wanted <= len {
                prop_assert!(window.end - window.start >= wanted);
            }
            #[allow(clippy::cast_precision_loss, reason = "test sizes are small")]
            let expected = window.start as f64 * h;
            prop_assert_eq!(window.offset_y, expected);
        }
    }
}
