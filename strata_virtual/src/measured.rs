// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rows with individually measured heights and an estimate for the rest.

use alloc::vec::Vec;

use crate::model::RowExtents;

/// A [`RowExtents`] for rows of varying height, measured after they render.
///
/// Rows start at an estimated height. As the host measures rendered rows it
/// calls [`MeasuredRowHeights::set_measured`], which corrects the cumulative
/// height index from that row onward. The correction is lazy: cumulative
/// offsets are only recomputed up to the row a query needs.
///
/// ```rust
/// use strata_virtual::{MeasuredRowHeights, RowExtents};
///
/// let mut rows = MeasuredRowHeights::new(1000, 40.0);
/// assert_eq!(rows.offset_of(10), 400.0);
///
/// // Row 2 renders taller than estimated; later rows shift down.
/// rows.set_measured(2, 100.0);
/// assert_eq!(rows.offset_of(2), 80.0);
/// assert_eq!(rows.offset_of(10), 460.0);
/// assert_eq!(rows.index_at_offset(179.0), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MeasuredRowHeights {
    heights: Vec<f64>,
    measured: Vec<bool>,
    starts: Vec<f64>,
    dirty_from: Option<usize>,
    estimate: f64,
}

impl MeasuredRowHeights {
    /// Creates `len` unmeasured rows of `estimate` height each.
    #[must_use]
    pub fn new(len: usize, estimate: f64) -> Self {
        let estimate = sanitize(estimate);
        Self {
            heights: alloc::vec![estimate; len],
            measured: alloc::vec![false; len],
            starts: alloc::vec![0.0; len],
            dirty_from: Some(0),
            estimate,
        }
    }

    /// Sets the number of rows. New rows are unmeasured.
    pub fn set_len(&mut self, len: usize) {
        let old = self.heights.len();
        self.heights.resize(len, self.estimate);
        self.measured.resize(len, false);
        self.starts.resize(len, 0.0);
        self.mark_dirty(old.min(len));
    }

    /// Records the rendered height of row `index`.
    ///
    /// # Returns
    /// `true` if the height differs from what the index assumed, meaning
    /// offsets of later rows moved.
    pub fn set_measured(&mut self, index: usize, height: f64) -> bool {
        if index >= self.heights.len() {
            return false;
        }
        let height = sanitize(height);
        self.measured[index] = true;
        if self.heights[index] == height {
            return false;
        }
        self.heights[index] = height;
        self.mark_dirty(index);
        true
    }

    /// Forgets all measurements, for example after the data changed.
    pub fn reset(&mut self) {
        self.heights.fill(self.estimate);
        self.measured.fill(false);
        self.mark_dirty(0);
    }

    /// Changes the height assumed for unmeasured rows.
    pub fn set_estimate(&mut self, estimate: f64) {
        let estimate = sanitize(estimate);
        if estimate == self.estimate {
            return;
        }
        self.estimate = estimate;
        let mut first = None;
        for (i, (h, measured)) in self.heights.iter_mut().zip(&self.measured).enumerate() {
            if !measured {
                *h = estimate;
                first.get_or_insert(i);
            }
        }
        if let Some(first) = first {
            self.mark_dirty(first);
        }
    }

    /// Height assumed for unmeasured rows.
    #[must_use]
    pub const fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Returns `true` if row `index` has been measured.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Number of measured rows.
    #[must_use]
    pub fn measured_count(&self) -> usize {
        self.measured.iter().filter(|m| **m).count()
    }

    fn mark_dirty(&mut self, from: usize) {
        self.dirty_from = Some(self.dirty_from.map_or(from, |d| d.min(from)));
    }

    fn ensure_starts_through(&mut self, through: usize) {
        let len = self.heights.len();
        if len == 0 || through >= len {
            return;
        }
        let from = match self.dirty_from {
            Some(d) if d <= through => d,
            _ => return,
        };

        let mut pos = if from == 0 {
            0.0
        } else {
            self.starts[from - 1] + self.heights[from - 1]
        };
        for i in from..=through {
            self.starts[i] = pos;
            pos += self.heights[i];
        }

        self.dirty_from = (through + 1 < len).then_some(through + 1);
    }
}

fn sanitize(height: f64) -> f64 {
    debug_assert!(height.is_finite(), "row heights must be finite; got {height:?}");
    height.max(0.0)
}

impl RowExtents for MeasuredRowHeights {
    fn len(&self) -> usize {
        self.heights.len()
    }

    fn total_height(&mut self) -> f64 {
        let len = self.heights.len();
        if len == 0 {
            return 0.0;
        }
        self.ensure_starts_through(len - 1);
        self.starts[len - 1] + self.heights[len - 1]
    }

    fn height_of(&mut self, index: usize) -> f64 {
        self.heights.get(index).copied().unwrap_or(0.0)
    }

    fn offset_of(&mut self, index: usize) -> f64 {
        let len = self.heights.len();
        if index == 0 || len == 0 {
            return 0.0;
        }
        if index >= len {
            return self.total_height();
        }
        self.ensure_starts_through(index);
        self.starts[index]
    }

    fn index_at_offset(&mut self, offset: f64) -> usize {
        let len = self.heights.len();
        if len == 0 {
            return 0;
        }
        self.ensure_starts_through(len - 1);
        let target = offset.max(0.0);
        let i = match self
            .starts
            .binary_search_by(|s| s.partial_cmp(&target).unwrap_or(core::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        // Zero-height rows share a start; prefer the last one at `target`.
        let mut i = i;
        while i + 1 < len && self.starts[i + 1] <= target {
            i += 1;
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::MeasuredRowHeights;
    use crate::model::{RowExtents, compute_visible_range};

    #[test]
    fn unmeasured_rows_use_the_estimate() {
        let mut rows = MeasuredRowHeights::new(3, 20.0);
        assert_eq!(rows.total_height(), 60.0);
        assert_eq!(rows.offset_of(2), 40.0);
        assert_eq!(rows.measured_count(), 0);
    }

    #[test]
    fn measurement_only_moves_later_rows() {
        let mut rows = MeasuredRowHeights::new(10, 10.0);
        assert_eq!(rows.offset_of(9), 90.0);

        assert!(rows.set_measured(5, 30.0));
        assert_eq!(rows.offset_of(5), 50.0);
        assert_eq!(rows.offset_of(4), 40.0);
        assert_eq!(rows.offset_of(6), 80.0);
        assert_eq!(rows.total_height(), 120.0);
        assert!(rows.is_measured(5));

        // Same height again changes nothing.
        assert!(!rows.set_measured(5, 30.0));
        assert!(!rows.set_measured(50, 30.0));
    }

    #[test]
    fn binary_search_finds_containing_row() {
        let mut rows = MeasuredRowHeights::new(4, 10.0);
        rows.set_measured(1, 50.0);
        // Starts: 0, 10, 60, 70.
        assert_eq!(rows.index_at_offset(0.0), 0);
        assert_eq!(rows.index_at_offset(10.0), 1);
        assert_eq!(rows.index_at_offset(59.0), 1);
        assert_eq!(rows.index_at_offset(60.0), 2);
        assert_eq!(rows.index_at_offset(1000.0), 3);
    }

    #[test]
    fn estimate_change_keeps_measurements() {
        let mut rows = MeasuredRowHeights::new(3, 10.0);
        rows.set_measured(0, 25.0);
        rows.set_estimate(20.0);
        assert_eq!(rows.total_height(), 65.0);
        rows.reset();
        assert_eq!(rows.total_height(), 60.0);
        assert_eq!(rows.measured_count(), 0);
    }

    #[test]
    fn growing_keeps_existing_offsets() {
        let mut rows = MeasuredRowHeights::new(2, 10.0);
        rows.set_measured(1, 40.0);
        rows.set_len(4);
        assert_eq!(rows.offset_of(2), 50.0);
        assert_eq!(rows.total_height(), 70.0);
        rows.set_len(1);
        assert_eq!(rows.total_height(), 10.0);
    }

    #[test]
    fn variable_window_uses_cumulative_heights() {
        let mut rows = MeasuredRowHeights::new(100, 20.0);
        for i in 0..10 {
            rows.set_measured(i, 50.0);
        }
        // Rows 0..10 are 50 tall; scroll_top 260 is inside row 5.
        let window = compute_visible_range(&mut rows, 260.0, 100.0, 1);
        assert_eq!(window.start, 4);
        // Rows 5, 6, 7 fill 250..400 which covers 260..360.
        assert_eq!(window.end, 4 + 3 + 2);
        assert_eq!(window.offset_y, 200.0);
    }
}
