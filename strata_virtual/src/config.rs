// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual scroll configuration and the row model it selects.

use crate::measured::MeasuredRowHeights;
use crate::model::RowExtents;
use crate::uniform::UniformRowHeights;

/// Row height assumed when none is configured.
pub const DEFAULT_ROW_HEIGHT: f64 = 47.0;

/// Rows rendered beyond each edge of the viewport by default.
pub const DEFAULT_BUFFER_SIZE: usize = 20;

/// Row count at or below which virtualization stays off by default.
pub const DEFAULT_THRESHOLD: usize = 100;

/// Settings for virtual scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VirtualScrollConfig {
    /// Row height, or the estimate for unmeasured rows when heights vary.
    pub row_height: Option<f64>,
    /// Rows rendered beyond each edge of the viewport.
    pub buffer_size: usize,
    /// Virtualization is active only for more rows than this. `0` means
    /// [`DEFAULT_THRESHOLD`].
    pub threshold: usize,
    /// Treat every row as exactly `row_height` tall instead of measuring.
    pub is_fixed_row_height: bool,
}

impl Default for VirtualScrollConfig {
    fn default() -> Self {
        Self {
            row_height: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            threshold: DEFAULT_THRESHOLD,
            is_fixed_row_height: false,
        }
    }
}

impl VirtualScrollConfig {
    /// Returns `true` if `row_count` rows should be virtualized.
    #[must_use]
    pub const fn is_active(&self, row_count: usize) -> bool {
        row_count > self.threshold()
    }

    /// Row count at or below which every row renders.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        if self.threshold == 0 {
            DEFAULT_THRESHOLD
        } else {
            self.threshold
        }
    }

    /// Configured row height, or [`DEFAULT_ROW_HEIGHT`].
    #[must_use]
    pub fn row_height(&self) -> f64 {
        self.row_height.unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Builds the row model for `row_count` rows.
    #[must_use]
    pub fn row_model(&self, row_count: usize) -> RowModel {
        if self.is_fixed_row_height {
            RowModel::Uniform(UniformRowHeights::new(row_count, self.row_height()))
        } else {
            RowModel::Measured(MeasuredRowHeights::new(row_count, self.row_height()))
        }
    }
}

/// Either row model, chosen at runtime from a [`VirtualScrollConfig`].
#[derive(Clone, Debug)]
pub enum RowModel {
    /// Every row has the same height.
    Uniform(UniformRowHeights),
    /// Rows are measured after rendering.
    Measured(MeasuredRowHeights),
}

impl RowModel {
    /// Sets the number of rows.
    pub fn set_len(&mut self, len: usize) {
        match self {
            Self::Uniform(m) => m.set_len(len),
            Self::Measured(m) => m.set_len(len),
        }
    }

    /// Records the rendered height of row `index`.
    ///
    /// Uniform models ignore measurements.
    ///
    /// # Returns
    /// `true` if offsets of later rows moved.
    pub fn set_measured(&mut self, index: usize, height: f64) -> bool {
        match self {
            Self::Uniform(_) => false,
            Self::Measured(m) => m.set_measured(index, height),
        }
    }

    /// Forgets measurements.
    pub fn reset(&mut self) {
        if let Self::Measured(m) = self {
            m.reset();
        }
    }
}

impl RowExtents for RowModel {
    fn len(&self) -> usize {
        match self {
            Self::Uniform(m) => m.len(),
            Self::Measured(m) => m.len(),
        }
    }

    fn total_height(&mut self) -> f64 {
        match self {
            Self::Uniform(m) => m.total_height(),
            Self::Measured(m) => m.total_height(),
        }
    }

    fn height_of(&mut self, index: usize) -> f64 {
        match self {
            Self::Uniform(m) => m.height_of(index),
            Self::Measured(m) => m.height_of(index),
        }
    }

    fn offset_of(&mut self, index: usize) -> f64 {
        match self {
            Self::Uniform(m) => m.offset_of(index),
            Self::Measured(m) => m.offset_of(index),
        }
    }

    fn index_at_offset(&mut self, offset: f64) -> usize {
        match self {
            Self::Uniform(m) => m.index_at_offset(offset),
            Self::Measured(m) => m.index_at_offset(offset),
        }
    }

    fn rows_in_viewport(&mut self, first: usize, scroll_top: f64, viewport_height: f64) -> usize {
        match self {
            Self::Uniform(m) => m.rows_in_viewport(first, scroll_top, viewport_height),
            Self::Measured(m) => m.rows_in_viewport(first, scroll_top, viewport_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RowModel, VirtualScrollConfig};
    use crate::model::RowExtents;

    #[test]
    fn threshold_is_exclusive() {
        let config = VirtualScrollConfig::default();
        assert!(!config.is_active(100));
        assert!(config.is_active(101));
    }

    #[test]
    fn zero_threshold_falls_back_to_default() {
        let config = VirtualScrollConfig {
            threshold: 0,
            ..VirtualScrollConfig::default()
        };
        assert_eq!(config.threshold(), 100);
        assert!(!config.is_active(50));
        assert!(config.is_active(101));
    }

    #[test]
    fn fixed_row_height_selects_uniform_model() {
        let config = VirtualScrollConfig {
            row_height: Some(30.0),
            is_fixed_row_height: true,
            ..VirtualScrollConfig::default()
        };
        let mut model = config.row_model(10);
        assert!(matches!(model, RowModel::Uniform(_)));
        assert!(!model.set_measured(0, 90.0));
        assert_eq!(model.total_height(), 300.0);

        let mut model = VirtualScrollConfig::default().row_model(2);
        assert!(model.set_measured(0, 90.0));
        assert_eq!(model.total_height(), 137.0);
    }
}
