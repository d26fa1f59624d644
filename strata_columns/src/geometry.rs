// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width resolution for leaf columns.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::column::ColKey;
use crate::header::LeafColumn;

/// Width given to unset columns of an overflowing fixed-layout table.
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Explicit per-column widths, typically from a resize drag or a measurement.
///
/// Overrides take precedence over [`LeafColumn::width`].
pub type WidthOverrides = HashMap<ColKey, f64>;

/// Policy for columns without an explicit width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TableLayout {
    /// Unset columns share the free space and shrink to their minimum width
    /// when there is none.
    Auto,
    /// Like [`TableLayout::Auto`], but unset columns of an overflowing table
    /// fall back to [`DEFAULT_COLUMN_WIDTH`] so the total width stays
    /// deterministic.
    #[default]
    Fixed,
}

/// Resolved widths and horizontal positions of the leaf columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnGeometry {
    widths: Vec<f64>,
    starts: Vec<f64>,
    total_width: f64,
    container_width: f64,
    is_overflowing: bool,
}

impl ColumnGeometry {
    /// Resolved width of every leaf column.
    #[must_use]
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Resolved width of leaf `index`.
    #[must_use]
    pub fn width(&self, index: usize) -> Option<f64> {
        self.widths.get(index).copied()
    }

    /// Left edge of leaf `index` in table content coordinates.
    #[must_use]
    pub fn start(&self, index: usize) -> Option<f64> {
        self.starts.get(index).copied()
    }

    /// Sum of all column widths.
    #[must_use]
    pub const fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Width of the table element: the container, or the columns when wider.
    #[must_use]
    pub fn table_width(&self) -> f64 {
        self.total_width.max(self.container_width)
    }

    /// Container width the geometry was resolved against.
    #[must_use]
    pub const fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Returns `true` if the columns need more room than the container has.
    #[must_use]
    pub const fn is_overflowing(&self) -> bool {
        self.is_overflowing
    }

    /// Leaf column containing table-content `x`, if any.
    #[must_use]
    pub fn column_at_x(&self, x: f64) -> Option<usize> {
        if self.widths.is_empty() || x < 0.0 || x >= self.total_width {
            return None;
        }
        let i = match self
            .starts
            .binary_search_by(|s| s.partial_cmp(&x).unwrap_or(core::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        // Skip zero-width columns sharing the same start.
        let mut i = i;
        while i + 1 < self.starts.len() && self.starts[i + 1] <= x {
            i += 1;
        }
        Some(i)
    }
}

/// Resolves the width of each leaf column.
///
/// Priority is override, then explicit width (percentages resolve against
/// `container_width`), then the layout policy. Minimum widths are applied
/// last. The table overflows when the set widths plus the claims of unset
/// columns exceed the container. Under [`TableLayout::Fixed`] an unset column
/// claims [`DEFAULT_COLUMN_WIDTH`] (or its minimum, if larger) and keeps it on
/// overflow; under [`TableLayout::Auto`] it claims only its minimum.
///
/// ```rust
/// use strata_columns::{Column, HeaderLayout, TableLayout, WidthOverrides, resolve_geometry};
///
/// let header = HeaderLayout::new(&[
///     Column::new("a").width(200.0),
///     Column::new("b").width(200.0),
///     Column::new("c").width(200.0),
/// ]);
/// let geometry = resolve_geometry(header.leaves(), &WidthOverrides::new(), 500.0, TableLayout::Fixed);
/// assert!(geometry.is_overflowing());
/// assert_eq!(geometry.total_width(), 600.0);
/// ```
#[must_use]
pub fn resolve_geometry(
    leaves: &[LeafColumn],
    overrides: &WidthOverrides,
    container_width: f64,
    layout: TableLayout,
) -> ColumnGeometry {
    let container_width = container_width.max(0.0);
    let mins: Vec<f64> = leaves
        .iter()
        .map(|l| l.min_width.map_or(0.0, |w| w.resolve(container_width)))
        .collect();
    let mut widths: Vec<Option<f64>> = leaves
        .iter()
        .zip(&mins)
        .map(|(leaf, &min)| {
            overrides
                .get(&leaf.key)
                .copied()
                .or_else(|| leaf.width.map(|w| w.resolve(container_width)))
                .map(|w| w.max(min))
        })
        .collect();

    let set_total: f64 = widths.iter().flatten().sum();
    let claimed = set_total
        + widths
            .iter()
            .zip(&mins)
            .filter(|(w, _)| w.is_none())
            .map(|(_, &min)| unset_claim(layout, min))
            .sum::<f64>();
    let is_overflowing = claimed > container_width;

    if is_overflowing {
        for (w, &min) in widths.iter_mut().zip(&mins) {
            if w.is_none() {
                *w = Some(unset_claim(layout, min));
            }
        }
    } else {
        share_free_space(&mut widths, &mins, container_width - set_total);
    }

    let widths: Vec<f64> = widths.into_iter().map(|w| w.unwrap_or(0.0)).collect();
    let mut starts = Vec::with_capacity(widths.len());
    let mut x = 0.0;
    for w in &widths {
        starts.push(x);
        x += w;
    }

    ColumnGeometry {
        widths,
        starts,
        total_width: x,
        container_width,
        is_overflowing,
    }
}

/// Width an unset column claims before free space is shared.
fn unset_claim(layout: TableLayout, min: f64) -> f64 {
    match layout {
        TableLayout::Fixed => DEFAULT_COLUMN_WIDTH.max(min),
        TableLayout::Auto => min,
    }
}

/// Splits `free` evenly over the unset columns, giving columns whose minimum
/// exceeds the share their minimum and re-splitting the rest.
fn share_free_space(widths: &mut [Option<f64>], mins: &[f64], mut free: f64) {
    let mut open: Vec<usize> = (0..widths.len()).filter(|&i| widths[i].is_none()).collect();
    while !open.is_empty() {
        #[allow(
            clippy::cast_precision_loss,
            reason = "column counts are far below f64 precision"
        )]
        let share = free.max(0.0) / open.len() as f64;
        let before = open.len();
        open.retain(|&i| {
            if mins[i] > share {
                widths[i] = Some(mins[i]);
                free -= mins[i];
                false
            } else {
                true
            }
        });
        if open.len() == before {
            for &i in &open {
                widths[i] = Some(share);
            }
            return;
        }
    }
}
