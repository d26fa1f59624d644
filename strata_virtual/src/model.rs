// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row height models and the visible window computation.

use crate::util::ceil_to_usize;

/// Rows to render and where to place them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualWindow {
    /// First rendered row (inclusive).
    pub start: usize,
    /// One past the last rendered row (exclusive).
    pub end: usize,
    /// Vertical translation of the rendered rows: the total height of the rows
    /// before `start`.
    pub offset_y: f64,
    /// Height of all rows.
    pub total_height: f64,
}

impl VirtualWindow {
    /// A window with no rows.
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        offset_y: 0.0,
        total_height: 0.0,
    };

    /// Returns `true` if no rows are rendered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of rendered rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if `index` is rendered.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Heights of a dense sequence of rows indexed `0..len`.
///
/// Methods that consult cumulative heights take `&mut self` so implementations
/// can maintain caches lazily.
pub trait RowExtents {
    /// Number of rows.
    fn len(&self) -> usize;

    /// Returns `true` if there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of all rows.
    fn total_height(&mut self) -> f64;

    /// Height of row `index`.
    fn height_of(&mut self, index: usize) -> f64;

    /// Distance from the top of the first row to the top of row `index`.
    ///
    /// Implementations must guarantee `offset_of(0) == 0` and
    /// `offset_of(i + 1) >= offset_of(i) + height_of(i)`.
    fn offset_of(&mut self, index: usize) -> f64;

    /// Row containing `offset`, clamped into `0..len` (`0` when empty).
    fn index_at_offset(&mut self, offset: f64) -> usize;

    /// Number of rows, starting at `first`, needed to fill a viewport of
    /// `viewport_height` scrolled to `scroll_top`.
    fn rows_in_viewport(&mut self, first: usize, scroll_top: f64, viewport_height: f64) -> usize {
        let bottom = scroll_top + viewport_height;
        let len = self.len();
        let mut end = first;
        while end < len && self.offset_of(end) < bottom {
            end += 1;
        }
        end - first
    }
}

/// Computes which rows to render for a scroll position.
///
/// The first visible row is the one containing `scroll_top`. The window starts
/// `buffer` rows before it and holds the rows that fill the viewport plus
/// `buffer` rows on each side:
///
/// - `start = first - buffer`, clamped to `0`,
/// - `end = start + rows_in_viewport + 2 * buffer`, clamped to `len`,
/// - `offset_y` = total height of the rows before `start`.
///
/// ```rust
/// use strata_virtual::{UniformRowHeights, compute_visible_range};
///
/// let mut rows = UniformRowHeights::new(100, 40.0);
/// let window = compute_visible_range(&mut rows, 800.0, 400.0, 2);
/// assert_eq!((window.start, window.end), (18, 32));
/// assert_eq!(window.offset_y, 720.0);
/// ```
pub fn compute_visible_range<M>(
    model: &mut M,
    scroll_top: f64,
    viewport_height: f64,
    buffer: usize,
) -> VirtualWindow
where
    M: RowExtents + ?Sized,
{
    let len = model.len();
    if len == 0 {
        return VirtualWindow::EMPTY;
    }
    let scroll_top = scroll_top.max(0.0);
    let viewport_height = viewport_height.max(0.0);

    let first = model.index_at_offset(scroll_top).min(len - 1);
    let count = model.rows_in_viewport(first, scroll_top, viewport_height);
    let start = first.saturating_sub(buffer);
    let end = start
        .saturating_add(count)
        .saturating_add(buffer.saturating_mul(2))
        .min(len);

    VirtualWindow {
        start,
        end,
        offset_y: model.offset_of(start),
        total_height: model.total_height(),
    }
}

/// The window that renders every row, used when virtualization is off.
pub fn full_range<M>(model: &mut M) -> VirtualWindow
where
    M: RowExtents + ?Sized,
{
    VirtualWindow {
        start: 0,
        end: model.len(),
        offset_y: 0.0,
        total_height: model.total_height(),
    }
}

/// Rows covering `viewport_height` when each is `row_height` tall.
pub(crate) fn uniform_rows_in_viewport(row_height: f64, viewport_height: f64) -> usize {
    if row_height > 0.0 {
        ceil_to_usize(viewport_height / row_height)
    } else {
        usize::MAX
    }
}
