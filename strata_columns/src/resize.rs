// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer state machine for dragging column edges.
//!
//! A drag goes through three phases:
//!
//! 1. **Hover**: [`ColumnResize::on_hover`] checks whether the pointer sits within
//!    [`RESIZE_HANDLE_WIDTH`] of a header cell's edge and arms the handle. The
//!    right edge resizes the cell's last leaf; the left edge resizes the leaf
//!    before the cell.
//! 2. **Drag**: [`ColumnResize::on_down`] starts a drag on the armed handle and
//!    [`ColumnResize::on_move`] returns the x-position of the guide line, with
//!    the width clamped to the column's [`ResizeLimits`].
//! 3. **Release**: [`ColumnResize::on_up`] yields a [`ResizeCommit`] the host
//!    stores as a width override.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use strata_columns::{
//!     Column, ColumnResize, HeaderLayout, TableLayout, WidthOverrides, resolve_geometry,
//! };
//!
//! let header = HeaderLayout::new(&[Column::new("a").width(100.0), Column::new("b").width(100.0)]);
//! let geometry = resolve_geometry(header.leaves(), &WidthOverrides::new(), 200.0, TableLayout::Fixed);
//! let cell = &header.rows()[0][0];
//! let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
//!
//! let mut resize = ColumnResize::new();
//! assert_eq!(resize.on_hover(cell, rect, Point::new(97.0, 20.0)), Some(0));
//! assert!(resize.on_down(Point::new(97.0, 20.0), &header, &geometry));
//! assert_eq!(resize.on_move(Point::new(147.0, 20.0)), Some(150.0));
//! let commit = resize.on_up(Point::new(147.0, 20.0)).unwrap();
//! assert_eq!((commit.key.as_str(), commit.width), ("a", 150.0));
//! ```

use kurbo::{Point, Rect};

use crate::column::{ColKey, ResizeLimits};
use crate::geometry::ColumnGeometry;
use crate::header::{HeaderCell, HeaderLayout};

/// Distance from a header cell edge within which the resize handle is armed.
pub const RESIZE_HANDLE_WIDTH: f64 = 8.0;

/// Final width chosen by a completed drag.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeCommit {
    /// Leaf index of the resized column.
    pub column: usize,
    /// Key of the resized column.
    pub key: ColKey,
    /// New width, within the column's limits.
    pub width: f64,
}

#[derive(Clone, Debug)]
struct Drag {
    column: usize,
    key: ColKey,
    down_x: f64,
    start_width: f64,
    column_start: f64,
    limits: ResizeLimits,
    width: f64,
}

/// Column edge drag state.
#[derive(Clone, Debug, Default)]
pub struct ColumnResize {
    armed: Option<usize>,
    drag: Option<Drag>,
}

impl ColumnResize {
    /// Creates an idle resize state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records pointer movement over a header cell while no drag is active.
    ///
    /// # Arguments
    /// * `cell` - Header cell under the pointer
    /// * `rect` - Bounds of that cell, in the same space as `pointer`
    /// * `pointer` - Pointer position
    ///
    /// # Returns
    /// The leaf index a press would resize, or `None` if the pointer is away
    /// from a resizable edge (this also disarms the handle).
    pub fn on_hover(&mut self, cell: &HeaderCell, rect: Rect, pointer: Point) -> Option<usize> {
        if self.drag.is_some() {
            return self.armed;
        }
        let inside_y = pointer.y >= rect.y0 && pointer.y <= rect.y1;
        let right = rect.x1 - pointer.x;
        let left = pointer.x - rect.x0;
        self.armed = if !inside_y || cell.colspan == 0 {
            None
        } else if (0.0..=RESIZE_HANDLE_WIDTH).contains(&right) {
            Some(cell.col_start + cell.colspan - 1)
        } else if (0.0..=RESIZE_HANDLE_WIDTH).contains(&left) {
            cell.col_start.checked_sub(1)
        } else {
            None
        };
        self.armed
    }

    /// Leaf index of the armed handle, if any.
    #[must_use]
    pub const fn armed(&self) -> Option<usize> {
        self.armed
    }

    /// Starts a drag on the armed handle.
    ///
    /// # Returns
    /// `true` if a drag started.
    pub fn on_down(&mut self, pointer: Point, header: &HeaderLayout, geometry: &ColumnGeometry) -> bool {
        let Some(column) = self.armed else {
            return false;
        };
        let (Some(leaf), Some(width), Some(start)) = (
            header.leaves().get(column),
            geometry.width(column),
            geometry.start(column),
        ) else {
            self.armed = None;
            return false;
        };
        self.drag = Some(Drag {
            column,
            key: leaf.key.clone(),
            down_x: pointer.x,
            start_width: width,
            column_start: start,
            limits: leaf.resize,
            width,
        });
        true
    }

    /// Updates an active drag.
    ///
    /// # Returns
    /// The x-position of the guide line (the column's trailing edge in table
    /// content coordinates), or `None` if no drag is active.
    pub fn on_move(&mut self, pointer: Point) -> Option<f64> {
        let drag = self.drag.as_mut()?;
        drag.width = drag.limits.clamp(drag.start_width + (pointer.x - drag.down_x));
        Some(drag.column_start + drag.width)
    }

    /// Finishes an active drag.
    pub fn on_up(&mut self, pointer: Point) -> Option<ResizeCommit> {
        self.on_move(pointer)?;
        let drag = self.drag.take()?;
        self.armed = None;
        Some(ResizeCommit {
            column: drag.column,
            key: drag.key,
            width: drag.width,
        })
    }

    /// Abandons an active drag without committing.
    ///
    /// # Returns
    /// `true` if a drag was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.armed = None;
        self.drag.take().is_some()
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::ColumnResize;
    use crate::{Column, HeaderLayout, ResizeLimits, TableLayout, WidthOverrides, resolve_geometry};

    fn fixture() -> (HeaderLayout, crate::ColumnGeometry) {
        let header = HeaderLayout::new(&[
            Column::new("a").width(100.0),
            Column::new("g").children([
                Column::new("x").width(100.0).resize(ResizeLimits {
                    min_width: 50.0,
                    max_width: 120.0,
                }),
                Column::new("y").width(100.0),
            ]),
        ]);
        let geometry = resolve_geometry(header.leaves(), &WidthOverrides::new(), 300.0, TableLayout::Fixed);
        (header, geometry)
    }

    #[test]
    fn edges_arm_the_neighbouring_leaf() {
        let (header, _) = fixture();
        let group = header.cell("g").unwrap();
        let rect = Rect::new(100.0, 0.0, 300.0, 20.0);
        let mut resize = ColumnResize::new();

        // Right edge of the group resizes its last leaf.
        assert_eq!(resize.on_hover(group, rect, Point::new(296.0, 10.0)), Some(2));
        // Left edge resizes the column before the group.
        assert_eq!(resize.on_hover(group, rect, Point::new(103.0, 10.0)), Some(0));
        // The middle disarms.
        assert_eq!(resize.on_hover(group, rect, Point::new(200.0, 10.0)), None);
        // Outside vertically disarms.
        assert_eq!(resize.on_hover(group, rect, Point::new(296.0, 30.0)), None);

        let first = header.cell("a").unwrap();
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(resize.on_hover(first, rect, Point::new(2.0, 10.0)), None);
    }

    #[test]
    fn drag_is_clamped_to_limits() {
        let (header, geometry) = fixture();
        let x = header.cell("x").unwrap();
        let rect = Rect::new(100.0, 20.0, 200.0, 40.0);
        let mut resize = ColumnResize::new();

        assert_eq!(resize.on_hover(x, rect, Point::new(199.0, 30.0)), Some(1));
        assert!(resize.on_down(Point::new(199.0, 30.0), &header, &geometry));
        assert!(resize.is_dragging());
        assert_eq!(resize.on_move(Point::new(400.0, 30.0)), Some(220.0));
        assert_eq!(resize.on_move(Point::new(0.0, 30.0)), Some(150.0));

        let commit = resize.on_up(Point::new(189.0, 30.0)).unwrap();
        assert_eq!(commit.key.as_str(), "x");
        assert_eq!(commit.width, 90.0);
        assert!(!resize.is_dragging());
        assert_eq!(resize.armed(), None);
    }

    #[test]
    fn press_without_armed_handle_is_ignored() {
        let (header, geometry) = fixture();
        let mut resize = ColumnResize::new();
        assert!(!resize.on_down(Point::new(10.0, 10.0), &header, &geometry));
        assert_eq!(resize.on_move(Point::new(20.0, 10.0)), None);
        assert!(resize.on_up(Point::new(20.0, 10.0)).is_none());
        assert!(!resize.cancel());
    }
}
