// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A frame-batched controller owning a row model and the vertical scroll state.

use crate::config::{RowModel, VirtualScrollConfig};
use crate::measured::MeasuredRowHeights;
use crate::model::{RowExtents, VirtualWindow, compute_visible_range, full_range};
use crate::uniform::UniformRowHeights;

/// A [`RowExtents`] whose row count can change.
pub trait ResizableRowExtents: RowExtents {
    /// Sets the number of rows.
    fn set_len(&mut self, len: usize);
}

impl ResizableRowExtents for UniformRowHeights {
    fn set_len(&mut self, len: usize) {
        Self::set_len(self, len);
    }
}

impl ResizableRowExtents for MeasuredRowHeights {
    fn set_len(&mut self, len: usize) {
        Self::set_len(self, len);
    }
}

impl ResizableRowExtents for RowModel {
    fn set_len(&mut self, len: usize) {
        Self::set_len(self, len);
    }
}

/// Alignment when scrolling a row into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Row top at the viewport top.
    Start,
    /// Row centered in the viewport.
    Center,
    /// Row bottom at the viewport bottom.
    End,
    /// The smallest move that makes the row fully visible.
    Nearest,
}

/// Virtual row controller.
///
/// Scroll, resize, and measurement events only record what changed. The window
/// is recomputed once per [`VirtualRows::on_frame`] call, so several events in
/// one tick cost one recomputation, and a newer scroll position replaces a
/// stale one that has not been applied yet.
///
/// When the row count is at or below the threshold every row is rendered.
///
/// ```rust
/// use strata_virtual::{UniformRowHeights, VirtualRows};
///
/// let mut rows = VirtualRows::new(UniformRowHeights::new(100, 40.0), 400.0, 2);
/// assert!(rows.on_frame().is_some());
///
/// rows.on_scroll(400.0);
/// rows.on_scroll(800.0);
/// let window = rows.on_frame().unwrap();
/// assert_eq!((window.start, window.end), (18, 32));
///
/// // Nothing changed since the last frame.
/// assert!(rows.on_frame().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct VirtualRows<M: RowExtents = RowModel> {
    model: M,
    scroll_top: f64,
    pending_scroll_top: Option<f64>,
    viewport_height: f64,
    buffer: usize,
    threshold: usize,
    dirty: bool,
    window: VirtualWindow,
}

impl<M: RowExtents> VirtualRows<M> {
    /// Creates a controller that virtualizes any non-empty model.
    #[must_use]
    pub fn new(model: M, viewport_height: f64, buffer: usize) -> Self {
        Self {
            model,
            scroll_top: 0.0,
            pending_scroll_top: None,
            viewport_height: viewport_height.max(0.0),
            buffer,
            threshold: 0,
            dirty: true,
            window: VirtualWindow::EMPTY,
        }
    }

    /// Shared access to the row model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the row model. Marks the window dirty.
    pub fn model_mut(&mut self) -> &mut M {
        self.dirty = true;
        &mut self.model
    }

    /// Sets the row count at or below which every row is rendered.
    pub fn set_threshold(&mut self, threshold: usize) {
        if threshold != self.threshold {
            self.threshold = threshold;
            self.dirty = true;
        }
    }

    /// Returns `true` if only a window of rows is rendered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.model.len() > self.threshold
    }

    /// Records a scroll position, applied on the next frame.
    pub fn on_scroll(&mut self, scroll_top: f64) {
        self.pending_scroll_top = Some(scroll_top.max(0.0));
    }

    /// Returns `true` if a scroll position waits for the next frame.
    #[must_use]
    pub const fn has_pending_scroll(&self) -> bool {
        self.pending_scroll_top.is_some()
    }

    /// Scroll position the current window was computed for.
    #[must_use]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Viewport height.
    #[must_use]
    pub const fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Sets the viewport height.
    pub fn set_viewport_height(&mut self, height: f64) {
        let height = height.max(0.0);
        if height != self.viewport_height {
            self.viewport_height = height;
            self.dirty = true;
        }
    }

    /// Rows rendered beyond each edge of the viewport.
    #[must_use]
    pub const fn buffer(&self) -> usize {
        self.buffer
    }

    /// Sets the rows rendered beyond each edge of the viewport.
    pub fn set_buffer(&mut self, buffer: usize) {
        if buffer != self.buffer {
            self.buffer = buffer;
            self.dirty = true;
        }
    }

    /// Window computed by the last frame.
    #[must_use]
    pub const fn window(&self) -> VirtualWindow {
        self.window
    }

    /// Applies recorded changes and recomputes the window.
    ///
    /// # Returns
    /// The new window if it differs from the previous one.
    pub fn on_frame(&mut self) -> Option<VirtualWindow> {
        if let Some(top) = self.pending_scroll_top.take() {
            if top != self.scroll_top {
                self.scroll_top = top;
                self.dirty = true;
            }
        }
        if !self.dirty {
            return None;
        }
        self.dirty = false;

        let window = if self.is_active() {
            compute_visible_range(&mut self.model, self.scroll_top, self.viewport_height, self.buffer)
        } else {
            full_range(&mut self.model)
        };
        log::trace!(
            "virtual rows: scroll_top={} window={}..{} offset_y={}",
            self.scroll_top,
            window.start,
            window.end,
            window.offset_y
        );
        if window == self.window {
            return None;
        }
        self.window = window;
        Some(window)
    }

    /// Largest scroll position that keeps the viewport within the content.
    pub fn max_scroll_top(&mut self) -> f64 {
        (self.model.total_height() - self.viewport_height).max(0.0)
    }

    /// Returns `true` if row `index` lies entirely inside the viewport.
    pub fn is_index_fully_visible(&mut self, index: usize) -> bool {
        if index >= self.model.len() {
            return false;
        }
        let top = self.model.offset_of(index);
        let bottom = top + self.model.height_of(index);
        top >= self.scroll_top && bottom <= self.scroll_top + self.viewport_height
    }

    /// Returns `true` if row `index` overlaps the viewport.
    pub fn is_index_partially_visible(&mut self, index: usize) -> bool {
        if index >= self.model.len() {
            return false;
        }
        let top = self.model.offset_of(index);
        let bottom = top + self.model.height_of(index);
        bottom > self.scroll_top && top < self.scroll_top + self.viewport_height
    }

    /// Row under content offset `y`, or `None` past the last row.
    pub fn row_at_offset(&mut self, y: f64) -> Option<usize> {
        if y < 0.0 || y >= self.model.total_height() {
            return None;
        }
        Some(self.model.index_at_offset(y))
    }

    /// Computes the scroll position that brings row `index` into view, and
    /// queues it for the next frame.
    ///
    /// # Returns
    /// The target scroll position, for the host to apply to its scroll container.
    pub fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) -> f64 {
        let len = self.model.len();
        if len == 0 {
            self.on_scroll(0.0);
            return 0.0;
        }
        let index = index.min(len - 1);
        let top = self.model.offset_of(index);
        let bottom = top + self.model.height_of(index);
        let viewport = self.viewport_height;
        let current = self.pending_scroll_top.unwrap_or(self.scroll_top);

        let target = match align {
            ScrollAlign::Start => top,
            ScrollAlign::End => bottom - viewport,
            ScrollAlign::Center => (top + bottom) / 2.0 - viewport / 2.0,
            ScrollAlign::Nearest => {
                if top >= current && bottom <= current + viewport {
                    current
                } else if top < current {
                    top
                } else {
                    bottom - viewport
                }
            }
        };
        let target = target.max(0.0).min(self.max_scroll_top());
        self.on_scroll(target);
        target
    }
}

impl<M: ResizableRowExtents> VirtualRows<M> {
    /// Sets the number of rows.
    pub fn set_row_count(&mut self, len: usize) {
        if len != self.model.len() {
            self.model.set_len(len);
            self.dirty = true;
        }
    }
}

impl VirtualRows<RowModel> {
    /// Creates a controller from a configuration.
    #[must_use]
    pub fn from_config(config: &VirtualScrollConfig, row_count: usize, viewport_height: f64) -> Self {
        let mut rows = Self::new(config.row_model(row_count), viewport_height, config.buffer_size);
        rows.threshold = config.threshold();
        rows
    }

    /// Records the rendered height of row `index`.
    pub fn on_row_measured(&mut self, index: usize, height: f64) {
        if self.model.set_measured(index, height) {
            self.dirty = true;
        }
    }

    /// Forgets measurements, for example after the data changed.
    pub fn reset_measurements(&mut self) {
        self.model.reset();
        self.dirty = true;
    }
}
