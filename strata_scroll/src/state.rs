// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll container metrics and axis discrimination.

bitflags::bitflags! {
    /// Scroll axes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScrollAxes: u8 {
        /// Horizontal.
        const X = 0b01;
        /// Vertical.
        const Y = 0b10;
    }
}

/// Position and extents of the body scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Horizontal scroll position.
    pub scroll_left: f64,
    /// Vertical scroll position.
    pub scroll_top: f64,
    /// Content width.
    pub scroll_width: f64,
    /// Content height.
    pub scroll_height: f64,
    /// Viewport width.
    pub client_width: f64,
    /// Viewport height.
    pub client_height: f64,
}

impl ScrollState {
    /// Returns `true` if the content is wider than the viewport.
    #[must_use]
    pub fn overflow_x(&self) -> bool {
        self.scroll_width > self.client_width
    }

    /// Returns `true` if the content is taller than the viewport.
    #[must_use]
    pub fn overflow_y(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Axes along which the content overflows.
    #[must_use]
    pub fn overflow(&self) -> ScrollAxes {
        let mut axes = ScrollAxes::empty();
        axes.set(ScrollAxes::X, self.overflow_x());
        axes.set(ScrollAxes::Y, self.overflow_y());
        axes
    }

    /// Largest horizontal position.
    #[must_use]
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Largest vertical position.
    #[must_use]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Returns `true` if there is content to the left of the viewport.
    #[must_use]
    pub fn can_scroll_left(&self) -> bool {
        self.scroll_left > 0.0
    }

    /// Returns `true` if there is content to the right of the viewport.
    #[must_use]
    pub fn can_scroll_right(&self) -> bool {
        self.scroll_left < self.max_scroll_left()
    }
}

/// Tells horizontal body scrolls from vertical ones.
///
/// A scroll event reports both positions; comparing them with the previous
/// event tells which axes actually moved. Horizontal-only scrolls then skip
/// the virtual row recomputation, and vertical-only scrolls skip the shadow
/// update.
///
/// ```rust
/// use strata_scroll::{ScrollAxes, ScrollTracker};
///
/// let mut tracker = ScrollTracker::new();
/// assert_eq!(tracker.on_body_scroll(30.0, 0.0), ScrollAxes::X);
/// assert_eq!(tracker.on_body_scroll(30.0, 200.0), ScrollAxes::Y);
/// assert!(tracker.on_body_scroll(30.0, 200.0).is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollTracker {
    last_left: f64,
    last_top: f64,
}

impl ScrollTracker {
    /// Creates a tracker at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_left: 0.0,
            last_top: 0.0,
        }
    }

    /// Records a body scroll event.
    ///
    /// # Returns
    /// The axes whose position changed since the previous event.
    pub fn on_body_scroll(&mut self, scroll_left: f64, scroll_top: f64) -> ScrollAxes {
        let mut axes = ScrollAxes::empty();
        axes.set(ScrollAxes::X, scroll_left != self.last_left);
        axes.set(ScrollAxes::Y, scroll_top != self.last_top);
        self.last_left = scroll_left;
        self.last_top = scroll_top;
        axes
    }

    /// Last horizontal position seen.
    #[must_use]
    pub const fn last_left(&self) -> f64 {
        self.last_left
    }

    /// Last vertical position seen.
    #[must_use]
    pub const fn last_top(&self) -> f64 {
        self.last_top
    }

    /// Forgets the previous event, for example after the data was replaced.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrollAxes, ScrollState, ScrollTracker};

    #[test]
    fn overflow_and_limits() {
        let state = ScrollState {
            scroll_left: 50.0,
            scroll_width: 800.0,
            client_width: 500.0,
            scroll_height: 300.0,
            client_height: 400.0,
            ..ScrollState::default()
        };
        assert_eq!(state.overflow(), ScrollAxes::X);
        assert_eq!(state.max_scroll_left(), 300.0);
        assert_eq!(state.max_scroll_top(), 0.0);
        assert!(state.can_scroll_left());
        assert!(state.can_scroll_right());
    }

    #[test]
    fn diagonal_scroll_reports_both_axes() {
        let mut tracker = ScrollTracker::new();
        assert_eq!(tracker.on_body_scroll(5.0, 5.0), ScrollAxes::X | ScrollAxes::Y);
        tracker.reset();
        assert_eq!(tracker.last_top(), 0.0);
        assert_eq!(tracker.on_body_scroll(0.0, 5.0), ScrollAxes::Y);
    }
}
