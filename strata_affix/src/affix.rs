// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-crossing detection for affixed table chrome.

use kurbo::Rect;

/// Viewport edge an element sticks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AffixEdge {
    /// Sticks below the top edge, like a header.
    #[default]
    Top,
    /// Sticks above the bottom edge, like a footer or a scrollbar.
    Bottom,
}

/// Where and how far from the edge an element sticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AffixConfig {
    /// Edge to stick to.
    pub edge: AffixEdge,
    /// Distance between the edge and the stuck element.
    pub offset: f64,
}

impl AffixConfig {
    /// Sticks to the top edge at `offset`.
    #[must_use]
    pub const fn top(offset: f64) -> Self {
        Self {
            edge: AffixEdge::Top,
            offset,
        }
    }

    /// Sticks to the bottom edge at `offset`.
    #[must_use]
    pub const fn bottom(offset: f64) -> Self {
        Self {
            edge: AffixEdge::Bottom,
            offset,
        }
    }
}

/// Geometry of the fixed overlay, in viewport coordinates.
///
/// Width and horizontal position come from the placeholder, so the overlay
/// lines up with the column grid it replaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffixSnapshot {
    /// Left edge of the overlay.
    pub left: f64,
    /// Top edge of the overlay.
    pub top: f64,
    /// Overlay width.
    pub width: f64,
    /// Overlay height.
    pub height: f64,
}

impl AffixSnapshot {
    /// The overlay as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

/// What changed in an [`Affix::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AffixChange {
    /// The element switched to a fixed overlay.
    Fixed(AffixSnapshot),
    /// The element stays fixed but the overlay geometry moved.
    Moved(AffixSnapshot),
    /// The element went back into the flow.
    Released,
}

/// Decides when an element switches between its place in the flow and a fixed
/// overlay.
///
/// The host keeps a placeholder where the element sits in the flow and reports
/// its rectangle together with the viewport (and optionally the bounds of the
/// table, so the overlay goes away once the table scrolls out of view).
///
/// ```rust
/// use kurbo::Rect;
/// use strata_affix::{Affix, AffixChange, AffixConfig};
///
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let mut header = Affix::new(AffixConfig::top(0.0));
///
/// // Header in view: nothing to do.
/// assert_eq!(header.update(Rect::new(10.0, 40.0, 510.0, 80.0), viewport, None), None);
///
/// // Scrolled past the top edge: fix it, keeping its width and left offset.
/// let Some(AffixChange::Fixed(snapshot)) =
///     header.update(Rect::new(10.0, -20.0, 510.0, 20.0), viewport, None)
/// else {
///     panic!("header should be fixed");
/// };
/// assert_eq!((snapshot.left, snapshot.top, snapshot.width), (10.0, 0.0, 500.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Affix {
    config: AffixConfig,
    fixed: Option<AffixSnapshot>,
}

impl Affix {
    /// Creates a controller for an element in the flow.
    #[must_use]
    pub const fn new(config: AffixConfig) -> Self {
        Self {
            config,
            fixed: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> AffixConfig {
        self.config
    }

    /// Replaces the configuration. Takes effect on the next update.
    pub fn set_config(&mut self, config: AffixConfig) {
        self.config = config;
    }

    /// Returns `true` while the element is a fixed overlay.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// Overlay geometry while fixed.
    #[must_use]
    pub const fn snapshot(&self) -> Option<AffixSnapshot> {
        self.fixed
    }

    /// Overlay rectangle while fixed.
    #[must_use]
    pub fn overlay_rect(&self) -> Option<Rect> {
        self.fixed.map(|s| s.rect())
    }

    /// Re-evaluates the element against the viewport.
    ///
    /// - `placeholder`: where the element sits in the flow.
    /// - `viewport`: the visible area.
    /// - `container`: bounds the element must stay inside, usually the table.
    ///
    /// # Returns
    /// The change, or `None` if nothing changed.
    pub fn update(
        &mut self,
        placeholder: Rect,
        viewport: Rect,
        container: Option<Rect>,
    ) -> Option<AffixChange> {
        let next = self.evaluate(placeholder, viewport, container);
        let change = match (self.fixed, next) {
            (None, None) => None,
            (None, Some(s)) => Some(AffixChange::Fixed(s)),
            (Some(_), None) => Some(AffixChange::Released),
            (Some(old), Some(new)) if old == new => None,
            (Some(_), Some(new)) => Some(AffixChange::Moved(new)),
        };
        if let Some(change) = &change {
            log::debug!("affix {:?}: {change:?}", self.config.edge);
        }
        self.fixed = next;
        change
    }

    /// Puts the element back into the flow.
    ///
    /// # Returns
    /// `true` if it was fixed.
    pub fn release(&mut self) -> bool {
        self.fixed.take().is_some()
    }

    fn evaluate(&self, placeholder: Rect, viewport: Rect, container: Option<Rect>) -> Option<AffixSnapshot> {
        let height = placeholder.height();
        let offset = self.config.offset;
        let top = match self.config.edge {
            AffixEdge::Top => {
                let edge = viewport.y0 + offset;
                if placeholder.y0 >= edge {
                    return None;
                }
                if container.is_some_and(|c| c.y1 < edge + height) {
                    return None;
                }
                edge
            }
            AffixEdge::Bottom => {
                let edge = viewport.y1 - offset;
                if placeholder.y1 <= edge {
                    return None;
                }
                if container.is_some_and(|c| c.y0 > edge - height) {
                    return None;
                }
                edge - height
            }
        };
        Some(AffixSnapshot {
            left: placeholder.x0,
            top,
            width: placeholder.width(),
            height,
        })
    }
}
