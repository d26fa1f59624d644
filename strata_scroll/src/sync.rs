// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical horizontal scroll position shared by mirrored fragments.

use smallvec::SmallVec;

/// A scrollable fragment that mirrors the table's horizontal position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollMirror {
    /// The table body, the primary scroll container.
    Body,
    /// The header overlay shown while the header is affixed.
    AffixedHeader,
    /// The footer overlay shown while the footer is affixed.
    AffixedFooter,
    /// The stand-alone horizontal scrollbar affixed to the viewport bottom.
    HorizontalScrollbar,
}

impl ScrollMirror {
    /// Every mirror, in propagation order.
    pub const ALL: [Self; 4] = [
        Self::Body,
        Self::AffixedHeader,
        Self::AffixedFooter,
        Self::HorizontalScrollbar,
    ];

    /// The flag for this mirror in a [`MirrorSet`].
    #[must_use]
    pub const fn flag(self) -> MirrorSet {
        match self {
            Self::Body => MirrorSet::BODY,
            Self::AffixedHeader => MirrorSet::AFFIXED_HEADER,
            Self::AffixedFooter => MirrorSet::AFFIXED_FOOTER,
            Self::HorizontalScrollbar => MirrorSet::HORIZONTAL_SCROLLBAR,
        }
    }
}

bitflags::bitflags! {
    /// A set of [`ScrollMirror`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MirrorSet: u8 {
        /// [`ScrollMirror::Body`].
        const BODY                 = 0b0001;
        /// [`ScrollMirror::AffixedHeader`].
        const AFFIXED_HEADER       = 0b0010;
        /// [`ScrollMirror::AffixedFooter`].
        const AFFIXED_FOOTER       = 0b0100;
        /// [`ScrollMirror::HorizontalScrollbar`].
        const HORIZONTAL_SCROLLBAR = 0b1000;
    }
}

impl MirrorSet {
    /// The mirrors in this set, in propagation order.
    pub fn mirrors(self) -> impl Iterator<Item = ScrollMirror> {
        ScrollMirror::ALL
            .into_iter()
            .filter(move |m| self.contains(m.flag()))
    }
}

/// Mirrors to update with a new horizontal position.
#[derive(Clone, Debug, PartialEq)]
pub struct Propagation {
    /// Position to apply.
    pub scroll_left: f64,
    /// Fragment the position came from, or `None` for a programmatic change.
    pub source: Option<ScrollMirror>,
    /// Fragments whose `scroll_left` must be set.
    pub targets: SmallVec<[ScrollMirror; 4]>,
}

/// Keeps every registered fragment at one horizontal scroll position.
///
/// Setting `scroll_left` on a fragment makes it report a scroll event of its
/// own. Such an event carries the position the sync already holds, so it is
/// recognized as an echo and produces no further propagation.
///
/// ```rust
/// use strata_scroll::{ScrollMirror, ScrollSync};
///
/// let mut sync = ScrollSync::new();
/// sync.register(ScrollMirror::AffixedHeader);
///
/// let p = sync.on_scroll(ScrollMirror::Body, 120.0).unwrap();
/// assert_eq!(p.targets.as_slice(), &[ScrollMirror::AffixedHeader]);
///
/// // The header reports the position it was just given.
/// assert!(sync.on_scroll(ScrollMirror::AffixedHeader, 120.0).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ScrollSync {
    scroll_left: f64,
    registered: MirrorSet,
    tolerance: f64,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSync {
    /// Creates a sync with only the body registered, at position `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scroll_left: 0.0,
            registered: MirrorSet::BODY,
            tolerance: 0.0,
        }
    }

    /// Treats positions within `tolerance` of the canonical one as echoes.
    ///
    /// Hosts that round scroll positions to device pixels should set this to
    /// the rounding step.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Canonical horizontal position.
    #[must_use]
    pub const fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Registered mirrors.
    #[must_use]
    pub const fn registered(&self) -> MirrorSet {
        self.registered
    }

    /// Returns `true` if `mirror` is registered.
    #[must_use]
    pub const fn is_registered(&self, mirror: ScrollMirror) -> bool {
        self.registered.contains(mirror.flag())
    }

    /// Registers a fragment that appeared, for example a header overlay.
    ///
    /// # Returns
    /// A propagation bringing the new fragment to the canonical position, or
    /// `None` if it was already registered.
    pub fn register(&mut self, mirror: ScrollMirror) -> Option<Propagation> {
        if self.is_registered(mirror) {
            return None;
        }
        self.registered.insert(mirror.flag());
        let mut targets = SmallVec::new();
        targets.push(mirror);
        Some(Propagation {
            scroll_left: self.scroll_left,
            source: None,
            targets,
        })
    }

    /// Unregisters a fragment that went away.
    pub fn unregister(&mut self, mirror: ScrollMirror) {
        self.registered.remove(mirror.flag());
    }

    /// Handles a scroll event reported by `source`.
    ///
    /// # Returns
    /// The other mirrors to update, or `None` if the event is an echo of the
    /// canonical position or comes from an unregistered fragment.
    pub fn on_scroll(&mut self, source: ScrollMirror, scroll_left: f64) -> Option<Propagation> {
        if !self.is_registered(source) {
            log::debug!("scroll sync: ignoring event from unregistered {source:?}");
            return None;
        }
        let scroll_left = sanitize(scroll_left);
        if self.is_echo(scroll_left) {
            return None;
        }
        self.scroll_left = scroll_left;
        let targets = (self.registered - source.flag()).mirrors().collect();
        Some(Propagation {
            scroll_left,
            source: Some(source),
            targets,
        })
    }

    /// Moves every registered mirror to `scroll_left`.
    ///
    /// # Returns
    /// `None` if the position does not change.
    pub fn set_scroll_left(&mut self, scroll_left: f64) -> Option<Propagation> {
        let scroll_left = sanitize(scroll_left);
        if self.is_echo(scroll_left) {
            return None;
        }
        self.scroll_left = scroll_left;
        Some(Propagation {
            scroll_left,
            source: None,
            targets: self.registered.mirrors().collect(),
        })
    }

    fn is_echo(&self, scroll_left: f64) -> bool {
        let delta = scroll_left - self.scroll_left;
        delta <= self.tolerance && delta >= -self.tolerance
    }
}

fn sanitize(scroll_left: f64) -> f64 {
    debug_assert!(
        scroll_left.is_finite(),
        "scroll positions must be finite; got {scroll_left:?}"
    );
    scroll_left.max(0.0)
}
