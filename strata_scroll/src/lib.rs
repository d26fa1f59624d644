// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Scroll: horizontal scroll synchronization for headless data tables.
//!
//! A table with an affixed header, an affixed footer, or a stand-alone
//! horizontal scrollbar renders the same column grid in several scroll
//! containers. They must all show the same horizontal position, and setting a
//! position on one must not bounce back and forth between them.
//!
//! - [`ScrollSync`]: owns the canonical `scroll_left`, tells which
//!   [`ScrollMirror`]s to update after a scroll event, and swallows echoes.
//! - [`ScrollTracker`]: reports which [`ScrollAxes`] a body scroll event moved.
//! - [`ScrollState`]: the body container's position and extents, with
//!   overflow queries.
//!
//! Vertical scrolling is never mirrored.
//!
//! This crate is `no_std`.

#![no_std]

mod state;
mod sync;

pub use state::{ScrollAxes, ScrollState, ScrollTracker};
pub use sync::{MirrorSet, Propagation, ScrollMirror, ScrollSync};
