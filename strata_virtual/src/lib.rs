// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Virtual: vertical row virtualization for headless data tables.
//!
//! Only the rows near the viewport are rendered. Everything above them is
//! replaced by a translation of `offset_y`, and the scroll container keeps the
//! full content height so the scrollbar stays honest.
//!
//! - [`RowExtents`]: row heights and their cumulative offsets. Two models are
//!   provided: [`UniformRowHeights`] when every row has the same height, and
//!   [`MeasuredRowHeights`] when the host measures rendered rows and feeds the
//!   heights back.
//! - [`compute_visible_range`]: the [`VirtualWindow`] to render for a scroll
//!   position, with a buffer of extra rows on each side.
//! - [`VirtualScrollConfig`]: the settings a table exposes (row height, buffer,
//!   threshold) and the [`RowModel`] they select.
//! - [`VirtualRows`]: a controller that collects scroll, resize, and
//!   measurement events and recomputes the window at most once per frame.
//!
//! ## Example
//!
//! ```rust
//! use strata_virtual::{VirtualRows, VirtualScrollConfig};
//!
//! let config = VirtualScrollConfig {
//!     row_height: Some(48.0),
//!     ..VirtualScrollConfig::default()
//! };
//! let mut rows = VirtualRows::from_config(&config, 10_000, 480.0);
//!
//! rows.on_scroll(4800.0);
//! // Rendered rows get measured and reported back.
//! rows.on_row_measured(100, 64.0);
//!
//! let window = rows.on_frame().unwrap();
//! assert_eq!(window.start, 80);
//! assert_eq!(window.offset_y, 80.0 * 48.0);
//! ```
//!
//! Tables at or below the threshold render every row; see
//! [`VirtualScrollConfig::threshold`].
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`VirtualScrollConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod measured;
mod model;
mod rows;
mod uniform;
mod util;

pub use config::{
    DEFAULT_BUFFER_SIZE, DEFAULT_ROW_HEIGHT, DEFAULT_THRESHOLD, RowModel, VirtualScrollConfig,
};
pub use measured::MeasuredRowHeights;
pub use model::{RowExtents, VirtualWindow, compute_visible_range, full_range};
pub use rows::{ResizableRowExtents, ScrollAlign, VirtualRows};
pub use uniform::UniformRowHeights;
