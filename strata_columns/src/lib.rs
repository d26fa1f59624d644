// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Columns: column geometry for headless data tables.
//!
//! This crate turns a tree of column definitions into the numbers a renderer
//! needs to draw a table with multi-row headers and pinned columns:
//!
//! - [`HeaderLayout`]: expands a [`Column`] tree into header rows of
//!   [`HeaderCell`]s placed on a grid of leaf slots (with row and column spans),
//!   and the ordered sequence of [`LeafColumn`]s that the body renders.
//! - [`resolve_geometry`]: resolves each leaf's width from overrides, explicit
//!   widths, and a [`TableLayout`] policy, and reports whether the columns
//!   overflow the container ([`ColumnGeometry`]).
//! - [`FixedPositions`]: sticky `left`/`right` offsets for pinned columns and
//!   header groups, plus which column carries the edge shadow.
//! - [`ColumnShadow`]: which shadows to show for a horizontal scroll position.
//! - [`ColumnResize`]: a pointer state machine for dragging column edges.
//!
//! ## Example
//!
//! ```rust
//! use strata_columns::{
//!     Column, ColumnShadow, FixedPositions, FixedSide, HeaderLayout, TableLayout,
//!     WidthOverrides, resolve_geometry,
//! };
//!
//! let columns = [
//!     Column::new("id").width(60.0).fixed(FixedSide::Left),
//!     Column::new("name").width(240.0),
//!     Column::new("email").width(320.0),
//! ];
//! let header = HeaderLayout::new(&columns);
//! let geometry = resolve_geometry(header.leaves(), &WidthOverrides::new(), 400.0, TableLayout::Fixed);
//! assert!(geometry.is_overflowing());
//!
//! let fixed = FixedPositions::compute(&header, &geometry);
//! assert_eq!(fixed.get("id").and_then(|p| p.left()), Some(0.0));
//!
//! let shadow = ColumnShadow::from_scroll(25.0, geometry.total_width(), 400.0, &fixed);
//! assert!(shadow.contains(ColumnShadow::LEFT));
//! ```
//!
//! Everything here is derived state: recompute the header after the column set
//! changes, and the geometry and fixed positions after the header, the container
//! width, or a width override changes.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` float support for `kurbo` via `libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for the configuration types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod column;
mod fixed;
mod geometry;
mod header;
mod resize;

pub use column::{
    ColKey, Column, ColumnWidth, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH, FixedSide, ParseWidthError,
    ResizeLimits,
};
pub use fixed::{ColumnShadow, FixedPosition, FixedPositions};
pub use geometry::{ColumnGeometry, DEFAULT_COLUMN_WIDTH, TableLayout, WidthOverrides, resolve_geometry};
pub use header::{HeaderCell, HeaderLayout, LeafColumn};
pub use resize::{ColumnResize, RESIZE_HANDLE_WIDTH, ResizeCommit};
