// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Table: a headless data table controller.
//!
//! [`Table`] composes the other Strata crates into the state behind one data
//! table with nested headers, pinned columns, resizable columns, virtual rows,
//! pagination, and affixed header, footer, scrollbar, and pagination bar. It
//! renders nothing. The host feeds it measurements and input events and reads
//! back layout state and [`TableEvent`]s:
//!
//! - configuration: [`TableConfig`], validated by [`TableConfig::warnings`],
//! - columns: [`Table::set_columns`], [`Table::set_column_width`], and the
//!   header pointer handlers for resize drags,
//! - rows: [`Table::set_row_count`], [`Table::on_row_measured`], and
//!   [`Pagination`] for local paging,
//! - scrolling: [`Table::on_body_scroll`] and [`Table::on_mirror_scroll`],
//!   with the row window following in [`Table::on_frame`],
//! - affix: [`Table::on_viewport_change`] and the overlay geometry in
//!   [`ChromeMetrics`].
//!
//! Derived state is recomputed in [`Table::commit`], which runs at most once
//! per batch of changes.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` float support for `kurbo` via `libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`TableConfig`] and the
//!   configuration types it contains.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chrome;
mod config;
mod error;
mod event;
mod flags;
mod pagination;
mod table;

pub use chrome::{ChromeMetrics, ChromeSizes};
pub use config::{ConfigWarning, TableConfig};
pub use error::TableError;
pub use event::{AffixTarget, CellPosition, TableEvent, TableEvents};
pub use flags::{Dirty, TableFlags};
pub use pagination::{DEFAULT_PAGE_SIZE, PageChange, Pagination, PaginationConfig};
pub use table::{AffixPlaceholders, Table};
