// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Affix: when table chrome switches to a fixed overlay.
//!
//! A long table scrolled inside a page can keep its header pinned to the top
//! of the viewport, and its footer, horizontal scrollbar, and pagination bar
//! pinned to the bottom. The element itself stays in the flow as a
//! placeholder; an overlay copy is shown while the placeholder is past the
//! edge.
//!
//! [`Affix`] tracks one such element. Feed it the placeholder and viewport
//! rectangles whenever either moves; it reports an [`AffixChange`] only when
//! the element becomes fixed, moves while fixed, or is released.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` float support for `kurbo` via `libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`AffixConfig`].
//!
//! This crate is `no_std`.

#![no_std]

mod affix;

pub use affix::{Affix, AffixChange, AffixConfig, AffixEdge, AffixSnapshot};
