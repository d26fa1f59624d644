// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications a [`Table`](crate::Table) hands back to its host.

use alloc::vec::Vec;

use smallvec::SmallVec;
use strata_affix::AffixChange;
use strata_columns::{ColKey, ColumnShadow};
use strata_scroll::Propagation;
use strata_virtual::VirtualWindow;

use crate::pagination::PageChange;

/// Events produced by one call into a [`Table`](crate::Table).
pub type TableEvents = SmallVec<[TableEvent; 4]>;

/// Affixed table chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AffixTarget {
    /// Header stuck to the top.
    Header,
    /// Footer stuck to the bottom.
    Footer,
    /// Horizontal scrollbar stuck to the bottom.
    HorizontalScrollbar,
    /// Pagination bar stuck to the bottom.
    Pagination,
}

/// A body cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellPosition {
    /// Row within the rendered data slice.
    pub row: usize,
    /// Row within the table data, accounting for local pagination.
    pub data_index: usize,
    /// Leaf column index.
    pub column: usize,
    /// Leaf column key.
    pub key: ColKey,
}

/// Something the host should react to.
#[derive(Clone, Debug, PartialEq)]
pub enum TableEvent {
    /// The current page changed.
    PageChange(PageChange),
    /// A body cell was clicked.
    CellClick(CellPosition),
    /// The body scrolled.
    Scroll {
        /// Horizontal position.
        scroll_left: f64,
        /// Vertical position.
        scroll_top: f64,
    },
    /// The body scrolled horizontally.
    ScrollX {
        /// Horizontal position.
        scroll_left: f64,
    },
    /// The body scrolled vertically.
    ScrollY {
        /// Vertical position.
        scroll_top: f64,
    },
    /// The leaf column sequence changed.
    LeafColumnsChange(Vec<ColKey>),
    /// A column resize drag finished.
    ColumnResized {
        /// Resized column.
        key: ColKey,
        /// New width.
        width: f64,
    },
    /// Mirrored fragments need a new horizontal position.
    MirrorScroll(Propagation),
    /// Fixed-column shadows changed.
    ShadowChange(ColumnShadow),
    /// The rendered row window changed.
    WindowChange(VirtualWindow),
    /// Affixed chrome became fixed, moved, or was released.
    Affix {
        /// Which chrome.
        target: AffixTarget,
        /// What happened.
        change: AffixChange,
    },
}
