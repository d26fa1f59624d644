// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Derived table state, typically mapped to style classes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TableFlags: u16 {
        /// The header stays in place while the body scrolls.
        const HEADER_FIXED    = 1 << 0;
        /// Some column is pinned to a side.
        const COLUMN_FIXED    = 1 << 1;
        /// Columns are wider than the container.
        const WIDTH_OVERFLOW  = 1 << 2;
        /// The header has more than one row.
        const MULTIPLE_HEADER = 1 << 3;
        /// Show the shadow after the left-pinned columns.
        const LEFT_SHADOW     = 1 << 4;
        /// Show the shadow before the right-pinned columns.
        const RIGHT_SHADOW    = 1 << 5;
        /// Column edges can be dragged.
        const RESIZABLE       = 1 << 6;
        /// Only a window of rows renders.
        const VIRTUAL         = 1 << 7;
        /// Cells have borders.
        const BORDERED        = 1 << 8;
        /// Rows are sliced into pages locally.
        const PAGINATED       = 1 << 9;
        /// The header row is not rendered.
        const HEADER_HIDDEN   = 1 << 10;
    }
}

bitflags::bitflags! {
    /// Derived state waiting for [`Table::commit`](crate::Table::commit).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Dirty: u8 {
        /// Configuration changed; everything below follows.
        const CONFIG   = 1 << 0;
        /// The column tree changed.
        const COLUMNS  = 1 << 1;
        /// Widths need resolving: container, overrides, or layout changed.
        const GEOMETRY = 1 << 2;
        /// Sticky offsets need recomputing.
        const FIXED    = 1 << 3;
        /// Column shadows need recomputing.
        const SHADOW   = 1 << 4;
        /// Row count or page changed.
        const ROWS     = 1 << 5;
        /// Affix chrome sizes changed.
        const CHROME   = 1 << 6;
    }
}
