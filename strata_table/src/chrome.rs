// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizes and offsets of the affixed header, footer, and scrollbar overlays.

use crate::flags::TableFlags;

/// Measurements the host reports for the table chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChromeSizes {
    /// Rendered header height.
    pub header_height: f64,
    /// Rendered footer height, `0` when there is no footer.
    pub footer_height: f64,
    /// Platform scrollbar thickness.
    pub scrollbar_width: f64,
}

/// Overlay geometry derived from [`ChromeSizes`] and the table state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChromeMetrics {
    /// Render the header overlay (header affixed, or virtual rows), unless
    /// the header is hidden.
    pub show_affixed_header: bool,
    /// Width of the header and footer overlays.
    pub affixed_width: f64,
    /// Height of the clipping wrapper around the header overlay; hides the
    /// overlay's own horizontal scrollbar.
    pub affixed_header_wrap_height: f64,
    /// Top margin of the header overlay wrapper.
    pub affixed_header_margin_top: f64,
    /// Distance between the footer overlay and the viewport bottom.
    pub affixed_footer_offset_bottom: f64,
    /// Negative top margin pulling the footer overlay over the real footer.
    pub affixed_footer_margin_top: f64,
    /// Negative top margin of the affixed horizontal scrollbar while the
    /// footer overlay shows.
    pub affixed_scrollbar_margin_top: f64,
    /// Draw the divider next to the vertical scrollbar.
    pub show_right_divider: bool,
    /// Distance of that divider from the right edge.
    pub right_divider_offset: f64,
}

impl ChromeMetrics {
    /// Computes the overlay geometry.
    ///
    /// `header_affixed` is whether an affixed header is configured and
    /// `table_width` the rendered table width.
    #[must_use]
    pub fn compute(sizes: &ChromeSizes, flags: TableFlags, header_affixed: bool, table_width: f64) -> Self {
        let bordered = flags.contains(TableFlags::BORDERED);
        let is_virtual = flags.contains(TableFlags::VIRTUAL);
        let overflow = flags.contains(TableFlags::WIDTH_OVERFLOW);
        let multiple = flags.contains(TableFlags::MULTIPLE_HEADER);
        let border = if bordered { 1.0 } else { 0.0 };
        let bar_width = if overflow { sizes.scrollbar_width } else { 0.0 };

        // A virtual table without an affixed header keeps its overlay inside
        // the table border.
        let virtual_border = if is_virtual && !header_affixed { border } else { 0.0 };
        let footer_offset = bar_width + border;

        Self {
            show_affixed_header: (header_affixed || is_virtual)
                && !flags.contains(TableFlags::HEADER_HIDDEN)
                && table_width > 0.0,
            affixed_width: (table_width - border).max(0.0),
            affixed_header_wrap_height: (sizes.header_height - bar_width - virtual_border).max(0.0),
            affixed_header_margin_top: virtual_border,
            affixed_footer_offset_bottom: footer_offset,
            affixed_footer_margin_top: -(sizes.footer_height + footer_offset),
            affixed_scrollbar_margin_top: -(sizes.scrollbar_width * 2.0),
            show_right_divider: bordered
                && flags.contains(TableFlags::HEADER_FIXED)
                && (!multiple || overflow),
            right_divider_offset: sizes.scrollbar_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChromeMetrics, ChromeSizes};
    use crate::flags::TableFlags;

    const SIZES: ChromeSizes = ChromeSizes {
        header_height: 48.0,
        footer_height: 40.0,
        scrollbar_width: 6.0,
    };

    #[test]
    fn overflow_hides_the_overlay_scrollbar() {
        let flags = TableFlags::WIDTH_OVERFLOW | TableFlags::BORDERED;
        let m = ChromeMetrics::compute(&SIZES, flags, true, 800.0);
        assert!(m.show_affixed_header);
        assert_eq!(m.affixed_width, 799.0);
        assert_eq!(m.affixed_header_wrap_height, 42.0);
        assert_eq!(m.affixed_footer_offset_bottom, 7.0);
        assert_eq!(m.affixed_footer_margin_top, -47.0);

        let m = ChromeMetrics::compute(&SIZES, TableFlags::empty(), true, 800.0);
        assert_eq!(m.affixed_header_wrap_height, 48.0);
        assert_eq!(m.affixed_footer_offset_bottom, 0.0);
    }

    #[test]
    fn virtual_overlay_inside_border() {
        let flags = TableFlags::VIRTUAL | TableFlags::BORDERED;
        let m = ChromeMetrics::compute(&SIZES, flags, false, 500.0);
        assert!(m.show_affixed_header);
        assert_eq!(m.affixed_header_wrap_height, 47.0);
        assert_eq!(m.affixed_header_margin_top, 1.0);

        let m = ChromeMetrics::compute(&SIZES, TableFlags::empty(), false, 500.0);
        assert!(!m.show_affixed_header);
    }

    #[test]
    fn hidden_header_has_no_overlay() {
        let m = ChromeMetrics::compute(&SIZES, TableFlags::HEADER_HIDDEN, true, 800.0);
        assert!(!m.show_affixed_header);
        let flags = TableFlags::HEADER_HIDDEN | TableFlags::VIRTUAL;
        let m = ChromeMetrics::compute(&SIZES, flags, false, 800.0);
        assert!(!m.show_affixed_header);
    }

    #[test]
    fn right_divider_visibility() {
        let base = TableFlags::BORDERED | TableFlags::HEADER_FIXED;
        let show = |flags| ChromeMetrics::compute(&SIZES, flags, false, 100.0).show_right_divider;
        assert!(show(base));
        assert!(!show(base | TableFlags::MULTIPLE_HEADER));
        assert!(show(base | TableFlags::MULTIPLE_HEADER | TableFlags::WIDTH_OVERFLOW));
        assert!(!show(TableFlags::HEADER_FIXED));
    }
}
