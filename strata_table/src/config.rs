// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table configuration and its validation.

use smallvec::SmallVec;
use strata_affix::AffixConfig;
use strata_columns::TableLayout;
use strata_virtual::VirtualScrollConfig;

use crate::pagination::PaginationConfig;

/// A configuration that works, but not the way it was probably meant to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    /// `allow_resize_column_width` is set.
    #[error("allowResizeColumnWidth is going to be deprecated, please use resizable instead")]
    DeprecatedAllowResizeColumnWidth,
    /// Columns are resizable in an auto-layout table.
    #[error("table-layout can not be `auto` for resizable column table, set `table-layout: fixed` please")]
    AutoLayoutResizable,
    /// Virtual scrolling without a height to scroll in.
    #[error("virtual scroll needs `height` or `max_height`, otherwise every row renders")]
    VirtualScrollWithoutHeight,
}

/// Table settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// Policy for columns without an explicit width.
    pub layout: TableLayout,
    /// Draw cell borders. Affects one-pixel chrome adjustments.
    pub bordered: bool,
    /// Render the header.
    pub show_header: bool,
    /// Allow dragging column edges.
    pub resizable: bool,
    /// Deprecated spelling of `resizable`; takes precedence when set.
    pub allow_resize_column_width: Option<bool>,
    /// Fixed body height. The header stays in place while the body scrolls.
    pub height: Option<f64>,
    /// Maximum body height. The header stays in place while the body scrolls.
    pub max_height: Option<f64>,
    /// Virtual scrolling settings, or `None` to render every row.
    pub scroll: Option<VirtualScrollConfig>,
    /// Stick the header to the top of the viewport.
    pub header_affixed_top: Option<AffixConfig>,
    /// Stick the footer to the bottom of the viewport.
    pub footer_affixed_bottom: Option<AffixConfig>,
    /// Stick a horizontal scrollbar to the bottom of the viewport.
    pub horizontal_scroll_affixed_bottom: Option<AffixConfig>,
    /// Stick the pagination bar to the bottom of the viewport.
    pub pagination_affixed_bottom: Option<AffixConfig>,
    /// Pagination settings, or `None` for a single page.
    pub pagination: Option<PaginationConfig>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            layout: TableLayout::Fixed,
            bordered: false,
            show_header: true,
            resizable: false,
            allow_resize_column_width: None,
            height: None,
            max_height: None,
            scroll: None,
            header_affixed_top: None,
            footer_affixed_bottom: None,
            horizontal_scroll_affixed_bottom: None,
            pagination_affixed_bottom: None,
            pagination: None,
        }
    }
}

impl TableConfig {
    /// Returns `true` if column edges can be dragged.
    #[must_use]
    pub fn is_column_resizable(&self) -> bool {
        self.allow_resize_column_width.unwrap_or(self.resizable)
    }

    /// Returns `true` if the header stays in place while the body scrolls.
    #[must_use]
    pub fn is_fixed_header(&self) -> bool {
        self.height.is_some() || self.max_height.is_some()
    }

    /// Lists the questionable settings in this configuration.
    #[must_use]
    pub fn warnings(&self) -> SmallVec<[ConfigWarning; 3]> {
        let mut warnings = SmallVec::new();
        if self.allow_resize_column_width.is_some() {
            warnings.push(ConfigWarning::DeprecatedAllowResizeColumnWidth);
        }
        if self.is_column_resizable() && self.layout == TableLayout::Auto {
            warnings.push(ConfigWarning::AutoLayoutResizable);
        }
        if self.scroll.is_some() && !self.is_fixed_header() {
            warnings.push(ConfigWarning::VirtualScrollWithoutHeight);
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use strata_columns::TableLayout;
    use strata_virtual::VirtualScrollConfig;

    use super::{ConfigWarning, TableConfig};

    #[test]
    fn defaults_are_quiet() {
        let config = TableConfig::default();
        assert!(config.warnings().is_empty());
        assert_eq!(config.layout, TableLayout::Fixed);
        assert!(!config.is_column_resizable());
        assert!(config.show_header);
    }

    #[test]
    fn deprecated_flag_wins_and_warns() {
        let config = TableConfig {
            resizable: false,
            allow_resize_column_width: Some(true),
            layout: TableLayout::Auto,
            ..TableConfig::default()
        };
        assert!(config.is_column_resizable());
        assert_eq!(
            config.warnings().as_slice(),
            &[
                ConfigWarning::DeprecatedAllowResizeColumnWidth,
                ConfigWarning::AutoLayoutResizable
            ]
        );
        assert_eq!(
            ConfigWarning::AutoLayoutResizable.to_string(),
            "table-layout can not be `auto` for resizable column table, set `table-layout: fixed` please"
        );
    }

    #[test]
    fn virtual_scroll_wants_a_height() {
        let mut config = TableConfig {
            scroll: Some(VirtualScrollConfig::default()),
            ..TableConfig::default()
        };
        assert_eq!(
            config.warnings().as_slice(),
            &[ConfigWarning::VirtualScrollWithoutHeight]
        );
        config.max_height = Some(400.0);
        assert!(config.warnings().is_empty());
        assert!(config.is_fixed_header());
    }
}
