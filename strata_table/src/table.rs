// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owning table controller.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use strata_affix::{Affix, AffixChange, AffixConfig};
use strata_columns::{
    Column, ColumnGeometry, ColumnResize, ColumnShadow, ColumnWidth, FixedPositions, HeaderLayout,
    WidthOverrides, resolve_geometry,
};
use strata_scroll::{ScrollAxes, ScrollMirror, ScrollState, ScrollSync, ScrollTracker};
use strata_virtual::{ScrollAlign, VirtualRows, VirtualScrollConfig, VirtualWindow};

use crate::chrome::{ChromeMetrics, ChromeSizes};
use crate::config::TableConfig;
use crate::error::TableError;
use crate::event::{AffixTarget, CellPosition, TableEvent, TableEvents};
use crate::flags::{Dirty, TableFlags};
use crate::pagination::{PageChange, Pagination};

/// Where the affixable chrome sits in the flow, in viewport coordinates.
///
/// `None` means the element is not rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AffixPlaceholders {
    /// The whole table; overlays are released once it leaves the viewport.
    pub table: Rect,
    /// The header.
    pub header: Option<Rect>,
    /// The footer.
    pub footer: Option<Rect>,
    /// The horizontal scrollbar placeholder below the body.
    pub horizontal_scrollbar: Option<Rect>,
    /// The pagination bar.
    pub pagination: Option<Rect>,
}

impl AffixPlaceholders {
    fn get(&self, target: AffixTarget) -> Option<Rect> {
        match target {
            AffixTarget::Header => self.header,
            AffixTarget::Footer => self.footer,
            AffixTarget::HorizontalScrollbar => self.horizontal_scrollbar,
            AffixTarget::Pagination => self.pagination,
        }
    }
}

#[derive(Clone, Debug)]
struct AffixSlot {
    target: AffixTarget,
    affix: Affix,
}

impl AffixTarget {
    const fn mirror(self) -> Option<ScrollMirror> {
        match self {
            Self::Header => Some(ScrollMirror::AffixedHeader),
            Self::Footer => Some(ScrollMirror::AffixedFooter),
            Self::HorizontalScrollbar => Some(ScrollMirror::HorizontalScrollbar),
            Self::Pagination => None,
        }
    }
}

/// A headless data table.
///
/// The table owns the column tree, the row count, and every piece of derived
/// layout state. Setters record what changed; [`Table::commit`] recomputes it
/// in one pass (header, widths, sticky offsets, shadows, then rows) and
/// reports what the host has to update. Scroll handlers run immediately
/// except for the row window, which follows on the next [`Table::on_frame`].
///
/// ```rust
/// use strata_columns::{Column, FixedSide};
/// use strata_table::{Table, TableConfig, TableEvent, TableFlags};
/// use strata_virtual::VirtualScrollConfig;
///
/// let config = TableConfig {
///     max_height: Some(400.0),
///     scroll: Some(VirtualScrollConfig {
///         row_height: Some(40.0),
///         is_fixed_row_height: true,
///         ..VirtualScrollConfig::default()
///     }),
///     ..TableConfig::default()
/// };
/// let mut table = Table::new(
///     config,
///     [
///         Column::new("id").width(80.0).fixed(FixedSide::Left),
///         Column::new("name").width(300.0),
///         Column::new("email").width(300.0),
///     ],
/// );
/// table.set_row_count(10_000);
/// table.on_container_resize(500.0, 400.0);
/// table.commit();
///
/// assert!(table.flags().contains(TableFlags::VIRTUAL | TableFlags::WIDTH_OVERFLOW));
///
/// // Scroll down and sideways, then render the next frame.
/// let events = table.on_body_scroll(120.0, 4000.0);
/// assert!(events.iter().any(|e| matches!(e, TableEvent::ShadowChange(_))));
/// table.on_frame();
/// assert_eq!(table.window().start, 80);
/// ```
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    columns: Vec<Column>,
    header: HeaderLayout,
    overrides: WidthOverrides,
    geometry: ColumnGeometry,
    fixed: FixedPositions,
    shadow: ColumnShadow,
    scroll: ScrollState,
    tracker: ScrollTracker,
    sync: ScrollSync,
    rows: VirtualRows,
    pagination: Option<Pagination>,
    row_count: usize,
    resize: ColumnResize,
    affixes: SmallVec<[AffixSlot; 4]>,
    /// Fixed overlays whose configuration was removed, reported on commit.
    released: SmallVec<[AffixTarget; 4]>,
    sizes: ChromeSizes,
    chrome: ChromeMetrics,
    dirty: Dirty,
}

impl Table {
    /// Creates a table. Call [`Table::commit`] before reading layout state.
    #[must_use]
    pub fn new(config: TableConfig, columns: impl IntoIterator<Item = Column>) -> Self {
        let mut table = Self {
            rows: VirtualRows::from_config(&row_config(&config), 0, 0.0),
            pagination: config.pagination.map(Pagination::new),
            config,
            columns: columns.into_iter().collect(),
            header: HeaderLayout::default(),
            overrides: WidthOverrides::new(),
            geometry: ColumnGeometry::default(),
            fixed: FixedPositions::default(),
            shadow: ColumnShadow::empty(),
            scroll: ScrollState::default(),
            tracker: ScrollTracker::new(),
            sync: ScrollSync::new(),
            row_count: 0,
            resize: ColumnResize::new(),
            affixes: SmallVec::new(),
            released: SmallVec::new(),
            sizes: ChromeSizes::default(),
            chrome: ChromeMetrics::default(),
            dirty: Dirty::all(),
        };
        table.sync_affix_slots();
        table
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Virtual scroll state is rebuilt only if its settings changed, and the
    /// page only resets if the pagination settings changed.
    pub fn set_config(&mut self, config: TableConfig) {
        if config == self.config {
            return;
        }
        let old = core::mem::replace(&mut self.config, config);
        if old.scroll != self.config.scroll {
            let scroll_top = self.rows.scroll_top();
            let viewport = self.rows.viewport_height();
            self.rows = VirtualRows::from_config(&row_config(&self.config), 0, viewport);
            self.rows.on_scroll(scroll_top);
        }
        if old.pagination != self.config.pagination {
            self.pagination = self.config.pagination.map(Pagination::new);
        }
        self.sync_affix_slots();
        self.dirty |= Dirty::CONFIG;
    }

    /// Column tree.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replaces the column tree.
    pub fn set_columns(&mut self, columns: impl IntoIterator<Item = Column>) {
        self.columns = columns.into_iter().collect();
        self.dirty |= Dirty::COLUMNS;
    }

    /// Number of rows in the table data.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Sets the number of rows in the table data.
    pub fn set_row_count(&mut self, row_count: usize) {
        if row_count != self.row_count {
            self.row_count = row_count;
            self.dirty |= Dirty::ROWS;
        }
    }

    /// Overrides the width of a leaf column, as a finished resize drag does.
    ///
    /// # Errors
    /// [`TableError::UnknownColumn`] if no leaf column has `key`.
    pub fn set_column_width(&mut self, key: &str, width: f64) -> Result<(), TableError> {
        let leaf = self
            .header
            .leaf(key)
            .ok_or_else(|| TableError::UnknownColumn(key.into()))?;
        debug_assert!(width.is_finite(), "column widths must be finite; got {width:?}");
        self.overrides.insert(leaf.key.clone(), width.max(0.0));
        self.dirty |= Dirty::GEOMETRY;
        Ok(())
    }

    /// Overrides the width of a leaf column from a CSS-like string such as
    /// `"120px"` or `"25%"`. Percentages resolve against the container width.
    ///
    /// # Errors
    /// [`TableError::InvalidWidth`] if `width` does not parse, and
    /// [`TableError::UnknownColumn`] if no leaf column has `key`.
    pub fn set_column_width_str(&mut self, key: &str, width: &str) -> Result<(), TableError> {
        let width: ColumnWidth = width.parse()?;
        self.set_column_width(key, width.resolve(self.scroll.client_width))
    }

    /// Drops the width override of `key`.
    ///
    /// # Returns
    /// `true` if there was one.
    pub fn clear_column_width(&mut self, key: &str) -> bool {
        let removed = self.overrides.remove(key).is_some();
        if removed {
            self.dirty |= Dirty::GEOMETRY;
        }
        removed
    }

    /// Drops every width override.
    pub fn clear_column_widths(&mut self) {
        if !self.overrides.is_empty() {
            self.overrides.clear();
            self.dirty |= Dirty::GEOMETRY;
        }
    }

    /// Width overrides by column key.
    #[must_use]
    pub fn column_widths(&self) -> &WidthOverrides {
        &self.overrides
    }

    /// Records the size of the body scroll container.
    pub fn on_container_resize(&mut self, width: f64, height: f64) {
        let (width, height) = (width.max(0.0), height.max(0.0));
        if width != self.scroll.client_width {
            self.scroll.client_width = width;
            self.dirty |= Dirty::GEOMETRY;
        }
        if height != self.scroll.client_height {
            self.scroll.client_height = height;
            self.rows.set_viewport_height(height);
            self.dirty |= Dirty::CHROME;
        }
    }

    /// Records the measured header, footer, and scrollbar sizes.
    pub fn set_chrome_sizes(&mut self, sizes: ChromeSizes) {
        if sizes != self.sizes {
            self.sizes = sizes;
            self.dirty |= Dirty::CHROME;
        }
    }

    /// State waiting for [`Table::commit`].
    #[must_use]
    pub const fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Recomputes everything marked dirty.
    ///
    /// # Returns
    /// The events caused by the recomputation.
    pub fn commit(&mut self) -> TableEvents {
        let mut events = TableEvents::new();
        let mut dirty = core::mem::take(&mut self.dirty);
        if dirty.is_empty() {
            return events;
        }
        log::debug!("table commit: {dirty:?}");

        for target in self.released.drain(..) {
            events.push(TableEvent::Affix {
                target,
                change: AffixChange::Released,
            });
        }

        if dirty.contains(Dirty::CONFIG) {
            for warning in self.config.warnings() {
                log::warn!("{warning}");
            }
            dirty = Dirty::all();
        }

        if dirty.contains(Dirty::COLUMNS) {
            let header = HeaderLayout::new(&self.columns);
            if !header.same_leaves(&self.header) {
                let keys = header.leaves().iter().map(|l| l.key.clone()).collect();
                events.push(TableEvent::LeafColumnsChange(keys));
            }
            self.overrides.retain(|key, _| header.leaf_index(key.as_str()).is_some());
            self.resize.cancel();
            self.header = header;
            dirty |= Dirty::GEOMETRY;
        }

        if dirty.contains(Dirty::GEOMETRY) {
            self.geometry = resolve_geometry(
                self.header.leaves(),
                &self.overrides,
                self.scroll.client_width,
                self.config.layout,
            );
            self.scroll.scroll_width = self.geometry.table_width();
            dirty |= Dirty::FIXED | Dirty::SHADOW | Dirty::CHROME;
        }

        if dirty.contains(Dirty::FIXED) {
            self.fixed = FixedPositions::compute(&self.header, &self.geometry);
        }

        if dirty.contains(Dirty::SHADOW) {
            self.update_shadow(&mut events);
        }

        if dirty.contains(Dirty::ROWS) {
            if let Some(pagination) = &mut self.pagination {
                if let Some(change) = pagination.set_row_count(self.row_count) {
                    self.rows.reset_measurements();
                    events.push(TableEvent::PageChange(change));
                }
            }
            self.rows.set_row_count(self.data_range().len());
        }

        self.frame(&mut events);
        // The virtual flag feeds the chrome metrics.
        if dirty.intersects(Dirty::CHROME | Dirty::ROWS) {
            self.chrome = ChromeMetrics::compute(
                &self.sizes,
                self.flags(),
                self.affix(AffixTarget::Header).is_some(),
                self.scroll.client_width,
            );
        }
        events
    }

    /// Renders a frame: applies pending changes and the latest vertical scroll.
    ///
    /// # Returns
    /// The events caused, including a [`TableEvent::WindowChange`] if other
    /// rows now render.
    pub fn on_frame(&mut self) -> TableEvents {
        if !self.dirty.is_empty() {
            return self.commit();
        }
        let mut events = TableEvents::new();
        self.frame(&mut events);
        events
    }

    /// Handles a scroll event of the body container.
    pub fn on_body_scroll(&mut self, scroll_left: f64, scroll_top: f64) -> TableEvents {
        let mut events = TableEvents::new();
        let axes = self.tracker.on_body_scroll(scroll_left, scroll_top);
        self.scroll.scroll_left = scroll_left;
        self.scroll.scroll_top = scroll_top;

        if axes.contains(ScrollAxes::X) {
            if let Some(propagation) = self.sync.on_scroll(ScrollMirror::Body, scroll_left) {
                if !propagation.targets.is_empty() {
                    events.push(TableEvent::MirrorScroll(propagation));
                }
            }
            self.update_shadow(&mut events);
            events.push(TableEvent::ScrollX { scroll_left });
        }
        if axes.contains(ScrollAxes::Y) {
            self.rows.on_scroll(scroll_top);
            events.push(TableEvent::ScrollY { scroll_top });
        }
        events.push(TableEvent::Scroll {
            scroll_left,
            scroll_top,
        });
        events
    }

    /// Handles a horizontal scroll event of an affixed overlay or the affixed
    /// scrollbar.
    pub fn on_mirror_scroll(&mut self, mirror: ScrollMirror, scroll_left: f64) -> TableEvents {
        if mirror == ScrollMirror::Body {
            let scroll_top = self.scroll.scroll_top;
            return self.on_body_scroll(scroll_left, scroll_top);
        }
        let mut events = TableEvents::new();
        if let Some(propagation) = self.sync.on_scroll(mirror, scroll_left) {
            self.scroll.scroll_left = propagation.scroll_left;
            self.update_shadow(&mut events);
            events.push(TableEvent::MirrorScroll(propagation));
        }
        events
    }

    /// Scrolls every registered fragment horizontally.
    pub fn set_scroll_left(&mut self, scroll_left: f64) -> TableEvents {
        let mut events = TableEvents::new();
        let scroll_left = scroll_left.min(self.scroll.max_scroll_left());
        if let Some(propagation) = self.sync.set_scroll_left(scroll_left) {
            self.scroll.scroll_left = propagation.scroll_left;
            self.update_shadow(&mut events);
            events.push(TableEvent::MirrorScroll(propagation));
        }
        events
    }

    /// Computes the body `scroll_top` that brings `row` of the rendered slice
    /// into view. The host applies it; the resulting scroll event does the rest.
    pub fn scroll_to_row(&mut self, row: usize, align: ScrollAlign) -> f64 {
        self.rows.scroll_to_index(row, align)
    }

    /// Records the rendered height of `row` of the rendered slice.
    pub fn on_row_measured(&mut self, row: usize, height: f64) {
        self.rows.on_row_measured(row, height);
    }

    /// Re-evaluates affixed chrome after the page scrolled or resized.
    pub fn on_viewport_change(&mut self, viewport: Rect, placeholders: &AffixPlaceholders) -> TableEvents {
        let mut events = TableEvents::new();
        for slot in &mut self.affixes {
            let change = match placeholders.get(slot.target) {
                Some(placeholder) => slot.affix.update(placeholder, viewport, Some(placeholders.table)),
                None => slot.affix.release().then_some(AffixChange::Released),
            };
            let Some(change) = change else {
                continue;
            };
            if let Some(mirror) = slot.target.mirror() {
                match change {
                    AffixChange::Fixed(_) => {
                        if let Some(propagation) = self.sync.register(mirror) {
                            events.push(TableEvent::MirrorScroll(propagation));
                        }
                    }
                    AffixChange::Released => self.sync.unregister(mirror),
                    AffixChange::Moved(_) => {}
                }
            }
            events.push(TableEvent::Affix {
                target: slot.target,
                change,
            });
        }
        events
    }

    /// Affix state of `target`, or `None` if it is not configured.
    #[must_use]
    pub fn affix(&self, target: AffixTarget) -> Option<&Affix> {
        self.affixes
            .iter()
            .find(|s| s.target == target)
            .map(|s| &s.affix)
    }

    /// Moves to `page`.
    pub fn set_page(&mut self, page: usize) -> TableEvents {
        let change = self.pagination.as_mut().and_then(|p| p.set_current(page));
        self.on_page_change(change)
    }

    /// Changes the page size.
    pub fn set_page_size(&mut self, page_size: usize) -> TableEvents {
        let change = self.pagination.as_mut().and_then(|p| p.set_page_size(page_size));
        self.on_page_change(change)
    }

    /// Page state, if paginated.
    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Forwards pointer movement over the header cell of `key`.
    ///
    /// # Returns
    /// The leaf index a press would resize, if the pointer is on a column edge.
    pub fn on_header_hover(&mut self, key: &str, cell_rect: Rect, pointer: Point) -> Option<usize> {
        if !self.config.is_column_resizable() {
            return None;
        }
        let cell = self.header.cell(key)?;
        self.resize.on_hover(cell, cell_rect, pointer)
    }

    /// Forwards a pointer press in the header.
    ///
    /// # Returns
    /// `true` if a column resize started.
    pub fn on_header_down(&mut self, pointer: Point) -> bool {
        self.config.is_column_resizable() && self.resize.on_down(pointer, &self.header, &self.geometry)
    }

    /// Forwards pointer movement during a resize drag.
    ///
    /// # Returns
    /// The x-position of the resize guide line.
    pub fn on_header_move(&mut self, pointer: Point) -> Option<f64> {
        self.resize.on_move(pointer)
    }

    /// Forwards a pointer release. A finished resize stores the new width.
    pub fn on_header_up(&mut self, pointer: Point) -> TableEvents {
        let mut events = TableEvents::new();
        if let Some(commit) = self.resize.on_up(pointer) {
            log::debug!("column `{}` resized to {}", commit.key, commit.width);
            self.overrides.insert(commit.key.clone(), commit.width);
            self.dirty |= Dirty::GEOMETRY;
            events.push(TableEvent::ColumnResized {
                key: commit.key,
                width: commit.width,
            });
        }
        events
    }

    /// Abandons a resize drag.
    pub fn cancel_resize(&mut self) -> bool {
        self.resize.cancel()
    }

    /// Returns `true` while a column edge is being dragged.
    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        self.resize.is_dragging()
    }

    /// Body cell at `point`, in content coordinates of the rendered slice
    /// (origin at the top-left of the first column of the first row).
    pub fn cell_at(&mut self, point: Point) -> Option<CellPosition> {
        let column = self.geometry.column_at_x(point.x)?;
        let key = self.header.leaves().get(column)?.key.clone();
        let row = self.rows.row_at_offset(point.y)?;
        Some(CellPosition {
            row,
            data_index: self.data_range().start + row,
            column,
            key,
        })
    }

    /// Handles a click in the body.
    pub fn on_click(&mut self, point: Point) -> TableEvents {
        let mut events = TableEvents::new();
        if let Some(cell) = self.cell_at(point) {
            events.push(TableEvent::CellClick(cell));
        }
        events
    }

    /// Rows of the table data on the current page.
    #[must_use]
    pub fn data_range(&self) -> Range<usize> {
        self.pagination
            .as_ref()
            .map_or(0..self.row_count, Pagination::data_range)
    }

    /// Rows of the table data that render, after paging and virtualization.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let base = self.data_range().start;
        let window = self.rows.window();
        base + window.start..base + window.end
    }

    /// Row window of the rendered slice.
    #[must_use]
    pub const fn window(&self) -> VirtualWindow {
        self.rows.window()
    }

    /// Row controller.
    #[must_use]
    pub fn rows(&self) -> &VirtualRows {
        &self.rows
    }

    /// Returns `true` if only a window of rows renders.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.config.scroll.is_some() && self.rows.is_active()
    }

    /// Header rows and leaf columns.
    #[must_use]
    pub fn header(&self) -> &HeaderLayout {
        &self.header
    }

    /// Resolved column widths.
    #[must_use]
    pub fn geometry(&self) -> &ColumnGeometry {
        &self.geometry
    }

    /// Sticky offsets of pinned columns.
    #[must_use]
    pub fn fixed_positions(&self) -> &FixedPositions {
        &self.fixed
    }

    /// Fixed-column shadows.
    #[must_use]
    pub const fn shadow(&self) -> ColumnShadow {
        self.shadow
    }

    /// Body scroll container state.
    #[must_use]
    pub const fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Horizontal scroll synchronization state.
    #[must_use]
    pub const fn scroll_sync(&self) -> &ScrollSync {
        &self.sync
    }

    /// Overlay geometry of the affixed chrome.
    #[must_use]
    pub const fn chrome(&self) -> &ChromeMetrics {
        &self.chrome
    }

    /// Derived state flags.
    #[must_use]
    pub fn flags(&self) -> TableFlags {
        let mut flags = TableFlags::empty();
        flags.set(TableFlags::HEADER_FIXED, self.config.is_fixed_header());
        flags.set(TableFlags::COLUMN_FIXED, !self.fixed.is_empty());
        flags.set(TableFlags::WIDTH_OVERFLOW, self.geometry.is_overflowing());
        flags.set(TableFlags::MULTIPLE_HEADER, self.header.is_multiple_header());
        flags.set(TableFlags::LEFT_SHADOW, self.shadow.contains(ColumnShadow::LEFT));
        flags.set(TableFlags::RIGHT_SHADOW, self.shadow.contains(ColumnShadow::RIGHT));
        flags.set(TableFlags::RESIZABLE, self.config.is_column_resizable());
        flags.set(TableFlags::VIRTUAL, self.is_virtual());
        flags.set(TableFlags::BORDERED, self.config.bordered);
        flags.set(
            TableFlags::PAGINATED,
            self.pagination.as_ref().is_some_and(Pagination::is_local),
        );
        flags.set(TableFlags::HEADER_HIDDEN, !self.config.show_header);
        flags
    }

    fn frame(&mut self, events: &mut TableEvents) {
        if let Some(window) = self.rows.on_frame() {
            self.scroll.scroll_height = window.total_height;
            events.push(TableEvent::WindowChange(window));
        }
    }

    fn update_shadow(&mut self, events: &mut TableEvents) {
        let shadow = ColumnShadow::from_scroll(
            self.scroll.scroll_left,
            self.scroll.scroll_width,
            self.scroll.client_width,
            &self.fixed,
        );
        if shadow != self.shadow {
            self.shadow = shadow;
            events.push(TableEvent::ShadowChange(shadow));
        }
    }

    fn on_page_change(&mut self, change: Option<PageChange>) -> TableEvents {
        let mut events = TableEvents::new();
        if let Some(change) = change {
            self.rows.reset_measurements();
            self.dirty |= Dirty::ROWS;
            events.push(TableEvent::PageChange(change));
        }
        events
    }

    fn sync_affix_slots(&mut self) {
        let header = self.config.header_affixed_top.filter(|_| self.config.show_header);
        let wanted: [(AffixTarget, Option<AffixConfig>); 4] = [
            (AffixTarget::Header, header),
            (AffixTarget::Footer, self.config.footer_affixed_bottom),
            (
                AffixTarget::HorizontalScrollbar,
                self.config.horizontal_scroll_affixed_bottom,
            ),
            (AffixTarget::Pagination, self.config.pagination_affixed_bottom),
        ];
        for (target, config) in wanted {
            let existing = self.affixes.iter().position(|s| s.target == target);
            match (existing, config) {
                (Some(i), Some(config)) => self.affixes[i].affix.set_config(config),
                (Some(i), None) => {
                    if self.affixes.remove(i).affix.is_fixed() {
                        self.released.push(target);
                    }
                    if let Some(mirror) = target.mirror() {
                        self.sync.unregister(mirror);
                    }
                }
                (None, Some(config)) => self.affixes.push(AffixSlot {
                    target,
                    affix: Affix::new(config),
                }),
                (None, None) => {}
            }
        }
    }
}

/// Row settings for a configuration; without virtual scrolling every row renders.
fn row_config(config: &TableConfig) -> VirtualScrollConfig {
    config.scroll.unwrap_or(VirtualScrollConfig {
        threshold: usize::MAX,
        ..VirtualScrollConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use strata_affix::{AffixChange, AffixConfig};
    use strata_columns::{Column, ColumnShadow, FixedSide, TableLayout};
    use strata_scroll::ScrollMirror;
    use strata_virtual::VirtualScrollConfig;

    use super::{AffixPlaceholders, Table};
    use crate::{
        AffixTarget, ChromeSizes, PaginationConfig, TableConfig, TableError, TableEvent,
        TableEvents, TableFlags,
    };

    fn columns() -> [Column; 4] {
        [
            Column::new("id").width(60.0).fixed(FixedSide::Left),
            Column::new("name").width(200.0),
            Column::new("email").width(300.0),
            Column::new("op").width(80.0).fixed(FixedSide::Right),
        ]
    }

    fn table(config: TableConfig) -> Table {
        let mut table = Table::new(config, columns());
        table.on_container_resize(400.0, 300.0);
        table.set_row_count(50);
        table.commit();
        table
    }

    fn has(events: &TableEvents, pred: impl Fn(&TableEvent) -> bool) -> bool {
        events.iter().any(pred)
    }

    #[test]
    fn first_commit_reports_leaves_and_window() {
        let mut table = Table::new(TableConfig::default(), columns());
        table.on_container_resize(400.0, 300.0);
        table.set_row_count(5);
        let events = table.commit();
        assert!(has(&events, |e| matches!(
            e,
            TableEvent::LeafColumnsChange(keys) if keys.len() == 4
        )));
        assert!(has(&events, |e| matches!(e, TableEvent::WindowChange(w) if w.end == 5)));
        assert!(table.dirty().is_empty());
        assert!(table.commit().is_empty());
    }

    #[test]
    fn flags_follow_geometry_and_config() {
        let table = table(TableConfig {
            bordered: true,
            max_height: Some(300.0),
            ..TableConfig::default()
        });
        let flags = table.flags();
        assert!(flags.contains(
            TableFlags::HEADER_FIXED
                | TableFlags::COLUMN_FIXED
                | TableFlags::WIDTH_OVERFLOW
                | TableFlags::BORDERED
                | TableFlags::RIGHT_SHADOW
        ));
        assert!(!flags.intersects(TableFlags::VIRTUAL | TableFlags::MULTIPLE_HEADER));
        assert!(table.chrome().show_right_divider);
        assert_eq!(table.fixed_positions().get("op").and_then(|p| p.right()), Some(0.0));
    }

    #[test]
    fn horizontal_scroll_updates_shadows_not_rows() {
        let mut table = table(TableConfig::default());
        let events = table.on_body_scroll(50.0, 0.0);
        assert!(has(&events, |e| matches!(e, TableEvent::ScrollX { .. })));
        assert!(!has(&events, |e| matches!(e, TableEvent::ScrollY { .. })));
        assert_eq!(table.shadow(), ColumnShadow::LEFT | ColumnShadow::RIGHT);
        assert!(!table.rows().has_pending_scroll());

        // Scrolled to the right end: 640 - 400.
        table.on_body_scroll(240.0, 0.0);
        assert_eq!(table.shadow(), ColumnShadow::LEFT);
    }

    #[test]
    fn vertical_scroll_moves_the_window_on_the_next_frame() {
        let mut table = table(TableConfig {
            max_height: Some(300.0),
            scroll: Some(VirtualScrollConfig {
                row_height: Some(30.0),
                is_fixed_row_height: true,
                buffer_size: 2,
                threshold: 10,
            }),
            ..TableConfig::default()
        });
        assert!(table.is_virtual());
        assert_eq!((table.window().start, table.window().end), (0, 14));

        let events = table.on_body_scroll(0.0, 600.0);
        assert!(has(&events, |e| matches!(e, TableEvent::ScrollY { .. })));
        assert_eq!(table.window().start, 0);
        let events = table.on_frame();
        assert!(has(&events, |e| matches!(e, TableEvent::WindowChange(_))));
        assert_eq!((table.window().start, table.window().end), (18, 32));
        assert_eq!(table.scroll_state().scroll_height, 1500.0);
    }

    #[test]
    fn affixed_header_joins_scroll_sync() {
        let mut table = table(TableConfig {
            header_affixed_top: Some(AffixConfig::top(0.0)),
            ..TableConfig::default()
        });
        table.on_body_scroll(30.0, 0.0);

        let viewport = Rect::new(0.0, 0.0, 1024.0, 768.0);
        let placeholders = AffixPlaceholders {
            table: Rect::new(0.0, -100.0, 400.0, 600.0),
            header: Some(Rect::new(0.0, -100.0, 400.0, -60.0)),
            ..AffixPlaceholders::default()
        };
        let events = table.on_viewport_change(viewport, &placeholders);
        assert!(has(&events, |e| matches!(
            e,
            TableEvent::MirrorScroll(p) if p.scroll_left == 30.0
        )));
        assert!(has(&events, |e| matches!(
            e,
            TableEvent::Affix { target: AffixTarget::Header, change: AffixChange::Fixed(_) }
        )));
        assert!(table.scroll_sync().is_registered(ScrollMirror::AffixedHeader));

        // The overlay scrolls; the body follows and its echo is silent.
        let events = table.on_mirror_scroll(ScrollMirror::AffixedHeader, 90.0);
        let TableEvent::MirrorScroll(p) = &events[events.len() - 1] else {
            panic!("expected a propagation");
        };
        assert_eq!(p.targets.as_slice(), &[ScrollMirror::Body]);
        let events = table.on_body_scroll(90.0, 0.0);
        assert!(!has(&events, |e| matches!(e, TableEvent::MirrorScroll(_))));

        let events = table.on_viewport_change(viewport, &AffixPlaceholders::default());
        assert!(has(&events, |e| matches!(
            e,
            TableEvent::Affix { change: AffixChange::Released, .. }
        )));
        assert!(!table.scroll_sync().is_registered(ScrollMirror::AffixedHeader));
    }

    #[test]
    fn hidden_header_is_never_affixed() {
        let mut table = table(TableConfig {
            show_header: false,
            header_affixed_top: Some(AffixConfig::top(0.0)),
            ..TableConfig::default()
        });
        table.set_chrome_sizes(ChromeSizes {
            header_height: 40.0,
            ..ChromeSizes::default()
        });
        table.commit();
        assert!(table.flags().contains(TableFlags::HEADER_HIDDEN));
        assert!(!table.chrome().show_affixed_header);
        assert!(table.affix(AffixTarget::Header).is_none());

        let placeholders = AffixPlaceholders {
            table: Rect::new(0.0, -100.0, 400.0, 600.0),
            header: Some(Rect::new(0.0, -100.0, 400.0, -60.0)),
            ..AffixPlaceholders::default()
        };
        let events = table.on_viewport_change(Rect::new(0.0, 0.0, 1024.0, 768.0), &placeholders);
        assert!(events.is_empty());
        assert!(!table.scroll_sync().is_registered(ScrollMirror::AffixedHeader));
    }

    #[test]
    fn removing_a_fixed_affix_releases_it_on_commit() {
        let config = TableConfig {
            header_affixed_top: Some(AffixConfig::top(0.0)),
            ..TableConfig::default()
        };
        let mut table = table(config.clone());
        let placeholders = AffixPlaceholders {
            table: Rect::new(0.0, -100.0, 400.0, 600.0),
            header: Some(Rect::new(0.0, -100.0, 400.0, -60.0)),
            ..AffixPlaceholders::default()
        };
        table.on_viewport_change(Rect::new(0.0, 0.0, 1024.0, 768.0), &placeholders);
        assert!(table.affix(AffixTarget::Header).is_some_and(|a| a.is_fixed()));

        table.set_config(TableConfig {
            header_affixed_top: None,
            ..config
        });
        let events = table.commit();
        assert!(has(&events, |e| matches!(
            e,
            TableEvent::Affix { target: AffixTarget::Header, change: AffixChange::Released }
        )));
        assert!(!table.scroll_sync().is_registered(ScrollMirror::AffixedHeader));
        assert!(table.commit().is_empty());
    }

    #[test]
    fn removing_an_idle_affix_is_silent() {
        let config = TableConfig {
            footer_affixed_bottom: Some(AffixConfig::bottom(0.0)),
            ..TableConfig::default()
        };
        let mut table = table(config.clone());
        table.set_config(TableConfig {
            footer_affixed_bottom: None,
            ..config
        });
        let events = table.commit();
        assert!(!has(&events, |e| matches!(e, TableEvent::Affix { .. })));
    }

    #[test]
    fn resize_drag_commits_an_override() {
        let mut table = table(TableConfig {
            resizable: true,
            ..TableConfig::default()
        });
        let rect = Rect::new(60.0, 0.0, 260.0, 40.0);
        assert_eq!(table.on_header_hover("name", rect, Point::new(258.0, 20.0)), Some(1));
        assert!(table.on_header_down(Point::new(258.0, 20.0)));
        assert_eq!(table.on_header_move(Point::new(1000.0, 20.0)), Some(60.0 + 600.0));
        let events = table.on_header_up(Point::new(308.0, 20.0));
        assert!(has(&events, |e| matches!(
            e,
            TableEvent::ColumnResized { width, .. } if *width == 250.0
        )));
        table.commit();
        assert_eq!(table.geometry().width(1), Some(250.0));
    }

    #[test]
    fn resize_is_off_unless_configured() {
        let mut table = table(TableConfig::default());
        let rect = Rect::new(60.0, 0.0, 260.0, 40.0);
        assert_eq!(table.on_header_hover("name", rect, Point::new(258.0, 20.0)), None);
        assert!(!table.on_header_down(Point::new(258.0, 20.0)));
    }

    #[test]
    fn width_overrides_by_key() {
        let mut table = table(TableConfig {
            layout: TableLayout::Auto,
            ..TableConfig::default()
        });
        assert_eq!(
            table.set_column_width("nope", 10.0),
            Err(TableError::UnknownColumn("nope".into()))
        );
        assert!(matches!(
            table.set_column_width_str("name", "wide"),
            Err(TableError::InvalidWidth(_))
        ));
        table.set_column_width_str("name", "30%").unwrap();
        table.commit();
        assert_eq!(table.geometry().width(1), Some(120.0));
        assert!(table.clear_column_width("name"));
        assert!(!table.clear_column_width("name"));
    }

    #[test]
    fn removed_columns_drop_their_overrides() {
        let mut table = table(TableConfig::default());
        table.set_column_width("email", 120.0).unwrap();
        table.set_columns([Column::new("id"), Column::new("name")]);
        let events = table.commit();
        assert!(has(&events, |e| matches!(e, TableEvent::LeafColumnsChange(_))));
        assert!(table.column_widths().is_empty());
    }

    #[test]
    fn clicks_map_to_cells_of_the_current_page() {
        let mut table = table(TableConfig {
            pagination: Some(PaginationConfig::default()),
            scroll: Some(VirtualScrollConfig {
                row_height: Some(40.0),
                is_fixed_row_height: true,
                ..VirtualScrollConfig::default()
            }),
            max_height: Some(300.0),
            ..TableConfig::default()
        });
        assert!(table.flags().contains(TableFlags::PAGINATED));

        let events = table.set_page(3);
        assert!(has(&events, |e| matches!(e, TableEvent::PageChange(c) if c.current == 3)));
        assert!(table.set_page(3).is_empty());
        table.commit();
        assert_eq!(table.data_range(), 20..30);

        let events = table.on_click(Point::new(100.0, 85.0));
        let [TableEvent::CellClick(cell)] = events.as_slice() else {
            panic!("expected one click");
        };
        assert_eq!((cell.row, cell.data_index, cell.key.as_str()), (2, 22, "name"));
        assert!(table.cell_at(Point::new(100.0, 400.0)).is_none());
        assert!(table.cell_at(Point::new(700.0, 10.0)).is_none());
    }

    #[test]
    fn config_changes_keep_row_state_when_possible() {
        let mut table = table(TableConfig {
            pagination: Some(PaginationConfig::default()),
            ..TableConfig::default()
        });
        table.set_page(2);
        table.commit();

        let mut config = table.config().clone();
        config.bordered = true;
        table.set_config(config.clone());
        table.commit();
        assert_eq!(table.pagination().map(|p| p.current()), Some(2));

        config.pagination = Some(PaginationConfig {
            page_size: 25,
            ..PaginationConfig::default()
        });
        table.set_config(config);
        table.commit();
        assert_eq!(table.pagination().map(|p| p.current()), Some(1));
        assert_eq!(table.data_range(), 0..25);
    }
}
