// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion of a column tree into header rows and an ordered leaf sequence.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;

use crate::column::{ColKey, Column, ColumnWidth, FixedSide, ResizeLimits};

/// A rendered body column, in left-to-right order.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafColumn {
    /// Key of the column.
    pub key: ColKey,
    /// Preferred width.
    pub width: Option<ColumnWidth>,
    /// Lower bound applied after width resolution.
    pub min_width: Option<ColumnWidth>,
    /// Pinned side, inherited from the nearest pinned ancestor when unset.
    pub fixed: Option<FixedSide>,
    /// Drag limits for column resizing.
    pub resize: ResizeLimits,
}

/// A visible header cell placed on the header grid.
///
/// Columns are leaf slots `0..leaves.len()`, rows are header levels.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderCell {
    /// Key of the column this cell renders.
    pub key: ColKey,
    /// Header row of the cell's top edge.
    pub row: usize,
    /// First leaf slot covered by the cell.
    pub col_start: usize,
    /// Number of header rows covered.
    pub rowspan: usize,
    /// Number of leaf slots covered.
    pub colspan: usize,
    /// `true` if the cell renders a leaf column.
    pub is_leaf: bool,
    /// Pinned side of the cell.
    pub fixed: Option<FixedSide>,
    /// `true` if the cell is first in its row only because a cell of an
    /// earlier row spans down beside it, so it has to draw its own leading
    /// border.
    pub leading_border: bool,
}

impl HeaderCell {
    /// Range of leaf slots covered by this cell.
    #[must_use]
    pub fn leaf_range(&self) -> Range<usize> {
        self.col_start..self.col_start + self.colspan
    }
}

#[derive(Debug)]
struct Pending {
    key: ColKey,
    parent: Option<usize>,
    first_leaf: usize,
    leaf_count: usize,
    explicit_colspan: usize,
    rowspan: usize,
    is_leaf: bool,
    fixed: Option<FixedSide>,
}

/// Header rows and leaf columns derived from a column tree.
///
/// ```rust
/// use strata_columns::{Column, HeaderLayout};
///
/// let columns = [
///     Column::new("name"),
///     Column::new("address").children([Column::new("city"), Column::new("zip")]),
/// ];
/// let header = HeaderLayout::new(&columns);
///
/// assert!(header.is_multiple_header());
/// assert_eq!(header.rows()[0][0].rowspan, 2);
/// let keys: Vec<_> = header.leaves().iter().map(|l| l.key.as_str()).collect();
/// assert_eq!(keys, ["name", "city", "zip"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct HeaderLayout {
    rows: Vec<Vec<HeaderCell>>,
    leaves: Vec<LeafColumn>,
    leaf_index: HashMap<ColKey, usize>,
    merged: Vec<ColKey>,
}

impl HeaderLayout {
    /// Expands `columns` into header rows and leaf columns.
    ///
    /// An explicit [`Column::colspan`] that runs past the sibling leaves that
    /// follow it is clamped, and a warning is logged.
    #[must_use]
    pub fn new(columns: &[Column]) -> Self {
        let depth = tree_depth(columns);
        let mut pending: Vec<Vec<Pending>> = (0..depth).map(|_| Vec::new()).collect();
        let mut leaves = Vec::new();
        let mut next_id = 0;
        for col in columns {
            visit(col, 0, None, None, depth, &mut pending, &mut leaves, &mut next_id);
        }

        let mut merged = Vec::new();
        let width = leaves.len();
        let mut occupied = alloc::vec![false; depth * width];
        let mut rows = Vec::with_capacity(depth);

        for (row_index, row) in pending.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            let mut cursor = 0;
            let mut i = 0;
            while i < row.len() {
                let cell = &row[i];
                let mut colspan = cell.leaf_count;
                let mut swallowed = 0;
                if cell.is_leaf && cell.explicit_colspan > 1 {
                    let wanted = cell.explicit_colspan - 1;
                    while swallowed < wanted {
                        match row.get(i + 1 + swallowed) {
                            Some(next) if next.is_leaf && next.parent == cell.parent => {
                                merged.push(next.key.clone());
                                swallowed += 1;
                            }
                            _ => break,
                        }
                    }
                    if swallowed < wanted {
                        log::warn!(
                            "column `{}` has colspan {} but only {} sibling column(s) follow it; clamped to {}",
                            cell.key,
                            cell.explicit_colspan,
                            swallowed,
                            swallowed + 1
                        );
                    }
                    colspan += swallowed;
                }

                while cursor < width && occupied[row_index * width + cursor] {
                    cursor += 1;
                }
                debug_assert_eq!(
                    cursor, cell.first_leaf,
                    "header cell `{}` placed away from its leaves",
                    cell.key
                );
                let row_end = (row_index + cell.rowspan).min(depth);
                let col_end = (cursor + colspan).min(width);
                for r in row_index..row_end {
                    for slot in &mut occupied[r * width + cursor..r * width + col_end] {
                        *slot = true;
                    }
                }

                cells.push(HeaderCell {
                    key: cell.key.clone(),
                    row: row_index,
                    col_start: cursor,
                    rowspan: cell.rowspan,
                    colspan,
                    is_leaf: cell.is_leaf,
                    fixed: cell.fixed,
                    leading_border: false,
                });
                cursor = col_end;
                i += 1 + swallowed;
            }
            rows.push(cells);
        }

        for r in 0..rows.len() {
            let span = match rows[r].first() {
                Some(first) if first.rowspan > 1 => first.rowspan,
                _ => continue,
            };
            for below in rows.iter_mut().take(r + span).skip(r + 1) {
                if let Some(cell) = below.first_mut() {
                    cell.leading_border = true;
                }
            }
        }

        let mut leaf_index = HashMap::with_capacity(leaves.len());
        for (i, leaf) in leaves.iter().enumerate() {
            if leaf_index.insert(leaf.key.clone(), i).is_some() {
                log::warn!("duplicate column key `{}`; lookups resolve to the last one", leaf.key);
            }
        }

        Self {
            rows,
            leaves,
            leaf_index,
            merged,
        }
    }

    /// Header rows, top to bottom. Merged cells are omitted.
    #[must_use]
    pub fn rows(&self) -> &[Vec<HeaderCell>] {
        &self.rows
    }

    /// Number of header rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the header has more than one row.
    #[must_use]
    pub fn is_multiple_header(&self) -> bool {
        self.rows.len() > 1
    }

    /// Leaf columns in left-to-right order.
    #[must_use]
    pub fn leaves(&self) -> &[LeafColumn] {
        &self.leaves
    }

    /// Returns `true` if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Position of the leaf column with `key`.
    #[must_use]
    pub fn leaf_index(&self, key: &str) -> Option<usize> {
        self.leaf_index.get(key).copied()
    }

    /// Leaf column with `key`.
    #[must_use]
    pub fn leaf(&self, key: &str) -> Option<&LeafColumn> {
        self.leaf_index(key).map(|i| &self.leaves[i])
    }

    /// Iterates over all visible header cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &HeaderCell> {
        self.rows.iter().flatten()
    }

    /// Visible header cell rendering `key`, if any.
    #[must_use]
    pub fn cell(&self, key: &str) -> Option<&HeaderCell> {
        self.cells().find(|c| c.key.as_str() == key)
    }

    /// Returns `true` if the header cell of `key` is hidden under a merged
    /// sibling.
    #[must_use]
    pub fn is_merged(&self, key: &str) -> bool {
        self.merged.iter().any(|k| k.as_str() == key)
    }

    /// Returns `true` if both layouts have the same leaf keys in the same order.
    #[must_use]
    pub fn same_leaves(&self, other: &Self) -> bool {
        self.leaves.len() == other.leaves.len()
            && self
                .leaves
                .iter()
                .zip(&other.leaves)
                .all(|(a, b)| a.key == b.key)
    }
}

fn tree_depth(columns: &[Column]) -> usize {
    columns
        .iter()
        .map(|c| 1 + tree_depth(&c.children))
        .max()
        .unwrap_or(0)
}

fn visit(
    col: &Column,
    level: usize,
    parent: Option<usize>,
    inherited: Option<FixedSide>,
    depth: usize,
    pending: &mut [Vec<Pending>],
    leaves: &mut Vec<LeafColumn>,
    next_id: &mut usize,
) -> usize {
    let id = *next_id;
    *next_id += 1;
    let fixed = col.fixed.or(inherited);
    let first_leaf = leaves.len();
    let slot = pending[level].len();
    pending[level].push(Pending {
        key: col.key.clone(),
        parent,
        first_leaf,
        leaf_count: 1,
        explicit_colspan: col.explicit_colspan(),
        rowspan: if col.is_leaf() { depth - level } else { 1 },
        is_leaf: col.is_leaf(),
        fixed,
    });

    if col.is_leaf() {
        leaves.push(LeafColumn {
            key: col.key.clone(),
            width: col.width,
            min_width: col.min_width,
            fixed,
            resize: col.resize.unwrap_or_default(),
        });
        return 1;
    }

    let mut count = 0;
    for child in &col.children {
        count += visit(child, level + 1, Some(id), fixed, depth, pending, leaves, next_id);
    }
    pending[level][slot].leaf_count = count;
    count
}
