// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky offsets for pinned columns and the scroll shadows they cast.

use hashbrown::HashMap;

use crate::column::{ColKey, FixedSide};
use crate::geometry::ColumnGeometry;
use crate::header::HeaderLayout;

/// Where a pinned column or header group sits while the body scrolls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPosition {
    /// Side the column is pinned to.
    pub side: FixedSide,
    /// Distance from the pinned edge of the table to the near edge of the column.
    pub offset: f64,
    /// Width covered by the column or group.
    pub width: f64,
    /// The innermost left-pinned leaf (or a group containing it). Its trailing
    /// edge carries the left shadow.
    pub is_last_left: bool,
    /// The innermost right-pinned leaf (or a group containing it). Its leading
    /// edge carries the right shadow.
    pub is_first_right: bool,
}

impl FixedPosition {
    /// CSS-style `left` offset, for left-pinned columns.
    #[must_use]
    pub fn left(&self) -> Option<f64> {
        (self.side == FixedSide::Left).then_some(self.offset)
    }

    /// CSS-style `right` offset, for right-pinned columns.
    #[must_use]
    pub fn right(&self) -> Option<f64> {
        (self.side == FixedSide::Right).then_some(self.offset)
    }
}

/// Sticky positions of every pinned leaf column and header group, by key.
///
/// These are cumulative sums over widths, so they have to be recomputed after
/// every width change.
///
/// ```rust
/// use strata_columns::{
///     Column, FixedPositions, FixedSide, HeaderLayout, TableLayout, WidthOverrides,
///     resolve_geometry,
/// };
///
/// let header = HeaderLayout::new(&[
///     Column::new("a").width(40.0).fixed(FixedSide::Left),
///     Column::new("b").width(60.0).fixed(FixedSide::Left),
///     Column::new("c").width(300.0),
///     Column::new("d").width(80.0).fixed(FixedSide::Right),
/// ]);
/// let geometry = resolve_geometry(header.leaves(), &WidthOverrides::new(), 300.0, TableLayout::Fixed);
/// let fixed = FixedPositions::compute(&header, &geometry);
///
/// assert_eq!(fixed.get("b").unwrap().left(), Some(40.0));
/// assert_eq!(fixed.get("d").unwrap().right(), Some(0.0));
/// assert!(fixed.get("c").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedPositions {
    positions: HashMap<ColKey, FixedPosition>,
    has_left: bool,
    has_right: bool,
}

impl FixedPositions {
    /// Computes sticky positions from the header layout and resolved widths.
    ///
    /// A left-pinned leaf is offset by the widths of all left-pinned leaves
    /// before it; right-pinned leaves accumulate symmetrically from the right.
    /// A header group gets a position when all of its leaves are pinned to the
    /// same side.
    #[must_use]
    pub fn compute(header: &HeaderLayout, geometry: &ColumnGeometry) -> Self {
        let leaves = header.leaves();
        let mut positions = HashMap::new();
        let width_of = |i: usize| geometry.width(i).unwrap_or(0.0);

        let mut left_offsets = alloc::vec![None; leaves.len()];
        let mut acc = 0.0;
        let mut last_left = None;
        for (i, leaf) in leaves.iter().enumerate() {
            if leaf.fixed == Some(FixedSide::Left) {
                left_offsets[i] = Some(acc);
                acc += width_of(i);
                last_left = Some(i);
            }
        }

        let mut right_offsets = alloc::vec![None; leaves.len()];
        let mut acc = 0.0;
        let mut first_right = None;
        for (i, leaf) in leaves.iter().enumerate().rev() {
            if leaf.fixed == Some(FixedSide::Right) {
                right_offsets[i] = Some(acc);
                acc += width_of(i);
                first_right = Some(i);
            }
        }

        for (i, leaf) in leaves.iter().enumerate() {
            let (side, offset) = match (left_offsets[i], right_offsets[i]) {
                (Some(offset), _) => (FixedSide::Left, offset),
                (_, Some(offset)) => (FixedSide::Right, offset),
                _ => continue,
            };
            positions.insert(
                leaf.key.clone(),
                FixedPosition {
                    side,
                    offset,
                    width: width_of(i),
                    is_last_left: last_left == Some(i),
                    is_first_right: first_right == Some(i),
                },
            );
        }

        for cell in header.cells().filter(|c| !c.is_leaf) {
            let Some(side) = cell.fixed else { continue };
            let range = cell.leaf_range();
            if range.is_empty() || !range.clone().all(|i| leaves[i].fixed == Some(side)) {
                continue;
            }
            let offset = match side {
                FixedSide::Left => left_offsets[range.start],
                FixedSide::Right => right_offsets[range.end - 1],
            };
            let Some(offset) = offset else { continue };
            positions.insert(
                cell.key.clone(),
                FixedPosition {
                    side,
                    offset,
                    width: range.clone().map(width_of).sum(),
                    is_last_left: last_left.is_some_and(|l| range.contains(&l)),
                    is_first_right: first_right.is_some_and(|r| range.contains(&r)),
                },
            );
        }

        Self {
            positions,
            has_left: last_left.is_some(),
            has_right: first_right.is_some(),
        }
    }

    /// Position of the pinned column or group `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FixedPosition> {
        self.positions.get(key)
    }

    /// Returns `true` if no column is pinned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of pinned columns and groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if some column is pinned left.
    #[must_use]
    pub const fn has_left(&self) -> bool {
        self.has_left
    }

    /// Returns `true` if some column is pinned right.
    #[must_use]
    pub const fn has_right(&self) -> bool {
        self.has_right
    }

    /// Iterates over all positions.
    pub fn iter(&self) -> impl Iterator<Item = (&ColKey, &FixedPosition)> {
        self.positions.iter()
    }
}

bitflags::bitflags! {
    /// Which edges of the body currently show a shadow next to pinned columns.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ColumnShadow: u8 {
        /// Content is scrolled under the left-pinned columns.
        const LEFT  = 0b0000_0001;
        /// Content continues under the right-pinned columns.
        const RIGHT = 0b0000_0010;
    }
}

impl ColumnShadow {
    /// Shadow state for a horizontal scroll position.
    ///
    /// The left shadow shows once scrolled right of `0`; the right shadow shows
    /// until the scroll reaches `scroll_width - client_width`. Each only shows
    /// when there are columns pinned to that side.
    #[must_use]
    pub fn from_scroll(
        scroll_left: f64,
        scroll_width: f64,
        client_width: f64,
        fixed: &FixedPositions,
    ) -> Self {
        let mut shadow = Self::empty();
        if fixed.has_left() && scroll_left > 0.0 {
            shadow |= Self::LEFT;
        }
        if fixed.has_right() && scroll_left < scroll_width - client_width {
            shadow |= Self::RIGHT;
        }
        shadow
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::{ColumnShadow, FixedPositions};
    use crate::{Column, FixedSide, HeaderLayout, TableLayout, WidthOverrides, resolve_geometry};

    fn compute(columns: &[Column], container: f64) -> FixedPositions {
        let header = HeaderLayout::new(columns);
        let geometry = resolve_geometry(header.leaves(), &WidthOverrides::new(), container, TableLayout::Fixed);
        FixedPositions::compute(&header, &geometry)
    }

    #[test]
    fn right_offsets_accumulate_from_the_right() {
        let fixed = compute(
            &[
                Column::new("a").width(100.0),
                Column::new("b").width(30.0).fixed(FixedSide::Right),
                Column::new("c").width(50.0).fixed(FixedSide::Right),
            ],
            120.0,
        );
        let b = fixed.get("b").unwrap();
        let c = fixed.get("c").unwrap();
        assert_eq!(c.right(), Some(0.0));
        assert_eq!(b.right(), Some(50.0));
        assert!(b.is_first_right);
        assert!(!c.is_first_right);
        assert!(fixed.has_right() && !fixed.has_left());
    }

    #[test]
    fn groups_take_their_outermost_leaf_offset() {
        let fixed = compute(
            &[
                Column::new("sel").width(20.0).fixed(FixedSide::Left),
                Column::new("who")
                    .fixed(FixedSide::Left)
                    .children([Column::new("first").width(60.0), Column::new("last").width(70.0)]),
                Column::new("rest").width(400.0),
            ],
            300.0,
        );
        let who = fixed.get("who").unwrap();
        assert_eq!(who.left(), Some(20.0));
        assert_eq!(who.width, 130.0);
        assert!(who.is_last_left);
        assert_eq!(fixed.get("last").unwrap().left(), Some(80.0));
        assert!(!fixed.get("first").unwrap().is_last_left);
    }

    #[test]
    fn mixed_group_has_no_position() {
        let fixed = compute(
            &[Column::new("g").children([
                Column::new("x").width(10.0).fixed(FixedSide::Left),
                Column::new("y").width(10.0),
            ])],
            100.0,
        );
        assert!(fixed.get("g").is_none());
        assert_eq!(fixed.len(), 1);
    }

    #[test]
    fn shadows_follow_scroll_position() {
        let fixed = compute(
            &[
                Column::new("a").width(50.0).fixed(FixedSide::Left),
                Column::new("b").width(500.0),
                Column::new("c").width(50.0).fixed(FixedSide::Right),
            ],
            300.0,
        );
        assert_eq!(ColumnShadow::from_scroll(0.0, 600.0, 300.0, &fixed), ColumnShadow::RIGHT);
        assert_eq!(ColumnShadow::from_scroll(10.0, 600.0, 300.0, &fixed), ColumnShadow::all());
        assert_eq!(ColumnShadow::from_scroll(300.0, 600.0, 300.0, &fixed), ColumnShadow::LEFT);

        let unpinned = compute(&[Column::new("a").width(900.0)], 300.0);
        assert!(ColumnShadow::from_scroll(10.0, 900.0, 300.0, &unpinned).is_empty());
    }

    fn column_set() -> impl Strategy<Value = Vec<(f64, Option<FixedSide>)>> {
        prop::collection::vec(
            (
                1.0_f64..400.0,
                prop_oneof![Just(None), Just(Some(FixedSide::Left)), Just(Some(FixedSide::Right))],
            ),
            0..12,
        )
    }

    fn build(shape: &[(f64, Option<FixedSide>)]) -> Vec<Column> {
        shape
            .iter()
            .enumerate()
            .map(|(i, &(w, fixed))| Column {
                fixed,
                ..Column::new(alloc::format!("c{i}")).width(w)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn unpinned_columns_produce_no_positions(widths in prop::collection::vec(1.0_f64..400.0, 0..12)) {
            let shape: Vec<_> = widths.into_iter().map(|w| (w, None)).collect();
            let fixed = compute(&build(&shape), 500.0);
            prop_assert!(fixed.is_empty());
        }

        #[test]
        fn left_offsets_are_prefix_sums(shape in column_set(), container in 0.0_f64..2000.0) {
            let fixed = compute(&build(&shape), container);
            let mut expected = 0.0;
            let mut previous: Option<f64> = None;
            for (i, &(w, side)) in shape.iter().enumerate() {
                if side != Some(FixedSide::Left) {
                    continue;
                }
                let key = alloc::format!("c{i}");
                let offset = fixed.get(&key).and_then(|p| p.left());
                prop_assert_eq!(offset, Some(expected));
                if let Some(prev) = previous {
                    prop_assert!(expected > prev);
                }
                previous = Some(expected);
                expected += w;
            }
        }
    }
}
