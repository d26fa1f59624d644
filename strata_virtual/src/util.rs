// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rounds a non-negative value down to an index. Negative and NaN map to `0`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "float-to-int `as` saturates, and the result is clamped by callers"
)]
#[inline]
pub(crate) fn floor_to_usize(value: f64) -> usize {
    if value > 0.0 { value as usize } else { 0 }
}

/// Rounds a non-negative value up to a count. Negative and NaN map to `0`.
#[allow(
    clippy::cast_precision_loss,
    reason = "only used to detect a fractional remainder"
)]
#[inline]
pub(crate) fn ceil_to_usize(value: f64) -> usize {
    let floor = floor_to_usize(value);
    if (floor as f64) < value {
        floor.saturating_add(1)
    } else {
        floor
    }
}
