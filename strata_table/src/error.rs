// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use strata_columns::{ColKey, ParseWidthError};

/// Errors from [`Table`](crate::Table) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No leaf column has this key.
    #[error("no leaf column with key `{0}`")]
    UnknownColumn(ColKey),
    /// A width string did not parse.
    #[error(transparent)]
    InvalidWidth(#[from] ParseWidthError),
}
