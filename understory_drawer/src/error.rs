// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors reported by [`Drawer`](crate::Drawer) operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawerError {
    /// A step index was outside the configured step list.
    StepOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of configured steps.
        len: usize,
    },
}

impl fmt::Display for DrawerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepOutOfRange { index, len } => {
                write!(f, "step index {index} is out of range for {len} steps")
            }
        }
    }
}

impl core::error::Error for DrawerError {}
