// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning processed oranges into bottles

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Bottles filled from a count of processed oranges, plus the leftovers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottling {
    pub bottles: u64,
    pub waste: u64,
}

impl Bottling {
    /// Split `processed` oranges into full bottles of `per_bottle`.
    ///
    /// A batch size of zero fills no bottles and wastes everything.
    pub fn from_processed(processed: u64, per_bottle: u64) -> Self {
        match per_bottle {
            0 => Self {
                bottles: 0,
                waste: processed,
            },
            n => Self {
                bottles: processed / n,
                waste: processed % n,
            },
        }
    }
}

impl Add for Bottling {
    type Output = Bottling;

    fn add(self, rhs: Bottling) -> Bottling {
        Bottling {
            bottles: self.bottles + rhs.bottles,
            waste: self.waste + rhs.waste,
        }
    }
}
