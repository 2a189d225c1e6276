// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Item ID generation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier of an item moving through a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generates item identifiers
pub trait IdGen: Clone + Send + Sync + 'static {
    fn next(&self) -> ItemId;
}

/// Sequential ID generator.
///
/// Clones share one atomic counter, so every plant handed a clone draws
/// from the same sequence and never sees a duplicate.
#[derive(Clone)]
pub struct SequentialIdGen {
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(first)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> ItemId {
        ItemId(self.counter.fetch_add(1, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_gen_creates_predictable_ids() {
        let id_gen = SequentialIdGen::new();
        assert_eq!(id_gen.next(), ItemId(1));
        assert_eq!(id_gen.next(), ItemId(2));
        assert_eq!(id_gen.next(), ItemId(3));
    }

    #[test]
    fn sequential_gen_is_cloneable_and_shared() {
        let id_gen1 = SequentialIdGen::starting_at(10);
        let id_gen2 = id_gen1.clone();
        assert_eq!(id_gen1.next(), ItemId(10));
        assert_eq!(id_gen2.next(), ItemId(11));
        assert_eq!(id_gen1.next(), ItemId(12));
    }

    #[test]
    fn concurrent_generation_never_repeats() {
        let id_gen = SequentialIdGen::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let id_gen = id_gen.clone();
                std::thread::spawn(move || (0..500).map(|_| id_gen.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn item_id_display() {
        assert_eq!(ItemId(42).to_string(), "#42");
    }
}
