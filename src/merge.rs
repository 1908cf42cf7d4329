//! Interval accumulation and sweep merging.
//!
//! Lines are accumulated into an ordered map keyed by the interval start;
//! inserting an equal start overwrites (last-one-wins), which is the
//! deterministic, order-dependent duplicate tie-break the downstream
//! consumer expects. The merge is a single left-to-right sweep that
//! coalesces overlapping *and touching* intervals (`next_from <= cur_to + 1`)
//! and demotes width-one intervals into the singleton collection.

use std::collections::BTreeMap;

/// An inclusive `[from, to]` interval over a numeric domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair<T> {
    pub from: T,
    pub to: T,
}

impl<T> Pair<T> {
    pub const fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

/// Scalar domain that can be swept for adjacency.
pub trait MergeScalar: Copy + Ord {
    /// The next value up, `None` at the domain maximum.
    fn successor(self) -> Option<Self>;
}

macro_rules! impl_merge_scalar {
    ($($ty:ty),*) => {
        $(impl MergeScalar for $ty {
            fn successor(self) -> Option<Self> {
                self.checked_add(1)
            }
        })*
    };
}

impl_merge_scalar!(u8, u16, u32);

/// Working collection of `[from, to]` intervals for one numeric domain.
///
/// Backed by a `BTreeMap` so iteration is ascending by `from` and duplicate
/// starts resolve to the last inserted value.
#[derive(Debug, Clone, Default)]
pub struct RangeAccumulator<T> {
    map: BTreeMap<T, T>,
}

impl<T: MergeScalar> RangeAccumulator<T> {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Inserts an interval; an equal `from` overwrites the previous `to`.
    pub fn insert(&mut self, from: T, to: T) {
        debug_assert!(from <= to);
        self.map.insert(from, to);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Sweeps the accumulated intervals into a minimal canonical form.
    ///
    /// Returns `(singles, pairs)`: pairs are disjoint, non-adjacent and
    /// sorted ascending by `from`; singles are the width-one leftovers, in
    /// ascending order.
    pub fn merge(&mut self) -> (Vec<T>, Vec<Pair<T>>) {
        let mut singles = Vec::new();
        let mut pairs = Vec::new();

        let map = std::mem::take(&mut self.map);
        let mut iter = map.into_iter();
        let Some((mut cur_from, mut cur_to)) = iter.next() else {
            return (singles, pairs);
        };

        let flush = |from: T, to: T, singles: &mut Vec<T>, pairs: &mut Vec<Pair<T>>| {
            if from == to {
                singles.push(from);
            } else {
                pairs.push(Pair::new(from, to));
            }
        };

        for (from, to) in iter {
            // Touching counts as mergeable: 10.0.0.0-10.0.0.255 followed by
            // 10.0.1.0-… is one contiguous block.
            let mergeable = match cur_to.successor() {
                Some(next) => from <= next,
                None => true,
            };
            if mergeable {
                cur_to = cur_to.max(to);
            } else {
                flush(cur_from, cur_to, &mut singles, &mut pairs);
                cur_from = from;
                cur_to = to;
            }
        }
        flush(cur_from, cur_to, &mut singles, &mut pairs);

        (singles, pairs)
    }
}
