//! Outcome aggregation: frequency tables and paired boolean tables.
//!
//! A run records every trial outcome into a [`Tally`]. Single-category
//! generators (birthday, dice) feed a [`FrequencyTable`]; generators that
//! return a two-field record (Monty Hall, diagnostic test) feed a
//! [`PairedTable`], which keeps one boolean table per field.
//!
//! Tallies from different workers merge by summing counts, so the final table
//! does not depend on execution order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::SimError;
use crate::estimate::to_fraction;

/// Accumulator for trial outcomes of type `O`.
pub trait Tally<O>: Default + Send {
    /// Records one trial outcome.
    fn record(&mut self, outcome: O);

    /// Folds another partial tally into this one.
    fn merge(&mut self, other: Self);

    /// Number of trials recorded.
    fn total(&self) -> u64;
}

// ============================================================================
// Frequency Table
// ============================================================================

/// Mapping from outcome category to occurrence count.
///
/// Only observed categories are stored; [`FrequencyTable::count`] reports 0
/// for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, u64>,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> FrequencyTable<K> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `category`.
    pub fn increment(&mut self, category: K) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    /// Count for `category`, 0 when never observed.
    pub fn count(&self, category: &K) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct categories observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates categories in ascending order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    /// Category with the highest count; ties go to the smallest category.
    pub fn mode(&self) -> Option<K> {
        self.counts
            .iter()
            .fold(None, |best: Option<(K, u64)>, (k, v)| match best {
                Some((_, best_count)) if best_count >= *v => best,
                _ => Some((*k, *v)),
            })
            .map(|(k, _)| k)
    }

    /// Fraction of trials that produced `category`.
    pub fn fraction(&self, category: &K) -> Result<f64, SimError> {
        to_fraction(self.count(category), self.total())
    }

    /// Adds every count of `other` into this table.
    pub fn absorb(&mut self, other: Self) {
        for (category, count) in other.counts {
            *self.counts.entry(category).or_insert(0) += count;
        }
    }
}

impl<K: Ord + Copy + Send> Tally<K> for FrequencyTable<K> {
    #[inline]
    fn record(&mut self, outcome: K) {
        self.increment(outcome);
    }

    fn merge(&mut self, other: Self) {
        self.absorb(other);
    }

    fn total(&self) -> u64 {
        FrequencyTable::total(self)
    }
}

impl<K: Ord + Copy> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for category in iter {
            table.increment(category);
        }
        table
    }
}

// ============================================================================
// Paired Table
// ============================================================================

/// Outcome record with two boolean fields, each tallied separately.
pub trait PairedOutcome {
    /// Returns `(first, second)` in the order the paired table stores them.
    fn pair(&self) -> (bool, bool);
}

/// Two boolean frequency tables fed by the same trials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairedTable {
    first: FrequencyTable<bool>,
    second: FrequencyTable<bool>,
}

impl PairedTable {
    /// Creates an empty paired table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one trial's pair of predicates.
    pub fn record_pair(&mut self, first: bool, second: bool) {
        self.first.increment(first);
        self.second.increment(second);
    }

    /// Table for the first field.
    pub fn first(&self) -> &FrequencyTable<bool> {
        &self.first
    }

    /// Table for the second field.
    pub fn second(&self) -> &FrequencyTable<bool> {
        &self.second
    }

    /// Trials where the first field was true.
    pub fn first_hits(&self) -> u64 {
        self.first.count(&true)
    }

    /// Trials where the second field was true.
    pub fn second_hits(&self) -> u64 {
        self.second.count(&true)
    }

    /// Number of trials recorded.
    pub fn total(&self) -> u64 {
        self.first.total()
    }
}

impl<O: PairedOutcome> Tally<O> for PairedTable {
    #[inline]
    fn record(&mut self, outcome: O) {
        let (first, second) = outcome.pair();
        self.record_pair(first, second);
    }

    fn merge(&mut self, other: Self) {
        self.first.absorb(other.first);
        self.second.absorb(other.second);
    }

    fn total(&self) -> u64 {
        PairedTable::total(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
