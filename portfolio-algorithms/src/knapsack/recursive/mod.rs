//! Exhaustive include/exclude search.
//!
//! Every call branches twice and nothing is cached, so the same
//! `(count, capacity)` subproblem is solved over and over: O(2^n) calls in
//! the worst case. This is deliberate; it is the baseline the memoized
//! solver is measured against. Instances above `max_items` items are refused
//! by [`solve_challenge`]; [`solve_recursive`] has no such guard and callers
//! are expected to keep `n` small.
mod params;
pub use params::Params;

use super::Outcome;
use anyhow::{anyhow, Result};
use portfolio_challenges::knapsack::{validate_instance, Challenge, Item};
use serde_json::{Map, Value};

pub fn solve_challenge(
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Outcome> {
    let params = Params::initialize(hyperparameters);
    if challenge.num_items() > params.max_items {
        log::warn!(
            "refusing exhaustive search over {} items (max_items = {})",
            challenge.num_items(),
            params.max_items
        );
        return Err(anyhow!(
            "Instance has {} items, recursive solver is limited to {} (set max_items to raise it)",
            challenge.num_items(),
            params.max_items
        ));
    }
    let mut recursion = Recursion::new(challenge.items());
    let value = recursion.solve(challenge.capacity());
    Ok(Outcome {
        value,
        solution: None,
    })
}

pub fn solve_recursive(items: &[Item], capacity: u32) -> Result<u32> {
    validate_instance(items, capacity)?;
    Ok(Recursion::new(items).solve(capacity))
}

/// Items must pass `validate_instance`.
pub struct Recursion<'a> {
    items: &'a [Item],
    calls: u64,
}

impl<'a> Recursion<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        Self { items, calls: 0 }
    }

    pub fn solve(&mut self, capacity: u32) -> u32 {
        let value = self.value(self.items.len(), capacity);
        log::debug!(
            "recursive search over {} items made {} calls",
            self.items.len(),
            self.calls
        );
        value
    }

    /// Number of `value` evaluations so far, across all `solve` calls.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Best value reachable with the first `count` items and `capacity`.
    fn value(&mut self, count: usize, capacity: u32) -> u32 {
        self.calls += 1;
        if count == 0 || capacity == 0 {
            return 0;
        }
        let items = self.items;
        let item = &items[count - 1];
        let without = self.value(count - 1, capacity);
        if item.cost > capacity {
            return without;
        }
        let with = item.value + self.value(count - 1, capacity - item.cost);
        without.max(with)
    }
}
