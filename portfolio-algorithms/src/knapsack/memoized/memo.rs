use crate::HashMap;
use ahash::RandomState;
use portfolio_challenges::knapsack::{Item, Solution};

/// Top-down evaluation of the knapsack recurrence with a per-instance cache.
///
/// Keys are `(count, capacity)`: the best value using the first `count`
/// items within `capacity`. Keys say nothing about which items they refer to,
/// so a `Memo` borrows its item list and cannot outlive or be moved to
/// another instance. Items must pass `validate_instance`.
pub struct Memo<'a> {
    items: &'a [Item],
    cache: HashMap<(usize, u32), u32>,
}

impl<'a> Memo<'a> {
    pub fn new(items: &'a [Item], hasher: RandomState) -> Self {
        Self {
            items,
            cache: HashMap::with_hasher(hasher),
        }
    }

    pub fn solve(&mut self, capacity: u32) -> u32 {
        self.value(self.items.len(), capacity)
    }

    /// Number of subproblems solved so far. Only visited `(count, capacity)`
    /// pairs with both parts positive are stored, so this is at most
    /// `n * capacity`.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Recovers one optimal subset by walking the recurrence back from
    /// `(n, capacity)`. Ties go to excluding the item. Subproblems not yet in
    /// the cache are solved on demand.
    pub fn reconstruct(&mut self, capacity: u32) -> Solution {
        let mut solution = Solution::new();
        let mut remaining = capacity;
        for count in (1..=self.items.len()).rev() {
            if remaining == 0 {
                break;
            }
            if self.value(count, remaining) != self.value(count - 1, remaining) {
                solution.items.push(count - 1);
                remaining -= self.items[count - 1].cost;
            }
        }
        solution.items.reverse();
        solution
    }

    fn known(&self, count: usize, capacity: u32) -> Option<u32> {
        if count == 0 || capacity == 0 {
            return Some(0);
        }
        self.cache.get(&(count, capacity)).copied()
    }

    /// Same top-down descent as a recursive evaluation, but pending
    /// subproblems live on a heap stack so depth is not bounded by the
    /// thread's call stack. Only subproblems reachable from the request are
    /// ever cached.
    fn value(&mut self, count: usize, capacity: u32) -> u32 {
        let mut pending = vec![(count, capacity)];
        while let Some(&(k, c)) = pending.last() {
            if self.known(k, c).is_some() {
                pending.pop();
                continue;
            }
            let Item { cost, value, .. } = self.items[k - 1];
            let without = self.known(k - 1, c);
            let with = if cost > c {
                Some(None)
            } else {
                self.known(k - 1, c - cost).map(Some)
            };
            match (without, with) {
                (Some(without), Some(with)) => {
                    let best = with.map_or(without, |w| without.max(value + w));
                    self.cache.insert((k, c), best);
                    pending.pop();
                }
                (without, with) => {
                    if without.is_none() {
                        pending.push((k - 1, c));
                    }
                    if with.is_none() {
                        pending.push((k - 1, c - cost));
                    }
                }
            }
        }
        self.known(count, capacity).unwrap_or_default()
    }
}
