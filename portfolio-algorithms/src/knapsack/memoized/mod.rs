//! Top-down dynamic programming: the recursive solver's recurrence with each
//! `(count, capacity)` subproblem solved at most once, O(n * C).
//!
//! The cache is created fresh for every call and dropped with it. Pending
//! subproblems are kept on a heap stack, so large `n` cannot overflow the
//! call stack. [`solve_challenge`] refuses instances whose `(n + 1) * (C + 1)`
//! exceeds `max_cells`; [`solve_memoized`] only fills what it visits and
//! applies no limit.
mod memo;
mod params;
pub use memo::Memo;
pub use params::Params;

use super::{bottom_up::check_table_cells, Outcome};
use crate::seeded_hasher;
use anyhow::Result;
use portfolio_challenges::knapsack::{validate_instance, Challenge, Item};
use serde_json::{Map, Value};

pub fn solve_challenge(
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Outcome> {
    let params = Params::initialize(hyperparameters);
    check_table_cells(challenge.num_items(), challenge.capacity(), params.max_cells)?;
    let mut memo = Memo::new(challenge.items(), seeded_hasher(challenge.seed()));
    let value = memo.solve(challenge.capacity());
    let solution = params
        .reconstruct
        .then(|| memo.reconstruct(challenge.capacity()));
    log::debug!(
        "memoized search cached {} subproblems for {} items, capacity {}",
        memo.len(),
        challenge.num_items(),
        challenge.capacity()
    );
    Ok(Outcome { value, solution })
}

pub fn solve_memoized(items: &[Item], capacity: u32) -> Result<u32> {
    validate_instance(items, capacity)?;
    let mut memo = Memo::new(items, seeded_hasher(&[0u8; 32]));
    Ok(memo.solve(capacity))
}
