//! Value-density heuristic.
//!
//! Items are ranked by `value / cost` and accepted in that order whenever they
//! still fit. Runs in O(n log n) but is not optimal: see
//! `portfolio_challenges::knapsack::samples::greedy_trap`.
use super::Outcome;
use anyhow::Result;
use portfolio_challenges::knapsack::{validate_instance, Challenge, Item, Solution};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub fn solve_challenge(
    challenge: &Challenge,
    _hyperparameters: &Option<Map<String, Value>>,
) -> Result<Outcome> {
    let (solution, value) = select(challenge.items(), challenge.capacity());
    Ok(Outcome {
        value,
        solution: Some(solution),
    })
}

/// Returns the accepted item indices, in the order they were accepted, and
/// their total value.
pub fn solve_greedy(items: &[Item], capacity: u32) -> Result<(Solution, u32)> {
    validate_instance(items, capacity)?;
    Ok(select(items, capacity))
}

/// Descending by density. Cross-multiplied so no float ever gets compared;
/// costs are positive, so the products order exactly like the ratios.
fn by_density(a: &Item, b: &Item) -> Ordering {
    let lhs = b.value as u64 * a.cost as u64;
    let rhs = a.value as u64 * b.cost as u64;
    lhs.cmp(&rhs)
}

fn select(items: &[Item], capacity: u32) -> (Solution, u32) {
    let mut sorted_items: Vec<usize> = (0..items.len()).collect();
    // stable: equal densities keep their input order
    sorted_items.sort_by(|&a, &b| by_density(&items[a], &items[b]));

    let mut remaining = capacity;
    let mut total_value = 0;
    let mut solution = Solution::new();
    for &i in &sorted_items {
        if items[i].cost <= remaining {
            remaining -= items[i].cost;
            total_value += items[i].value;
            solution.items.push(i);
        }
    }

    log::debug!(
        "greedy accepted {} of {} items, {} capacity left",
        solution.items.len(),
        items.len(),
        remaining
    );
    (solution, total_value)
}
