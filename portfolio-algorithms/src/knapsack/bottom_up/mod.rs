//! Bottom-up dynamic programming over an `(n + 1) x (C + 1)` table.
//!
//! Fills every cell row by row, O(n * C) time and space, with no recursion.
//! This is the solver to use outside of teaching: memory use is known before
//! the first cell is written and the table yields the chosen items.
mod params;
mod table;
pub use params::Params;
pub use table::{check_table_cells, table_cells, Table};

use super::Outcome;
use anyhow::Result;
use portfolio_challenges::knapsack::{Challenge, Item, Solution};
use serde_json::{Map, Value};

pub fn solve_challenge(
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Outcome> {
    let params = Params::initialize(hyperparameters);
    check_table_cells(challenge.num_items(), challenge.capacity(), params.max_cells)?;

    let table = Table::build(challenge.items(), challenge.capacity())?;
    log::debug!(
        "bottom-up table filled: {} x {}",
        table.num_items() + 1,
        table.capacity() as u64 + 1
    );
    Ok(Outcome {
        value: table.value(),
        solution: params.reconstruct.then(|| table.reconstruct()),
    })
}

/// Applies the default `max_cells` limit; use [`solve_challenge`] with a
/// `max_cells` hyperparameter for larger tables.
pub fn solve_bottom_up(items: &[Item], capacity: u32) -> Result<u32> {
    check_table_cells(items.len(), capacity, Params::initialize(&None).max_cells)?;
    Ok(Table::build(items, capacity)?.value())
}

pub fn solve_bottom_up_with_selection(items: &[Item], capacity: u32) -> Result<(Solution, u32)> {
    check_table_cells(items.len(), capacity, Params::initialize(&None).max_cells)?;
    let table = Table::build(items, capacity)?;
    Ok((table.reconstruct(), table.value()))
}
