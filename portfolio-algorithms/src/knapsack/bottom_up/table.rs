use anyhow::{anyhow, Result};
use ndarray::Array2;
use portfolio_challenges::knapsack::{validate_instance, Item, Solution};

/// Number of cells a table for `num_items` items and `capacity` needs, or
/// `None` when that does not fit in memory addressing at all.
pub fn table_cells(num_items: usize, capacity: u32) -> Option<usize> {
    let rows = num_items.checked_add(1)?;
    let cols = usize::try_from(capacity).ok()?.checked_add(1)?;
    rows.checked_mul(cols)
        .filter(|&cells| cells <= isize::MAX as usize)
}

/// Fails unless a table for `num_items` items and `capacity` has at most
/// `max_cells` cells. Returns the cell count.
pub fn check_table_cells(num_items: usize, capacity: u32, max_cells: usize) -> Result<usize> {
    match table_cells(num_items, capacity) {
        Some(cells) if cells <= max_cells => Ok(cells),
        cells => {
            log::warn!(
                "table for {} items and capacity {} exceeds max_cells = {}",
                num_items,
                capacity,
                max_cells
            );
            Err(anyhow!(
                "Table needs {} cells, solver is limited to {} (set max_cells to raise it)",
                cells.map_or_else(|| "too many".to_string(), |c| c.to_string()),
                max_cells
            ))
        }
    }
}

/// `T[i][c]` is the best value using the first `i` items within capacity `c`.
/// Row 0 and column 0 stay zero.
pub struct Table {
    cells: Array2<u32>,
    costs: Vec<u32>,
}

impl Table {
    pub fn build(items: &[Item], capacity: u32) -> Result<Self> {
        validate_instance(items, capacity)?;
        if table_cells(items.len(), capacity).is_none() {
            return Err(anyhow!(
                "Table for {} items and capacity {} is too large",
                items.len(),
                capacity
            ));
        }
        let rows = items.len() + 1;
        let cols = capacity as usize + 1;
        let mut cells = Array2::<u32>::zeros((rows, cols));

        for i in 1..rows {
            let Item { value, cost, .. } = items[i - 1];
            let cost = cost as usize;
            for c in 0..cols {
                let without = cells[[i - 1, c]];
                cells[[i, c]] = if cost > c {
                    without
                } else {
                    without.max(value + cells[[i - 1, c - cost]])
                };
            }
        }

        Ok(Self {
            cells,
            costs: items.iter().map(|item| item.cost).collect(),
        })
    }

    pub fn num_items(&self) -> usize {
        self.costs.len()
    }

    pub fn capacity(&self) -> u32 {
        (self.cells.ncols() - 1) as u32
    }

    pub fn get(&self, count: usize, capacity: u32) -> Option<u32> {
        self.cells.get([count, capacity as usize]).copied()
    }

    /// Optimal value of the whole instance, `T[n][C]`.
    pub fn value(&self) -> u32 {
        self.cells[[self.num_items(), self.cells.ncols() - 1]]
    }

    /// Walks back from `T[n][C]`. An item is taken only when skipping it would
    /// lose value, so ties resolve to "exclude", same as `Memo::reconstruct`.
    pub fn reconstruct(&self) -> Solution {
        let mut solution = Solution::new();
        let mut c = self.cells.ncols() - 1;
        for i in (1..=self.num_items()).rev() {
            if self.cells[[i, c]] != self.cells[[i - 1, c]] {
                solution.items.push(i - 1);
                c -= self.costs[i - 1] as usize;
            }
        }
        solution.items.reverse();
        solution
    }
}
