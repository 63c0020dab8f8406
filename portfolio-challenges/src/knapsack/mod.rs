mod error;
pub mod samples;

pub use error::InstanceError;

use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub value: u32,
    pub cost: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, value: u32, cost: u32) -> Self {
        Self {
            name: name.into(),
            value,
            cost,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub items: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

/// A feasible subset of a challenge's items together with its aggregates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub items: Vec<usize>,
    pub total_value: u32,
    pub total_cost: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub num_items: usize,
    pub max_value: u32,
    pub max_cost: u32,
    /// Capacity as a percentage of the summed item costs.
    pub budget_percent: u32,
}

impl From<Vec<i32>> for Difficulty {
    fn from(arr: Vec<i32>) -> Self {
        Self {
            num_items: arr[0] as usize,
            max_value: arr[1] as u32,
            max_cost: arr[2] as u32,
            budget_percent: arr[3] as u32,
        }
    }
}

impl Into<Vec<i32>> for Difficulty {
    fn into(self) -> Vec<i32> {
        vec![
            self.num_items as i32,
            self.max_value as i32,
            self.max_cost as i32,
            self.budget_percent as i32,
        ]
    }
}

/// Checks the invariants every solver relies on: positive costs and a
/// total value that cannot overflow `u32`.
pub fn validate_instance(items: &[Item], _capacity: u32) -> Result<(), InstanceError> {
    let mut total_value = 0u32;
    for (index, item) in items.iter().enumerate() {
        if item.cost == 0 {
            return Err(InstanceError::NonPositiveCost {
                index,
                name: item.name.clone(),
                cost: 0,
            });
        }
        total_value = total_value
            .checked_add(item.value)
            .ok_or(InstanceError::TotalValueOverflow)?;
    }
    Ok(())
}

/// A 0/1 knapsack instance: pick items so that the summed cost stays within
/// `capacity` and the summed value is maximal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "RawChallenge", into = "RawChallenge")]
pub struct Challenge {
    seed: [u8; 32],
    items: Vec<Item>,
    capacity: u32,
}

impl Challenge {
    pub fn new(items: Vec<Item>, capacity: u32) -> Result<Self, InstanceError> {
        Self::with_seed([0u8; 32], items, capacity)
    }

    pub fn with_seed(
        seed: [u8; 32],
        items: Vec<Item>,
        capacity: u32,
    ) -> Result<Self, InstanceError> {
        validate_instance(&items, capacity)?;
        Ok(Self {
            seed,
            items,
            capacity,
        })
    }

    pub fn generate_instance(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Self> {
        if difficulty.max_value == 0 || difficulty.max_cost == 0 {
            return Err(anyhow!(
                "max_value ({}) and max_cost ({}) must be positive",
                difficulty.max_value,
                difficulty.max_cost
            ));
        }
        let mut rng = SmallRng::from_seed(seed.clone());

        let items: Vec<Item> = (0..difficulty.num_items)
            .map(|i| {
                let cost = rng.gen_range(1..=difficulty.max_cost);
                let value = rng.gen_range(1..=difficulty.max_value);
                Item::new(format!("item_{}", i), value, cost)
            })
            .collect();

        let total_cost: u64 = items.iter().map(|item| item.cost as u64).sum();
        let capacity = total_cost * difficulty.budget_percent as u64 / 100;
        let capacity = u32::try_from(capacity)
            .map_err(|_| anyhow!("Capacity ({}) does not fit in u32", capacity))?;

        log::debug!(
            "generated {} items with capacity {} (total cost {})",
            items.len(),
            capacity,
            total_cost
        );
        Ok(Self::with_seed(seed.clone(), items, capacity)?)
    }

    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn evaluate_selection(&self, solution: &Solution) -> Result<Selection> {
        let selected_items: HashSet<usize> = solution.items.iter().cloned().collect();
        if selected_items.len() != solution.items.len() {
            return Err(anyhow!("Duplicate items selected."));
        }

        let mut total_cost = 0u64;
        let mut total_value = 0u32;
        for &index in &solution.items {
            let item = self
                .items
                .get(index)
                .ok_or_else(|| anyhow!("Item ({}) is out of bounds", index))?;
            total_cost += item.cost as u64;
            // validate_instance bounds the sum of all values
            total_value += item.value;
        }

        if total_cost > self.capacity as u64 {
            return Err(anyhow!(
                "Total cost ({}) exceeded capacity ({})",
                total_cost,
                self.capacity
            ));
        }

        let mut items = solution.items.clone();
        items.sort_unstable();
        Ok(Selection {
            items,
            total_value,
            total_cost: total_cost as u32,
        })
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        self.evaluate_selection(solution).map(|_| ())
    }

    pub fn item_names(&self, solution: &Solution) -> Vec<&str> {
        solution
            .items
            .iter()
            .filter_map(|&i| self.items.get(i))
            .map(|item| item.name.as_str())
            .collect()
    }
}

#[derive(Serialize, Deserialize)]
struct RawItem {
    name: String,
    value: i64,
    cost: i64,
}

#[derive(Serialize, Deserialize)]
struct RawChallenge {
    #[serde(default)]
    seed: [u8; 32],
    items: Vec<RawItem>,
    capacity: i64,
}

impl TryFrom<RawChallenge> for Challenge {
    type Error = InstanceError;

    fn try_from(raw: RawChallenge) -> Result<Self, Self::Error> {
        if raw.capacity < 0 {
            return Err(InstanceError::NegativeCapacity(raw.capacity));
        }
        let capacity = u32::try_from(raw.capacity)
            .map_err(|_| InstanceError::CapacityOutOfRange(raw.capacity))?;

        let mut items = Vec::with_capacity(raw.items.len());
        for (index, RawItem { name, value, cost }) in raw.items.into_iter().enumerate() {
            if cost <= 0 {
                return Err(InstanceError::NonPositiveCost { index, name, cost });
            }
            if value < 0 {
                return Err(InstanceError::NegativeValue { index, name, value });
            }
            let Ok(cost) = u32::try_from(cost) else {
                return Err(InstanceError::CostOutOfRange { index, name, cost });
            };
            let Ok(value) = u32::try_from(value) else {
                return Err(InstanceError::ValueOutOfRange { index, name, value });
            };
            items.push(Item { name, value, cost });
        }

        Challenge::with_seed(raw.seed, items, capacity)
    }
}

impl From<Challenge> for RawChallenge {
    fn from(challenge: Challenge) -> Self {
        Self {
            seed: challenge.seed,
            items: challenge
                .items
                .into_iter()
                .map(|item| RawItem {
                    name: item.name,
                    value: item.value as i64,
                    cost: item.cost as i64,
                })
                .collect(),
            capacity: challenge.capacity as i64,
        }
    }
}
