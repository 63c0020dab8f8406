use thiserror::Error;

/// Reasons a problem instance is rejected before any solver runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("capacity ({0}) must not be negative")]
    NegativeCapacity(i64),

    #[error("capacity ({0}) does not fit in u32")]
    CapacityOutOfRange(i64),

    #[error("item {index} ({name}) has cost {cost}, costs must be positive")]
    NonPositiveCost { index: usize, name: String, cost: i64 },

    #[error("item {index} ({name}) has negative value {value}")]
    NegativeValue { index: usize, name: String, value: i64 },

    #[error("item {index} ({name}) has value {value} which does not fit in u32")]
    ValueOutOfRange { index: usize, name: String, value: i64 },

    #[error("item {index} ({name}) has cost {cost} which does not fit in u32")]
    CostOutOfRange { index: usize, name: String, cost: i64 },

    #[error("sum of item values overflows u32")]
    TotalValueOverflow,
}
