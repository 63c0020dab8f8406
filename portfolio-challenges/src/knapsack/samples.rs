//! Hand-built instances used by the runner's demo and the test suites.

use super::{Challenge, Item};

/// Four projects under a budget of 10 hours. Greedy by value density
/// happens to be optimal here (C, B, A for a value of 29).
pub fn portfolio() -> Challenge {
    Challenge::new(
        vec![
            Item::new("A", 12, 4),
            Item::new("B", 10, 3),
            Item::new("C", 7, 2),
            Item::new("D", 4, 3),
        ],
        10,
    )
    .expect("sample portfolio is well formed")
}

/// Z has the best density, but taking it leaves no room for X or Y.
/// Greedy ends at 6 while Y alone is worth 11.
pub fn greedy_trap() -> Challenge {
    Challenge::new(
        vec![
            Item::new("X", 10, 9),
            Item::new("Y", 11, 10),
            Item::new("Z", 6, 5),
        ],
        10,
    )
    .expect("greedy trap is well formed")
}
