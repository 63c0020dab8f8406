//! Four interchangeable solvers for the 0/1 knapsack challenge.
//!
//! | solver      | time       | optimal | selection          |
//! |-------------|------------|---------|--------------------|
//! | `greedy`    | O(n log n) | no      | always             |
//! | `recursive` | O(2^n)     | yes     | never              |
//! | `memoized`  | O(n * C)   | yes     | opt-in follow-up   |
//! | `bottom_up` | O(n * C)   | yes     | by default         |
//!
//! Every solver exposes `solve_challenge(challenge, hyperparameters)`
//! returning an [`Outcome`], plus a free function over a raw item slice.
use anyhow::{anyhow, Result};
use portfolio_challenges::knapsack::{Challenge, Solution};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

pub mod bottom_up;
pub mod greedy;
pub mod memoized;
pub mod recursive;

pub use bottom_up::{solve_bottom_up, solve_bottom_up_with_selection};
pub use greedy::solve_greedy;
pub use memoized::solve_memoized;
pub use recursive::solve_recursive;

/// What a solver reports: the achieved value, and the subset achieving it
/// when the solver reconstructs one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub value: u32,
    pub solution: Option<Solution>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Greedy,
    Recursive,
    Memoized,
    BottomUp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Greedy,
        Algorithm::Recursive,
        Algorithm::Memoized,
        Algorithm::BottomUp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Recursive => "recursive",
            Algorithm::Memoized => "memoized",
            Algorithm::BottomUp => "bottom_up",
        }
    }

    pub fn is_exact(&self) -> bool {
        !matches!(self, Algorithm::Greedy)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown algorithm '{}', expected one of: greedy, recursive, memoized, bottom_up",
                    s
                )
            })
    }
}

pub fn solve(
    algorithm: Algorithm,
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Outcome> {
    match algorithm {
        Algorithm::Greedy => greedy::solve_challenge(challenge, hyperparameters),
        Algorithm::Recursive => recursive::solve_challenge(challenge, hyperparameters),
        Algorithm::Memoized => memoized::solve_challenge(challenge, hyperparameters),
        Algorithm::BottomUp => bottom_up::solve_challenge(challenge, hyperparameters),
    }
}
