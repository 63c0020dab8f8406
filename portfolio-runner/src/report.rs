use portfolio_algorithms::knapsack::{solve, Algorithm, Outcome};
use portfolio_challenges::knapsack::Challenge;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub algorithm: Algorithm,
    pub value: Option<u32>,
    pub selected: Option<Vec<String>>,
    pub total_cost: Option<u32>,
    pub error: Option<String>,
}

/// One run of every solver over the same challenge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub rows: Vec<Row>,
}

pub fn run_algorithm(
    algorithm: Algorithm,
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Row {
    match solve(algorithm, challenge, hyperparameters) {
        Ok(outcome) => report_outcome(algorithm, challenge, &outcome),
        Err(e) => {
            log::warn!("{} did not finish: {}", algorithm, e);
            failed_row(algorithm, e.to_string())
        }
    }
}

/// Turns a finished solver run into a row. A selection that does not verify
/// against the challenge fails the row instead of being reported.
pub fn report_outcome(algorithm: Algorithm, challenge: &Challenge, outcome: &Outcome) -> Row {
    let Some(solution) = &outcome.solution else {
        return Row {
            algorithm,
            value: Some(outcome.value),
            selected: None,
            total_cost: None,
            error: None,
        };
    };
    match challenge.evaluate_selection(solution) {
        Ok(selection) if selection.total_value == outcome.value => Row {
            algorithm,
            value: Some(outcome.value),
            selected: Some(
                challenge
                    .item_names(solution)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            total_cost: Some(selection.total_cost),
            error: None,
        },
        Ok(selection) => {
            log::error!(
                "{} reported value {} but its selection is worth {}",
                algorithm,
                outcome.value,
                selection.total_value
            );
            failed_row(
                algorithm,
                format!(
                    "Reported value {} does not match selection value {}",
                    outcome.value, selection.total_value
                ),
            )
        }
        Err(e) => {
            log::error!("{} returned an infeasible selection: {}", algorithm, e);
            failed_row(algorithm, format!("Infeasible selection: {}", e))
        }
    }
}

fn failed_row(algorithm: Algorithm, error: String) -> Row {
    Row {
        algorithm,
        value: None,
        selected: None,
        total_cost: None,
        error: Some(error),
    }
}

pub fn compare(challenge: &Challenge, hyperparameters: &Option<Map<String, Value>>) -> Comparison {
    Comparison {
        rows: Algorithm::ALL
            .into_iter()
            .map(|algorithm| run_algorithm(algorithm, challenge, hyperparameters))
            .collect(),
    }
}

impl Comparison {
    pub fn value_of(&self, algorithm: Algorithm) -> Option<u32> {
        self.rows
            .iter()
            .find(|row| row.algorithm == algorithm)
            .and_then(|row| row.value)
    }

    pub fn optimal_value(&self) -> Option<u32> {
        self.rows
            .iter()
            .filter(|row| row.algorithm.is_exact())
            .find_map(|row| row.value)
    }

    /// False only if two exact solvers that both finished disagree.
    pub fn exact_solvers_agree(&self) -> bool {
        let mut values = self
            .rows
            .iter()
            .filter(|row| row.algorithm.is_exact())
            .filter_map(|row| row.value);
        match values.next() {
            Some(first) => values.all(|v| v == first),
            None => true,
        }
    }

    pub fn greedy_is_suboptimal(&self) -> bool {
        match (self.value_of(Algorithm::Greedy), self.optimal_value()) {
            (Some(greedy), Some(optimal)) => greedy < optimal,
            _ => false,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let label = format!("[{}]", row.algorithm);
            match (&row.value, &row.error) {
                (Some(value), _) => {
                    write!(f, "{:<12} value: {}", label, value)?;
                    if let Some(selected) = &row.selected {
                        write!(f, " items: [{}]", selected.join(", "))?;
                    }
                    if let Some(cost) = row.total_cost {
                        write!(f, " cost: {}", cost)?;
                    }
                    writeln!(f)?;
                }
                (None, Some(error)) => writeln!(f, "{:<12} failed: {}", label, error)?,
                (None, None) => writeln!(f, "{:<12} no result", label)?,
            }
        }
        match (self.value_of(Algorithm::Greedy), self.optimal_value()) {
            (Some(greedy), Some(optimal)) if greedy < optimal => {
                write!(f, "greedy is suboptimal: {} < {}", greedy, optimal)
            }
            (Some(_), Some(optimal)) => write!(f, "greedy matched the optimum ({})", optimal),
            _ => write!(f, "no optimum to compare against"),
        }
    }
}
