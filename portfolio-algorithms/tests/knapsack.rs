use portfolio_algorithms::knapsack::{
    bottom_up::{self, table_cells, Table},
    memoized::Memo,
    recursive::Recursion,
    *,
};
use portfolio_algorithms::seeded_hasher;
use portfolio_challenges::knapsack::{samples, Challenge, Difficulty, Item, Solution};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::{json, Map, Value};

fn random_challenges(count: usize) -> Vec<Challenge> {
    let mut rng = SmallRng::seed_from_u64(1337);
    (0..count)
        .map(|_| {
            let difficulty = Difficulty {
                num_items: rng.gen_range(0..=12),
                max_value: rng.gen_range(1..=40),
                max_cost: rng.gen_range(1..=15),
                budget_percent: rng.gen_range(0..=100),
            };
            Challenge::generate_instance(&rng.gen(), &difficulty).unwrap()
        })
        .collect()
}

fn hyperparameters(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn exact_values(challenge: &Challenge) -> [u32; 3] {
    let items = challenge.items();
    let capacity = challenge.capacity();
    [
        solve_recursive(items, capacity).unwrap(),
        solve_memoized(items, capacity).unwrap(),
        solve_bottom_up(items, capacity).unwrap(),
    ]
}

#[test]
fn test_sample_portfolio() {
    let challenge = samples::portfolio();
    assert_eq!(exact_values(&challenge), [29, 29, 29]);

    // densities: C 3.5, B 3.33, A 3.0, D 1.33
    let (solution, value) = solve_greedy(challenge.items(), challenge.capacity()).unwrap();
    assert_eq!(solution.items, vec![2, 1, 0]);
    assert_eq!(value, 29);

    let (solution, value) =
        solve_bottom_up_with_selection(challenge.items(), challenge.capacity()).unwrap();
    assert_eq!(solution.items, vec![0, 1, 2]);
    assert_eq!(value, 29);
    assert_eq!(challenge.item_names(&solution), vec!["A", "B", "C"]);
}

#[test]
fn test_greedy_trap() {
    let challenge = samples::greedy_trap();
    let (solution, greedy_value) =
        solve_greedy(challenge.items(), challenge.capacity()).unwrap();
    assert_eq!(solution.items, vec![2]);
    assert_eq!(greedy_value, 6);

    assert_eq!(exact_values(&challenge), [11, 11, 11]);
    let (solution, _) =
        solve_bottom_up_with_selection(challenge.items(), challenge.capacity()).unwrap();
    assert_eq!(challenge.item_names(&solution), vec!["Y"]);
}

#[test]
fn test_greedy_trap_with_room_for_both() {
    let trap = samples::greedy_trap();
    let challenge = Challenge::new(trap.items().to_vec(), 14).unwrap();
    let (solution, greedy_value) =
        solve_greedy(challenge.items(), challenge.capacity()).unwrap();
    assert_eq!(solution.items, vec![2, 0]);
    assert_eq!(greedy_value, 16);
    assert_eq!(exact_values(&challenge), [16, 16, 16]);
}

#[test]
fn test_zero_capacity() {
    let challenge = Challenge::new(samples::portfolio().items().to_vec(), 0).unwrap();
    assert_eq!(exact_values(&challenge), [0, 0, 0]);

    for algorithm in Algorithm::ALL {
        let outcome = solve(algorithm, &challenge, &None).unwrap();
        assert_eq!(outcome.value, 0, "{}", algorithm);
        if let Some(solution) = outcome.solution {
            assert!(solution.items.is_empty(), "{}", algorithm);
        }
    }
}

#[test]
fn test_empty_items() {
    let challenge = Challenge::new(Vec::new(), 50).unwrap();
    assert_eq!(exact_values(&challenge), [0, 0, 0]);
    let (solution, value) = solve_greedy(&[], 50).unwrap();
    assert_eq!(solution, Solution::new());
    assert_eq!(value, 0);
}

#[test]
fn test_zero_cost_is_rejected() {
    let items = vec![Item::new("free", 3, 0)];
    assert!(solve_greedy(&items, 5).is_err());
    assert!(solve_recursive(&items, 5).is_err());
    assert!(solve_memoized(&items, 5).is_err());
    assert!(solve_bottom_up(&items, 5).is_err());
    assert!(solve_bottom_up_with_selection(&items, 5).is_err());
}

#[test]
fn test_exact_solvers_agree() {
    for challenge in random_challenges(60) {
        let [recursive, memoized, bottom_up] = exact_values(&challenge);
        assert_eq!(recursive, memoized, "{:?}", challenge);
        assert_eq!(memoized, bottom_up, "{:?}", challenge);
    }
}

#[test]
fn test_greedy_never_beats_optimum() {
    let mut strictly_worse = 0;
    for challenge in random_challenges(60) {
        let (_, greedy_value) = solve_greedy(challenge.items(), challenge.capacity()).unwrap();
        let optimal = solve_bottom_up(challenge.items(), challenge.capacity()).unwrap();
        assert!(greedy_value <= optimal, "{:?}", challenge);
        if greedy_value < optimal {
            strictly_worse += 1;
        }
    }
    // the trap instance is not the only way to fool the heuristic
    assert!(strictly_worse > 0);
}

#[test]
fn test_selections_are_feasible() {
    for challenge in random_challenges(60) {
        let items = challenge.items();
        let capacity = challenge.capacity();

        let (solution, value) = solve_greedy(items, capacity).unwrap();
        let selection = challenge.evaluate_selection(&solution).unwrap();
        assert_eq!(selection.total_value, value);
        assert!(selection.total_cost <= capacity);

        let (solution, value) = solve_bottom_up_with_selection(items, capacity).unwrap();
        let selection = challenge.evaluate_selection(&solution).unwrap();
        assert_eq!(selection.total_value, value);
        assert!(selection.total_cost <= capacity);
    }
}

#[test]
fn test_memo_and_table_reconstruct_the_same_subset() {
    for challenge in random_challenges(40) {
        let mut memo = Memo::new(challenge.items(), seeded_hasher(challenge.seed()));
        memo.solve(challenge.capacity());
        let from_memo = memo.reconstruct(challenge.capacity());
        let table = Table::build(challenge.items(), challenge.capacity()).unwrap();
        assert_eq!(from_memo, table.reconstruct(), "{:?}", challenge);
    }
}

#[test]
fn test_solvers_are_idempotent() {
    for challenge in random_challenges(20) {
        for algorithm in Algorithm::ALL {
            let first = solve(algorithm, &challenge, &None).unwrap();
            let second = solve(algorithm, &challenge, &None).unwrap();
            assert_eq!(first, second, "{}", algorithm);
        }
    }
}

#[test]
fn test_optimum_is_monotone_in_capacity() {
    for challenge in random_challenges(10) {
        let total_cost: u32 = challenge.items().iter().map(|item| item.cost).sum();
        let mut previous = [0u32; 3];
        for capacity in 0..=total_cost + 1 {
            let resized = Challenge::new(challenge.items().to_vec(), capacity).unwrap();
            let current = exact_values(&resized);
            for k in 0..3 {
                assert!(current[k] >= previous[k]);
            }
            previous = current;
        }
    }
}

#[test]
fn test_recursion_explores_every_branch() {
    let items: Vec<Item> = (0..10).map(|i| Item::new(format!("i{}", i), i + 1, 1)).collect();
    // capacity never runs out, so every call branches twice
    let mut recursion = Recursion::new(&items);
    assert_eq!(recursion.solve(100), 55);
    assert_eq!(recursion.calls(), (1 << 11) - 1);

    let mut memo = Memo::new(&items, seeded_hasher(&[0u8; 32]));
    assert_eq!(memo.solve(100), 55);
    assert!((memo.len() as u64) < recursion.calls());
}

#[test]
fn test_memo_fills_lazily() {
    let challenge = samples::portfolio();
    let mut memo = Memo::new(challenge.items(), seeded_hasher(challenge.seed()));
    assert!(memo.is_empty());
    memo.solve(challenge.capacity());
    let eager = challenge.num_items() * challenge.capacity() as usize;
    assert!(memo.len() > 0);
    assert!(memo.len() < eager);
}

#[test]
fn test_table_shape() {
    let challenge = samples::portfolio();
    let table = Table::build(challenge.items(), challenge.capacity()).unwrap();
    assert_eq!(table.num_items(), 4);
    assert_eq!(table.capacity(), 10);
    assert_eq!(table.value(), 29);
    for c in 0..=10 {
        assert_eq!(table.get(0, c), Some(0));
    }
    for i in 0..=4 {
        assert_eq!(table.get(i, 0), Some(0));
    }
    // only A fits in 4, A and B both fit in 7
    assert_eq!(table.get(1, 4), Some(12));
    assert_eq!(table.get(2, 7), Some(22));
    assert_eq!(table.get(5, 0), None);
    assert_eq!(table.get(0, 11), None);
}

#[test]
fn test_table_cells() {
    assert_eq!(table_cells(4, 10), Some(55));
    assert_eq!(table_cells(0, 0), Some(1));
    assert_eq!(table_cells(usize::MAX, 1), None);
}

#[test]
fn test_recursive_guard() {
    let challenge = samples::portfolio();
    let err = solve(
        Algorithm::Recursive,
        &challenge,
        &hyperparameters(json!({"max_items": 3})),
    )
    .unwrap_err();
    assert!(err.to_string().contains("limited to 3"));

    let outcome = solve(
        Algorithm::Recursive,
        &challenge,
        &hyperparameters(json!({"max_items": 4})),
    )
    .unwrap();
    assert_eq!(outcome.value, 29);
    assert_eq!(outcome.solution, None);
}

#[test]
fn test_bottom_up_guard() {
    let challenge = samples::portfolio();
    let err = bottom_up::solve_challenge(&challenge, &hyperparameters(json!({"max_cells": 54})))
        .unwrap_err();
    assert!(err.to_string().contains("needs 55 cells"));

    let outcome =
        bottom_up::solve_challenge(&challenge, &hyperparameters(json!({"max_cells": 55})))
            .unwrap();
    assert_eq!(outcome.value, 29);
}

#[test]
fn test_memoized_guard() {
    let challenge = samples::portfolio();
    let err = solve(
        Algorithm::Memoized,
        &challenge,
        &hyperparameters(json!({"max_cells": 54})),
    )
    .unwrap_err();
    assert!(err.to_string().contains("needs 55 cells"));

    let outcome = solve(
        Algorithm::Memoized,
        &challenge,
        &hyperparameters(json!({"max_cells": 55})),
    )
    .unwrap();
    assert_eq!(outcome.value, 29);
}

#[test]
fn test_memoized_guard_on_long_instance() {
    let difficulty = Difficulty {
        num_items: 200_000,
        max_value: 1,
        max_cost: 1,
        budget_percent: 1,
    };
    let challenge = Challenge::generate_instance(&[1u8; 32], &difficulty).unwrap();
    for algorithm in [Algorithm::Recursive, Algorithm::Memoized, Algorithm::BottomUp] {
        assert!(solve(algorithm, &challenge, &None).is_err(), "{}", algorithm);
    }
}

#[test]
fn test_memo_handles_deep_instances() {
    let items: Vec<Item> = (0..200_000).map(|i| Item::new(format!("i{}", i), 1, 1)).collect();
    assert_eq!(solve_memoized(&items, 1).unwrap(), 1);

    let mut memo = Memo::new(&items, seeded_hasher(&[0u8; 32]));
    assert_eq!(memo.solve(3), 3);
    // every item is interchangeable, ties exclude, so the walk keeps the first three
    assert_eq!(memo.reconstruct(3), Solution { items: vec![0, 1, 2] });
}

#[test]
fn test_bottom_up_free_functions_apply_default_limit() {
    let items = vec![Item::new("A", 1, 1), Item::new("B", 2, 2)];
    let err = solve_bottom_up(&items, u32::MAX).unwrap_err();
    assert!(err.to_string().contains("limited to 268435456"));
    assert!(solve_bottom_up_with_selection(&items, u32::MAX).is_err());
    assert_eq!(solve_bottom_up(&items, 3).unwrap(), 3);
}

#[test]
fn test_reconstruct_hyperparameters() {
    let challenge = samples::greedy_trap();

    let outcome = solve(Algorithm::Memoized, &challenge, &None).unwrap();
    assert_eq!(outcome.value, 11);
    assert_eq!(outcome.solution, None);
    let outcome = solve(
        Algorithm::Memoized,
        &challenge,
        &hyperparameters(json!({"reconstruct": true})),
    )
    .unwrap();
    assert_eq!(outcome.solution, Some(Solution { items: vec![1] }));

    let outcome = solve(Algorithm::BottomUp, &challenge, &None).unwrap();
    assert_eq!(outcome.solution, Some(Solution { items: vec![1] }));
    let outcome = solve(
        Algorithm::BottomUp,
        &challenge,
        &hyperparameters(json!({"reconstruct": false})),
    )
    .unwrap();
    assert_eq!(outcome.value, 11);
    assert_eq!(outcome.solution, None);
}

#[test]
fn test_algorithm_names() {
    for algorithm in Algorithm::ALL {
        assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        assert_eq!(algorithm.to_string(), algorithm.name());
    }
    assert!("dijkstra".parse::<Algorithm>().is_err());
    assert!(!Algorithm::Greedy.is_exact());
    assert!(Algorithm::BottomUp.is_exact());
    assert_eq!(
        serde_json::to_value(Algorithm::BottomUp).unwrap(),
        json!("bottom_up")
    );
}
