use anyhow::{anyhow, Result};
use clap::{arg, ArgMatches, Command};
use portfolio_algorithms::knapsack::Algorithm;
use portfolio_challenges::knapsack::{samples, Challenge, Difficulty, Solution};
use portfolio_runner::{compare, jsonify, load_json, run_algorithm};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{Map, Value};

fn cli() -> Command {
    Command::new("portfolio")
        .about("Solves 0/1 knapsack portfolio selections with greedy, recursive and dynamic programming solvers")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Runs one solver on an instance")
                .arg(
                    arg!(<ALGORITHM> "One of: greedy, recursive, memoized, bottom_up")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Solver hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Runs every solver on an instance")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Solver hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(--json "Print the comparison as json")),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random instance")
                .arg(arg!(<SEED> "Seed value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(<NUM_ITEMS> "Number of items")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-value" [MAX_VALUE] "Largest item value")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"max-cost" [MAX_COST] "Largest item cost")
                        .default_value("20")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--budget [BUDGET] "Capacity as a percentage of the total cost")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Checks that a solution is feasible and reports its value")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(Command::new("demo").about("Compares every solver on the bundled samples"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(sub_m),
        Some(("compare", sub_m)) => compare_instance(sub_m),
        Some(("generate", sub_m)) => generate(sub_m),
        Some(("verify", sub_m)) => verify(sub_m),
        Some(("demo", _)) => demo(),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn argument<'a, T>(m: &'a ArgMatches, id: &str) -> Result<&'a T>
where
    T: Clone + Send + Sync + 'static,
{
    m.get_one::<T>(id)
        .ok_or_else(|| anyhow!("Missing argument {}", id))
}

fn required<'a>(m: &'a ArgMatches, id: &str) -> Result<&'a String> {
    argument::<String>(m, id)
}

fn load_hyperparameters(m: &ArgMatches) -> Result<Option<Map<String, Value>>> {
    m.get_one::<String>("hyperparameters")
        .map(|h| load_json::<Map<String, Value>>(h))
        .transpose()
}

fn solve(m: &ArgMatches) -> Result<()> {
    let algorithm: Algorithm = required(m, "ALGORITHM")?.parse()?;
    let challenge: Challenge = load_json(required(m, "INSTANCE")?)?;
    let hyperparameters = load_hyperparameters(m)?;

    log::info!(
        "running {} on {} items with capacity {}",
        algorithm,
        challenge.num_items(),
        challenge.capacity()
    );
    let row = run_algorithm(algorithm, &challenge, &hyperparameters);
    if let Some(error) = row.error {
        return Err(anyhow!(error));
    }
    println!("{}", jsonify(&row)?);
    Ok(())
}

fn compare_instance(m: &ArgMatches) -> Result<()> {
    let challenge: Challenge = load_json(required(m, "INSTANCE")?)?;
    let hyperparameters = load_hyperparameters(m)?;

    let comparison = compare(&challenge, &hyperparameters);
    if !comparison.exact_solvers_agree() {
        log::error!("exact solvers disagree: {:?}", comparison.rows);
    }
    if m.get_flag("json") {
        println!("{}", jsonify(&comparison)?);
    } else {
        println!("{}", comparison);
    }
    Ok(())
}

fn generate(m: &ArgMatches) -> Result<()> {
    let seed = *argument::<u64>(m, "SEED")?;
    let difficulty = load_difficulty(m)?;
    let seed: [u8; 32] = StdRng::seed_from_u64(seed).gen();
    let challenge = Challenge::generate_instance(&seed, &difficulty)?;
    println!("{}", jsonify(&challenge)?);
    Ok(())
}

fn load_difficulty(m: &ArgMatches) -> Result<Difficulty> {
    Ok(Difficulty {
        num_items: *argument::<usize>(m, "NUM_ITEMS")?,
        max_value: *argument::<u32>(m, "max-value")?,
        max_cost: *argument::<u32>(m, "max-cost")?,
        budget_percent: *argument::<u32>(m, "budget")?,
    })
}

fn verify(m: &ArgMatches) -> Result<()> {
    let challenge: Challenge = load_json(required(m, "INSTANCE")?)?;
    let solution: Solution = load_json(required(m, "SOLUTION")?)?;
    let selection = challenge
        .evaluate_selection(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("{}", jsonify(&selection)?);
    Ok(())
}

fn demo() -> Result<()> {
    for (title, challenge) in [
        ("sample portfolio", samples::portfolio()),
        ("greedy trap", samples::greedy_trap()),
    ] {
        println!("--- {} (capacity {}) ---", title, challenge.capacity());
        for item in challenge.items() {
            println!("  {:<4} value {:>3}  cost {:>3}", item.name, item.value, item.cost);
        }
        println!("{}\n", compare(&challenge, &None));
    }
    Ok(())
}
