use crate::cli::OracleArgs;
use crate::support::{build_oracle_or_exit, exit_with, parse_integer_or_exit, print_json_or_exit};
use serde_json::json;

pub fn run(oracle_args: OracleArgs, numbers: Vec<String>, json_output: bool) {
    let mut oracle = build_oracle_or_exit(&oracle_args);

    let mut results = Vec::with_capacity(numbers.len());
    for raw in &numbers {
        let n = parse_integer_or_exit(raw);
        let verdict = oracle.check(n.clone()).unwrap_or_else(|e| exit_with(e));
        results.push((n, verdict));
    }

    if json_output {
        let results: Vec<_> = results
            .iter()
            .map(|(n, verdict)| {
                json!({
                    "n": n.to_string(),
                    "is_prime": verdict.is_prime,
                    "regime": verdict.regime,
                    "witnesses_run": verdict.witnesses_run,
                    "witnesses_planned": verdict.witnesses_planned,
                    "allowance": verdict.allowance,
                })
            })
            .collect();
        print_json_or_exit(&json!({
            "results": results,
            "budget": oracle.budget(),
        }));
    } else {
        for (n, verdict) in &results {
            let label = if verdict.is_prime { "prime" } else { "composite" };
            println!("{n}: {label} ({})", verdict.regime);
        }
        let budget = oracle.budget();
        println!(
            "  Error budget: {:e} of {:e} spent over {} randomized primes",
            budget.cumulative_error_so_far,
            budget.max_cumulative_error,
            budget.error_opportunity_count
        );
    }
}
