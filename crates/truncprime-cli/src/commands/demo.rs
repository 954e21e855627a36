use crate::cli::OracleArgs;
use crate::support::{build_oracle_or_exit, exit_with};
use truncprime_search::{SearchOptions, Variant, render_width, search_with};

const PLAIN_HEADER: &str = "Truncatable primes (https://community.wolfram.com/groups/-/m/t/1569707)";
const EIGHT_BECOMES_THREE_HEADER: &str = "What if 8 truncates to 3? (cf. https://bit.ly/2LJF4Lk)";

pub fn run(oracle_args: OracleArgs, max_width: Option<usize>) {
    println!("{PLAIN_HEADER}\n");
    run_one(&oracle_args, Variant::Plain, max_width);
    println!("\n{EIGHT_BECOMES_THREE_HEADER}\n");
    run_one(&oracle_args, Variant::EightBecomesThree, max_width);
}

// Each run gets a fresh oracle and therefore its own error budget.
fn run_one(oracle_args: &OracleArgs, variant: Variant, max_width: Option<usize>) {
    let mut oracle = build_oracle_or_exit(oracle_args);
    let options = SearchOptions { variant, max_width };
    search_with(&mut oracle, &options, |group| println!("{}", render_width(group)))
        .unwrap_or_else(|e| exit_with(e));
}
