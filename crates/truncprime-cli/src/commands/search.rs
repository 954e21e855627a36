use crate::cli::OracleArgs;
use crate::support::{build_oracle_or_exit, exit_with, parse_variant_or_exit, print_json_or_exit};
use truncprime_search::{SearchOptions, render_width, search_with};

pub fn run(oracle_args: OracleArgs, variant: String, max_width: Option<usize>, json_output: bool) {
    let variant = parse_variant_or_exit(&variant);
    let mut oracle = build_oracle_or_exit(&oracle_args);
    let options = SearchOptions { variant, max_width };

    let report = search_with(&mut oracle, &options, |group| {
        if !json_output {
            println!("{}", render_width(group));
        }
    })
    .unwrap_or_else(|e| exit_with(e));

    if json_output {
        print_json_or_exit(&report);
    }
}
