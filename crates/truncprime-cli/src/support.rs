use crate::cli::OracleArgs;
use num_bigint::BigInt;
use std::fmt::Display;
use tracing_subscriber::EnvFilter;
use truncprime_oracle::{OracleConfig, PrimalityOracle};
use truncprime_search::Variant;

pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve config file values, then apply flag overrides.
pub fn load_config_or_exit(args: &OracleArgs) -> OracleConfig {
    let mut config = match &args.config {
        Some(path) => OracleConfig::load(path).unwrap_or_else(|e| exit_with(e)),
        None => OracleConfig::default(),
    };
    if let Some(max_error) = args.max_error {
        config.max_cumulative_error = max_error;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config
}

/// One oracle per run: every call made through it shares one error budget.
pub fn build_oracle_or_exit(args: &OracleArgs) -> PrimalityOracle {
    let config = load_config_or_exit(args);
    tracing::debug!(
        max_cumulative_error = config.max_cumulative_error,
        opportunity_floor = config.opportunity_floor,
        seeded = config.seed.is_some(),
        "building primality oracle"
    );
    PrimalityOracle::with_config(config).unwrap_or_else(|e| exit_with(e))
}

pub fn parse_variant_or_exit(variant: &str) -> Variant {
    variant.parse().unwrap_or_else(|e: String| exit_with(e))
}

pub fn parse_integer_or_exit(raw: &str) -> BigInt {
    raw.trim()
        .parse()
        .unwrap_or_else(|e| exit_with(format!("invalid integer {raw:?}: {e}")))
}

pub fn print_json_or_exit<T: serde::Serialize>(payload: &T) {
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|e| exit_with(e));
    println!("{text}");
}

pub fn exit_with(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
