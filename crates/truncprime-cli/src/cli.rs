use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "truncprime",
    about = "Truncprime: budgeted Miller-Rabin primality checks and truncatable-prime search",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub oracle: OracleArgs,

    /// Log filter in tracing `EnvFilter` syntax (e.g. `debug`, `truncprime_oracle=trace`)
    #[arg(long, global = true, default_value = "warn")]
    pub log: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Oracle settings shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OracleArgs {
    /// Path to an oracle config TOML file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Ceiling on the lifetime probability of a false "prime" (overrides config)
    #[arg(long, global = true)]
    pub max_error: Option<f64>,

    /// Seed for randomized witnesses (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report whether each integer is prime
    Check {
        /// Integers to test (decimal, may be negative or arbitrarily large)
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enumerate left-truncatable primes width by width
    Search {
        /// Search variant: plain or eight-becomes-three
        #[arg(long, default_value = "plain")]
        variant: String,

        /// Stop after this many digits
        #[arg(long)]
        max_width: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the plain search, then the eight-becomes-three search
    Demo {
        /// Stop each run after this many digits
        #[arg(long)]
        max_width: Option<usize>,
    },
}
