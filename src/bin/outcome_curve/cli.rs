// src/bin/outcome_curve/cli.rs
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "outcome_curve",
    version,
    about = "Probability of exactly half heads with a fair coin, per number of flips"
)]
pub struct Cli {
    #[arg(long, default_value = "2", help = "First (even) number of trials")]
    pub start: u64,

    #[arg(long, default_value = "498", help = "Last number of trials, inclusive")]
    pub stop: u64,

    #[arg(long, default_value = "2", help = "Even increment between trial counts")]
    pub step: u64,

    #[arg(
        long,
        short,
        default_value = "outcome_curve.tsv",
        value_name = "OUT",
        help = "Output TSV path"
    )]
    pub out: String,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

#[allow(non_camel_case_types)]
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    verbose,
    normal,
    silent,
}
