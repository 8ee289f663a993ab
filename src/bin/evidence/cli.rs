// src/bin/evidence/cli.rs
use clap::{Parser, ValueEnum};
use evidence_utils::{Hypothesis, QuadratureConfig, Tail};

#[derive(Parser, Debug)]
#[command(
    name = "evidence",
    version,
    about = "Compare a p-value with likelihood ratios for a binomial experiment"
)]
pub struct Cli {
    #[arg(long, short = 'n', value_name = "TRIALS", help = "Number of trials")]
    pub trials: u64,

    #[arg(long, short = 'k', value_name = "SUCCESSES", help = "Observed number of successes")]
    pub successes: u64,

    #[arg(
        long,
        default_value = "0.5",
        value_name = "P0",
        help = "Success probability under the null hypothesis"
    )]
    pub null: f64,

    #[arg(
        long = "alternative",
        short = 'a',
        value_name = "HYPOTHESIS",
        default_values = ["0:1", "0:0.5"],
        help = "Alternative hypothesis: a probability (0.6) or a uniform interval (0:0.5). Repeatable"
    )]
    pub alternatives: Vec<Hypothesis>,

    #[arg(long, default_value = "lower", help = "Tail of the p-value: lower, upper or two_sided")]
    pub tail: Tail,

    #[arg(long, default_value = "1e-10", help = "Relative quadrature tolerance")]
    pub rel_tol: f64,

    #[arg(long, default_value = "1e-14", help = "Absolute quadrature tolerance")]
    pub abs_tol: f64,

    #[arg(long, default_value = "500", help = "Maximum quadrature subdivisions")]
    pub max_subdivisions: usize,

    #[arg(long, help = "Fail if quadrature cannot meet the tolerance")]
    pub strict: bool,

    #[arg(long, short, value_name = "OUT", help = "Write the report as JSON to this path")]
    pub out: Option<String>,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn quadrature(&self) -> QuadratureConfig {
        QuadratureConfig {
            abs_tol: self.abs_tol,
            rel_tol: self.rel_tol,
            max_subdivisions: self.max_subdivisions,
            require_convergence: self.strict,
            ..QuadratureConfig::default()
        }
    }
}

#[allow(non_camel_case_types)]
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    verbose,
    normal,
    silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["evidence", "-n", "250", "-k", "110"]).unwrap();
        assert_eq!(cli.null, 0.5);
        assert_eq!(cli.tail, Tail::Lower);
        assert_eq!(
            cli.alternatives,
            vec![Hypothesis::agnostic(), Hypothesis::interval(0.0, 0.5).unwrap()]
        );
        assert_eq!(cli.quadrature(), QuadratureConfig::default());
    }

    #[test]
    fn test_alternatives_and_tail() {
        let cli = Cli::try_parse_from([
            "evidence", "-n", "20", "-k", "3", "-a", "0.44", "-a", "0.2:0.4", "--tail", "two_sided",
            "--strict",
        ])
        .unwrap();
        assert_eq!(
            cli.alternatives,
            vec![Hypothesis::Point { p: 0.44 }, Hypothesis::interval(0.2, 0.4).unwrap()]
        );
        assert_eq!(cli.tail, Tail::TwoSided);
        assert!(cli.quadrature().require_convergence);
    }

    #[test]
    fn test_bad_hypothesis() {
        assert!(Cli::try_parse_from(["evidence", "-n", "20", "-k", "3", "-a", "0.5:0.1"]).is_err());
    }
}
