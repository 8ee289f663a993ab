use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use evidence_utils::{even_trial_counts, most_likely_outcome_curve};
use log::{debug, info};
use std::path::Path;

mod cli;
mod io;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    // Set up logging level
    match args.verbosity {
        cli::LogLevel::silent => {
            env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
        }
        cli::LogLevel::normal => {
            env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
        }
        cli::LogLevel::verbose => {
            env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();
        }
    }

    let trial_counts = even_trial_counts(args.start, args.stop, args.step)?;
    info!(
        "Computing most likely outcome probability for {} trial counts",
        trial_counts.len()
    );
    let curve = most_likely_outcome_curve(&trial_counts)?;
    if let (Some(first), Some(last)) = (curve.first(), curve.last()) {
        debug!(
            "n={}: {:.6}, n={}: {:.6}",
            first.trials, first.probability, last.trials, last.probability
        );
    }

    let mut writer = io::CurveWriter::new(Path::new(&args.out))?;
    writer.write_points_iter(&curve)?;
    info!("Wrote {} points to {}", curve.len(), args.out);
    Ok(())
}
