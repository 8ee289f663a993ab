use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use evidence_utils::ratio::format_ratio;
use evidence_utils::BinomialEvidenceEvaluator;
use log::{info, warn};
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

    info!(
        "Evaluating {} successes in {} trials against p0={}",
        args.successes, args.trials, args.null
    );
    let evaluator = BinomialEvidenceEvaluator::new(args.trials, args.successes)?
        .with_null_probability(args.null)?
        .with_quadrature(args.quadrature());
    let report = evaluator.evaluate(&args.alternatives, args.tail)?;

    info!("{} p-value: {:.5}", report.tail, report.p_value);
    info!(
        "Best point hypothesis {}: null/mle ratio {:.4}",
        report.mle.hypothesis, report.null_mle_ratio
    );
    for alternative in &report.alternatives {
        if !alternative.likelihood.converged {
            warn!(
                "{}: likelihood only accurate to {:.1e}",
                alternative.likelihood.hypothesis, alternative.likelihood.abs_error
            );
        }
        info!(
            "{} vs {}: ratio {}",
            report.null.hypothesis,
            alternative.likelihood.hypothesis,
            format_ratio(alternative.null_ratio)
        );
    }

    let mut table = io::ReportTableWriter::new(std::io::stdout().lock());
    table.write_report(&report)?;

    if let Some(out) = &args.out {
        io::write_report_json(&report, Path::new(out))?;
        info!("Wrote report to {}", out);
    }
    Ok(())
}
