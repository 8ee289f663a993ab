use anyhow::Result;
use csv::{Writer, WriterBuilder};
use evidence_utils::evaluator::HypothesisLikelihood;
use evidence_utils::ratio::format_ratio;
use evidence_utils::EvidenceReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_report_json(report: &EvidenceReport, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Tab-separated comparison table, one row per hypothesis.
pub struct ReportTableWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> ReportTableWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(inner);
        Self { writer }
    }

    pub fn write_report(&mut self, report: &EvidenceReport) -> Result<()> {
        self.writer.write_record(&[
            "role",
            "hypothesis",
            "likelihood",
            "abs_error",
            "null_ratio",
        ])?;
        let null_self = (report.null.likelihood > 0.0).then_some(1.0);
        self.write_row("null", &report.null, format_ratio(null_self))?;
        self.write_row("mle", &report.mle, format_ratio(Some(report.null_mle_ratio)))?;
        for alternative in &report.alternatives {
            self.write_row(
                "alternative",
                &alternative.likelihood,
                format_ratio(alternative.null_ratio),
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(
        &mut self,
        role: &str,
        likelihood: &HypothesisLikelihood,
        null_ratio: String,
    ) -> Result<()> {
        self.writer.write_record(&[
            role.to_string(),
            likelihood.hypothesis.to_string(),
            format!("{:.6e}", likelihood.likelihood),
            format!("{:.1e}", likelihood.abs_error),
            null_ratio,
        ])?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Could not flush report table: {}", e))
    }
}
