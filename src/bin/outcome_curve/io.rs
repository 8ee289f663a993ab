use anyhow::Result;
use csv::{Writer, WriterBuilder};
use evidence_utils::CurvePoint;
use std::fs::File;
use std::path::Path;

pub struct CurveWriter {
    file: File,
    writer: Writer<File>,
}

impl CurveWriter {
    pub fn new(file_path: &Path) -> Result<Self> {
        let file = File::create(file_path)?;
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_writer(file.try_clone()?);
        Ok(Self { file, writer })
    }

    pub fn write_point(&mut self, point: &CurvePoint) -> Result<()> {
        self.writer.serialize(point)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.file.sync_all()?;
        Ok(())
    }

    pub fn write_points_iter<'a, I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a CurvePoint>,
    {
        for point in points {
            self.write_point(point)?;
        }
        self.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidence_utils::most_likely_outcome_curve;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_curve() {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let curve = most_likely_outcome_curve(&[2, 4, 6]).unwrap();
        let mut writer = CurveWriter::new(file.path()).unwrap();
        writer.write_points_iter(&curve).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "trials\tprobability");
        for (line, (trials, expected)) in lines[1..].iter().zip([(2, 0.5), (4, 0.375), (6, 0.3125)]) {
            let (n, p) = line.split_once('\t').unwrap();
            assert_eq!(n.parse::<u64>().unwrap(), trials);
            assert!((p.parse::<f64>().unwrap() - expected).abs() < 1e-14);
        }
    }
}
