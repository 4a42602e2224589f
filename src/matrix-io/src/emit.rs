use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use callmatrix::{BpPosition, SampleId, Sdp};
use csv::WriterBuilder;
use located_error::prelude::*;

use crate::error::EmitError;

pub const HEADER: &str = "chrID,bpStartPosition,bpEndPosition,newickPerfectPhylogeny";

/// Writes the pipeline's `(chr, bp_start, bp_end, newick)` rows as CSV or
/// TSV, with the header `chrID,bpStartPosition,bpEndPosition,newickPerfectPhylogeny`.
pub struct PhylogenyRowWriter {
    writer: csv::Writer<Box<dyn Write>>,
}

impl PhylogenyRowWriter {
    /// # Errors
    /// Returns [`EmitError::CreateFile`] if `path` cannot be created.
    pub fn new(path: Option<&Path>, delimiter: u8) -> Result<Self> {
        let sink: Box<dyn Write> = match path {
            Some(path) => Box::new(
                File::create(path)
                    .map_err(|source| EmitError::CreateFile { path: path.display().to_string(), source })
                    .with_loc(|| format!("While creating {}", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        };
        let mut writer = WriterBuilder::new().delimiter(delimiter).has_headers(false).from_writer(sink);
        writer
            .write_record(HEADER.split(','))
            .map_err(|source| EmitError::Csv { path: path.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string()), source })
            .loc("While writing phylogeny output header")?;
        Ok(Self { writer })
    }

    /// # Errors
    /// Returns [`EmitError::Csv`] if the underlying writer fails.
    pub fn write_row(&mut self, chr: &str, bp_start: i64, bp_end: i64, newick: &str) -> Result<()> {
        self.writer
            .write_record([chr, &bp_start.to_string(), &bp_end.to_string(), newick])
            .map_err(|source| EmitError::Csv { path: "<output>".to_string(), source })
            .loc("While writing a phylogeny output row")?;
        Ok(())
    }

    /// # Errors
    /// Returns [`EmitError::Csv`] if flushing the underlying writer fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|source| EmitError::CreateFile { path: "<output>".to_string(), source })
            .loc("While flushing phylogeny output")?;
        Ok(())
    }
}

/// One row of the SDP-aggregate table: which samples are members of the
/// SDP, and the genomic intervals whose max-K window produced it.
pub struct SdpAggregateRow<'a> {
    pub sdp: &'a Sdp,
    pub genomic_intervals: &'a [(String, BpPosition, BpPosition)],
}

/// Writes the "SDP aggregator" table: one `0`/`1` column per sample plus a
/// trailing `genomicIntervals` column of pipe-separated `chr;bp_start;bp_end`
/// triples.
pub struct SdpAggregateWriter {
    writer: csv::Writer<Box<dyn Write>>,
    sample_count: usize,
}

impl SdpAggregateWriter {
    /// # Errors
    /// Returns [`EmitError::CreateFile`] if `path` cannot be created.
    pub fn new(path: Option<&Path>, delimiter: u8, samples: &[SampleId]) -> Result<Self> {
        let sink: Box<dyn Write> = match path {
            Some(path) => Box::new(
                File::create(path)
                    .map_err(|source| EmitError::CreateFile { path: path.display().to_string(), source })
                    .with_loc(|| format!("While creating {}", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        };
        let mut writer = WriterBuilder::new().delimiter(delimiter).has_headers(false).from_writer(sink);
        let mut header: Vec<String> = samples.iter().map(|s| s.as_str().to_string()).collect();
        header.push("genomicIntervals".to_string());
        writer
            .write_record(&header)
            .map_err(|source| EmitError::Csv { path: "<output>".to_string(), source })
            .loc("While writing SDP aggregate header")?;
        Ok(Self { writer, sample_count: samples.len() })
    }

    /// # Errors
    /// Returns [`EmitError::Csv`] if the underlying writer fails.
    pub fn write_row(&mut self, row: &SdpAggregateRow<'_>) -> Result<()> {
        assert_eq!(row.sdp.capacity(), self.sample_count);
        let mut fields: Vec<String> = (0..self.sample_count)
            .map(|i| if row.sdp.get(i) { "1".to_string() } else { "0".to_string() })
            .collect();
        let intervals = row
            .genomic_intervals
            .iter()
            .map(|(chr, start, end)| format!("{chr};{};{}", start.get(), end.get()))
            .collect::<Vec<_>>()
            .join("|");
        fields.push(intervals);
        self.writer
            .write_record(&fields)
            .map_err(|source| EmitError::Csv { path: "<output>".to_string(), source })
            .loc("While writing an SDP aggregate row")?;
        Ok(())
    }

    /// # Errors
    /// Returns [`EmitError::CreateFile`] if flushing the underlying writer fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|source| EmitError::CreateFile { path: "<output>".to_string(), source })
            .loc("While flushing SDP aggregate output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callmatrix::Sdp;
    use tempfile::NamedTempFile;

    #[test]
    fn phylogeny_writer_emits_exact_header() {
        let tmp = NamedTempFile::new().unwrap();
        {
            let mut w = PhylogenyRowWriter::new(Some(tmp.path()), b',').unwrap();
            w.write_row("1", 100, 200, "(S1,S2);").unwrap();
            w.flush().unwrap();
        }
        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), HEADER);
        assert_eq!(lines.next().unwrap(), "1,100,200,(S1,S2);");
    }

    #[test]
    fn sdp_aggregate_writer_emits_membership_and_intervals() {
        let samples = vec![SampleId::from("S1"), SampleId::from("S2"), SampleId::from("S3")];
        let mut sdp = Sdp::empty(3);
        sdp.set(0, true);
        let tmp = NamedTempFile::new().unwrap();
        {
            let mut w = SdpAggregateWriter::new(Some(tmp.path()), b',', &samples).unwrap();
            let intervals = vec![("1".to_string(), BpPosition::from(100), BpPosition::from(200))];
            w.write_row(&SdpAggregateRow { sdp: &sdp, genomic_intervals: &intervals }).unwrap();
            w.flush().unwrap();
        }
        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "S1,S2,S3,genomicIntervals");
        assert_eq!(lines.next().unwrap(), "1,0,0,1;100;200");
    }
}
