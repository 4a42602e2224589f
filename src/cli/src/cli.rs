//! clap-derived argument parsing for the two workspace binaries.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

/// Input/output delimiter, shared by both binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Delimiter {
    Csv,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tab => b'\t',
        }
    }
}

/// `max-k-phylogeny --in <matrix.csv> --out <out.csv> [...]`
///
/// Ingests a CSV/TSV genotype call matrix, runs the scan → max-K →
/// phylogeny pipeline over every chromosome, and writes one
/// `(chr, bpStart, bpEnd, newick)` row per selected interval.
#[derive(Parser, Debug, Serialize)]
#[command(name = "max-k-phylogeny")]
pub struct MaxKPhylogenyArgs {
    /// Set the verbosity level (-v -vv -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Disable warnings; only errors are logged.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Input call matrix file(s). Multiple files must share a byte-identical header row.
    #[arg(long = "in", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,
    /// Output file for the phylogeny rows. Defaults to stdout when absent.
    #[arg(long = "out")]
    pub output: Option<PathBuf>,
    /// Input/output field delimiter.
    #[arg(long, value_enum, default_value = "csv")]
    pub delimiter: Delimiter,

    /// Zero-based column index of the A allele.
    #[arg(long = "a-col")]
    pub a_allele_col: Option<usize>,
    /// Zero-based column index of the B allele.
    #[arg(long = "b-col")]
    pub b_allele_col: Option<usize>,
    /// Zero-based column index of the SNP id.
    #[arg(long = "snp-col")]
    pub snp_id_col: Option<usize>,
    /// Zero-based column index of the chromosome.
    #[arg(long = "chr-col")]
    pub chr_col: Option<usize>,
    /// Zero-based column index of the bp position.
    #[arg(long = "pos-col")]
    pub position_col: Option<usize>,
    /// Free-text genome build label, carried through to the matrix but not emitted.
    #[arg(long = "build-id")]
    pub build_id: Option<String>,
    /// Zero-based column index of the first per-sample genotype column.
    #[arg(long = "first-genotype-col", default_value_t = 0)]
    pub first_genotype_col: usize,
    /// Exclusive upper bound of the per-sample genotype columns; defaults to end of row.
    #[arg(long = "last-genotype-col")]
    pub last_genotype_col: Option<usize>,

    /// Abort the whole run on the first phylogeny-construction failure
    /// instead of skipping the offending chromosome.
    #[arg(long)]
    pub abort_on_error: bool,
}

impl MaxKPhylogenyArgs {
    /// Log the parsed arguments at info level, mirroring the workspace's
    /// other binaries.
    pub fn log(&self) {
        if let Ok(serialized) = serde_yaml::to_string(self) {
            log::info!("\n---- Command line args ----\n{serialized}\n---");
        }
    }
}

/// `phylogeny-to-sdp --in <phylogeny.csv> --minor-count <int> --out <out.csv>`
///
/// Reads previously emitted `(chr, bpStart, bpEnd, newick)` rows, parses
/// each Newick tree, extracts the SDPs whose minor-side cardinality meets
/// `minor_count`, and writes the aggregate SDP table.
#[derive(Parser, Debug, Serialize)]
#[command(name = "phylogeny-to-sdp")]
pub struct PhylogenyToSdpArgs {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Input phylogeny-rows file, as emitted by `max-k-phylogeny`.
    #[arg(long = "in", required = true)]
    pub input: PathBuf,
    /// Output file for the SDP aggregate table. Defaults to stdout when absent.
    #[arg(long = "out")]
    pub output: Option<PathBuf>,
    /// Input/output field delimiter.
    #[arg(long, value_enum, default_value = "csv")]
    pub delimiter: Delimiter,
    /// Minimum minor-side sample count an SDP must have to be emitted.
    #[arg(long = "minor-count", default_value_t = 1)]
    pub minor_count: usize,
}

impl PhylogenyToSdpArgs {
    pub fn log(&self) {
        if let Ok(serialized) = serde_yaml::to_string(self) {
            log::info!("\n---- Command line args ----\n{serialized}\n---");
        }
    }
}
