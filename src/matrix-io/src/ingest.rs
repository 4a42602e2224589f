use std::{fs::File, io::BufReader, path::Path};

use callmatrix::{
    adopt_alleles, decode_call, BpPosition, CallMatrix, ChrName, MutableCallMatrix, SampleId, SnpId,
};
use csv::ReaderBuilder;
use located_error::prelude::*;

use crate::{error::IngestError, memory::InMemoryCallMatrix};

/// One row read back from a [`crate::emit::PhylogenyRowWriter`] output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhylogenyRecord {
    pub chr: String,
    pub bp_start: BpPosition,
    pub bp_end: BpPosition,
    pub newick: String,
}

/// Read back a `chrID,bpStartPosition,bpEndPosition,newickPerfectPhylogeny`
/// table as emitted by [`crate::emit::PhylogenyRowWriter`].
///
/// # Errors
/// Propagates IO/CSV failures as [`IngestError::OpenFile`]/[`IngestError::Csv`],
/// and [`IngestError::BadInputFormat`] if a bp position column is not an integer.
pub fn read_phylogeny_rows(path: &Path, delimiter: u8) -> Result<Vec<PhylogenyRecord>> {
    let mut reader = ReaderBuilder::new().delimiter(delimiter).has_headers(true).from_reader(open(path)?);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|source| IngestError::Csv { path: path.display().to_string(), source })
            .with_loc(|| format!("While reading a phylogeny row from {}", path.display()))?;
        let chr = field(&record, 0, path)?.to_string();
        let bp_start: i64 = field(&record, 1, path)?
            .parse()
            .map_err(|_| IngestError::BadInputFormat(format!("invalid bpStartPosition in {}", path.display())))?;
        let bp_end: i64 = field(&record, 2, path)?
            .parse()
            .map_err(|_| IngestError::BadInputFormat(format!("invalid bpEndPosition in {}", path.display())))?;
        let newick = field(&record, 3, path)?.to_string();
        rows.push(PhylogenyRecord { chr, bp_start: BpPosition::from(bp_start), bp_end: BpPosition::from(bp_end), newick });
    }
    Ok(rows)
}

/// Which genotype column range, allele/metadata columns, and delimiter an
/// input file uses. Column indices are zero-based against the header row.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub delimiter: u8,
    pub a_allele_col: Option<usize>,
    pub b_allele_col: Option<usize>,
    pub snp_id_col: Option<usize>,
    pub chr_col: Option<usize>,
    pub position_col: Option<usize>,
    pub build_id: Option<String>,
    pub first_genotype_col: usize,
    /// Exclusive upper bound; `None` means "through end of row".
    pub last_genotype_col: Option<usize>,
}

impl IngestConfig {
    #[must_use]
    pub fn csv(first_genotype_col: usize) -> Self {
        Self {
            delimiter: b',',
            a_allele_col: None,
            b_allele_col: None,
            snp_id_col: None,
            chr_col: None,
            position_col: None,
            build_id: None,
            first_genotype_col,
            last_genotype_col: None,
        }
    }

    #[must_use]
    pub fn tab(first_genotype_col: usize) -> Self {
        Self { delimiter: b'\t', ..Self::csv(first_genotype_col) }
    }
}

/// Build an [`InMemoryCallMatrix`] from one or more CSV/TSV files sharing a
/// byte-identical header row.
///
/// # Errors
/// Returns [`IngestError::NoInputFiles`] if `paths` is empty,
/// [`IngestError::HeaderMismatch`] if a later file's header differs from
/// the first, and propagates any IO/CSV parse failure as
/// [`IngestError::OpenFile`]/[`IngestError::Csv`].
pub fn ingest_call_matrix(paths: &[impl AsRef<Path>], config: &IngestConfig) -> Result<InMemoryCallMatrix> {
    let Some(first_path) = paths.first() else {
        return Err(IngestError::NoInputFiles).loc("While ingesting a call matrix");
    };

    let reference_header = read_header(first_path.as_ref(), config)
        .with_loc(|| format!("While reading header of {}", first_path.as_ref().display()))?;

    let last_genotype_col = config.last_genotype_col.unwrap_or(reference_header.len());
    let sample_names = &reference_header[config.first_genotype_col..last_genotype_col];
    let samples: Vec<SampleId> = sample_names.iter().map(|s| SampleId::from(s.as_str())).collect();

    let mut matrix = InMemoryCallMatrix::new(samples);
    let mut snp_ids: Vec<SnpId> = Vec::new();
    let mut chr_ids: Vec<ChrName> = Vec::new();
    let mut positions: Vec<BpPosition> = Vec::new();
    let mut a_alleles: Vec<char> = Vec::new();
    let mut b_alleles: Vec<char> = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let header = read_header(path, config).with_loc(|| format!("While reading header of {}", path.display()))?;
        if header != reference_header {
            return Err(IngestError::HeaderMismatch { path: path.display().to_string() })
                .with_loc(|| "While checking multi-file header identity".to_string());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .from_reader(open(path)?);

        for record in reader.records() {
            let record = record.map_err(|source| IngestError::Csv { path: path.display().to_string(), source })
                .with_loc(|| format!("While reading a data row from {}", path.display()))?;

            let genotype_tokens: Vec<&str> = record.iter().skip(config.first_genotype_col).take(last_genotype_col - config.first_genotype_col).collect();

            let explicit_alleles = match (config.a_allele_col, config.b_allele_col) {
                (Some(a_col), Some(b_col)) => {
                    let a = single_char(&record, a_col, path)?;
                    let b = single_char(&record, b_col, path)?;
                    Some((a, b))
                }
                _ => None,
            };
            let (a_allele, b_allele) = match explicit_alleles {
                Some(pair) => pair,
                None => adopt_alleles(genotype_tokens.iter().copied())
                    .map_or((None, None), |(a, b)| (Some(a), Some(b))),
            };

            let row: Vec<_> = genotype_tokens.iter().map(|&tok| decode_call(tok, a_allele, b_allele)).collect();
            matrix.push_row(row).with_loc(|| format!("While appending a row from {}", path.display()))?;

            if let Some(col) = config.snp_id_col {
                snp_ids.push(SnpId::from(field(&record, col, path)?));
            }
            if let Some(col) = config.chr_col {
                let text = field(&record, col, path)?;
                chr_ids.push(ChrName::parse(text).with_loc(|| format!("While parsing chromosome in {}", path.display()))?);
            }
            if let Some(col) = config.position_col {
                let text = field(&record, col, path)?;
                let value: i64 = text.parse().map_err(|_| IngestError::BadInputFormat(format!("invalid bp position {text:?}")))
                    .with_loc(|| format!("While parsing bp position in {}", path.display()))?;
                positions.push(BpPosition::from(value));
            }
            if let Some((a, b)) = explicit_alleles {
                a_alleles.push(a.unwrap_or('?'));
                b_alleles.push(b.unwrap_or('?'));
            }
        }
    }

    if config.snp_id_col.is_some() {
        matrix.set_snp_ids(Some(snp_ids)).loc("While attaching snp ids")?;
    }
    if config.position_col.is_some() {
        matrix.set_positions(Some(positions.clone())).loc("While attaching bp positions")?;
    }
    if config.chr_col.is_some() {
        matrix.set_chr_ids(Some(chr_ids.clone())).loc("While attaching chromosome ids")?;
    }
    if config.a_allele_col.is_some() && config.b_allele_col.is_some() {
        matrix.set_a_alleles(Some(a_alleles)).loc("While attaching A alleles")?;
        matrix.set_b_alleles(Some(b_alleles)).loc("While attaching B alleles")?;
    }
    matrix.set_build_id(config.build_id.clone());
    matrix.set_sorted_by_position(is_sorted_by_position(&chr_ids, &positions));

    Ok(matrix)
}

fn is_sorted_by_position(chr_ids: &[ChrName], positions: &[BpPosition]) -> bool {
    if chr_ids.len() != positions.len() || chr_ids.is_empty() {
        return false;
    }
    chr_ids.windows(2).zip(positions.windows(2)).all(|(chrs, bps)| {
        (chrs[0] < chrs[1]) || (chrs[0] == chrs[1] && bps[0] <= bps[1])
    })
}

fn single_char(record: &csv::StringRecord, col: usize, path: &Path) -> Result<Option<char>> {
    let text = field(record, col, path)?;
    Ok(text.chars().next())
}

fn field<'a>(record: &'a csv::StringRecord, col: usize, path: &Path) -> Result<&'a str> {
    record.get(col).ok_or_else(|| IngestError::BadInputFormat(format!("missing column {col}")))
        .with_loc(|| format!("While reading a field from {}", path.display()))
}

fn read_header(path: &Path, config: &IngestConfig) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new().delimiter(config.delimiter).has_headers(false).from_reader(open(path)?);
    let mut records = reader.records();
    let header = records
        .next()
        .ok_or_else(|| IngestError::BadInputFormat(format!("{} has no header row", path.display())))
        .with_loc(|| format!("While reading header of {}", path.display()))?
        .map_err(|source| IngestError::Csv { path: path.display().to_string(), source })
        .with_loc(|| format!("While reading header of {}", path.display()))?;
    Ok(header.iter().map(str::to_string).collect())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .map_err(|source| IngestError::OpenFile { path: path.display().to_string(), source })
        .with_loc(|| format!("While opening {}", path.display()))?;
    Ok(BufReader::new(file))
}
