use thiserror::Error;

/// Errors raised by the call-matrix data model.
#[derive(Error, Debug)]
pub enum CallMatrixError {
    #[error("invalid chromosome name: {0:?}")]
    InvalidChromosome(String),

    #[error("chromosome ids are required for this operation but this matrix has none")]
    MissingChromosomeIds,

    #[error("operation not supported on a read-only view: {0}")]
    UnsupportedOnView(&'static str),

    #[error("sample index {index} out of bounds (matrix has {sample_count} samples)")]
    SampleIndexOutOfBounds { index: usize, sample_count: usize },

    #[error("snp index {index} out of bounds (matrix has {snp_count} snps)")]
    SnpIndexOutOfBounds { index: usize, snp_count: usize },

    #[error("array length {got} does not match snp count {snp_count}")]
    ArrayLengthMismatch { got: usize, snp_count: usize },
}
