use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhylogenyError {
    #[error("row {0} is not biallelic but was required to be within a phylogeny window")]
    NonBiallelicInWindow(usize),

    #[error("SDP insertion encountered a non-trivial overlap violating subset/superset/disjoint")]
    IncompatibleSdp,

    #[error("a max-K window produced no child edges")]
    EmptyPhylogeny,

    #[error("failed to parse Newick text: {0}")]
    NewickParse(String),

    #[error(transparent)]
    CallMatrix(#[from] callmatrix::CallMatrixError),
}

/// What the pipeline should do when a chromosome fails with a
/// [`PhylogenyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorPolicy {
    /// Abort the whole run, surfacing the first error.
    AbortRun,
    /// Skip the failing chromosome and continue with the next one.
    SkipChromosome,
}
