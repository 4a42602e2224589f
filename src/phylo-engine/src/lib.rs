//! Compatibility scanning, max-K interval selection, and perfect-phylogeny
//! construction over sample-distribution patterns derived from a genotype
//! call matrix.

pub mod cancel;
pub mod error;
pub mod max_k;
pub mod phylogeny;
pub mod pipeline;
pub mod scanner;

pub use cancel::{AtomicCancel, Cancel, NeverCancel};
pub use error::{PhylogenyError, PipelineErrorPolicy};
pub use phylogeny::{newick, sdp_extract, PhylogenyBuilder, Tree};
pub use pipeline::{run_pipeline, PhylogenyRow};
