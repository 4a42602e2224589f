//! CSV/TSV ingest and emit for genotype call matrices, and an in-memory
//! [`CallMatrix`](callmatrix::CallMatrix) implementation.

pub mod emit;
pub mod error;
pub mod ingest;
pub mod memory;

pub use emit::{PhylogenyRowWriter, SdpAggregateRow, SdpAggregateWriter};
pub use error::{EmitError, IngestError};
pub use ingest::{ingest_call_matrix, read_phylogeny_rows, IngestConfig, PhylogenyRecord};
pub use memory::InMemoryCallMatrix;
