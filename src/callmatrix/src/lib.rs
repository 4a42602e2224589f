//! Genotype call matrix data model: call codes, chromosome ordering, SNP
//! intervals, sample distribution patterns, and read-only matrix views.

pub mod call_code;
pub mod chromosome;
pub mod error;
pub mod interval;
pub mod matrix;
pub mod position;
pub mod sdp;
pub mod views;

pub use call_code::{adopt_alleles, decode_call, CallCode};
pub use chromosome::ChrName;
pub use error::CallMatrixError;
pub use interval::{reverse_indexed_intervals, IndexedSnpInterval};
pub use matrix::{CallMatrix, MutableCallMatrix, SampleId, SnpId};
pub use position::BpPosition;
pub use sdp::{four_gamete_compatible, sdp_compatible, sdp_from_calls, Sdp};
pub use views::{ReverseView, SubsetView};
