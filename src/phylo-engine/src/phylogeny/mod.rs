//! Incremental perfect-phylogeny construction: insert compatible SDPs into
//! an inclusion hierarchy, materialize it into a rooted tree, and emit or
//! parse that tree as Newick.

pub mod hierarchy;
pub mod newick;
pub mod sdp_extract;
pub mod tree;

use callmatrix::{sdp_from_calls, CallCode, SampleId, Sdp};

use crate::error::PhylogenyError;
use hierarchy::Hierarchy;
pub use tree::Tree;

/// Builds one perfect phylogeny by incrementally inserting SDPs, one per
/// compatible SNP row, over a fixed sample universe.
#[derive(Debug, Clone)]
pub struct PhylogenyBuilder {
    hierarchy: Hierarchy,
    sample_ids: Vec<SampleId>,
}

impl PhylogenyBuilder {
    #[must_use]
    pub fn new(sample_ids: Vec<SampleId>) -> Self {
        Self { hierarchy: Hierarchy::new(), sample_ids }
    }

    /// Insert an already-computed, minority-normalized SDP.
    ///
    /// # Errors
    /// See [`Hierarchy::insert`].
    pub fn insert(&mut self, sdp: Sdp) -> Result<(), PhylogenyError> {
        self.hierarchy.insert(sdp)
    }

    /// Insert one SNP row, rejecting any row that is not purely biallelic.
    ///
    /// # Errors
    /// Returns [`PhylogenyError::NonBiallelicInWindow`] if any call in
    /// `calls` is `H` or `N`, or [`PhylogenyError::IncompatibleSdp`] if the
    /// row's SDP conflicts with the hierarchy built so far.
    pub fn insert_row(&mut self, row_index: usize, calls: &[CallCode]) -> Result<(), PhylogenyError> {
        if calls.iter().any(|c| !c.is_biallelic()) {
            return Err(PhylogenyError::NonBiallelicInWindow(row_index));
        }
        self.insert(sdp_from_calls(calls))
    }

    /// Materialize the hierarchy built so far into a rooted tree.
    ///
    /// # Errors
    /// Returns [`PhylogenyError::EmptyPhylogeny`] if no SDP was ever
    /// inserted.
    pub fn build(&self) -> Result<Tree, PhylogenyError> {
        tree::materialize(&self.hierarchy.arena, &self.hierarchy.top_level, &self.sample_ids)
    }

    #[must_use]
    pub fn sample_ids(&self) -> &[SampleId] {
        &self.sample_ids
    }
}
