use callmatrix::{SampleId, Sdp};

use crate::phylogeny::tree::Tree;

/// Extract the SDP bitset induced by every non-root edge of `tree` (the
/// sample set of the subtree hanging below that edge), keeping only those
/// whose minor-side cardinality is at least `min_minor_count`.
///
/// `sample_ids` fixes the bit-index assignment; it should be the same
/// ordering used to build the tree so the resulting SDPs are directly
/// comparable to ones derived elsewhere over the same sample universe.
#[must_use]
pub fn extract_sdps(tree: &Tree, sample_ids: &[SampleId], min_minor_count: usize) -> Vec<Sdp> {
    let n = sample_ids.len();
    let index_of = |s: &SampleId| sample_ids.iter().position(|id| id == s);
    let mut result = Vec::new();
    for &(_, child_id) in &tree.nodes[tree.root].children {
        collect(tree, child_id, &index_of, n, min_minor_count, &mut result);
    }
    result
}

fn collect(
    tree: &Tree,
    id: usize,
    index_of: &impl Fn(&SampleId) -> Option<usize>,
    n: usize,
    min_minor_count: usize,
    out: &mut Vec<Sdp>,
) {
    let mut members = Vec::new();
    subtree_samples(tree, id, &mut members);
    let mut sdp = Sdp::empty(n);
    for s in &members {
        if let Some(i) = index_of(s) {
            sdp.set(i, true);
        }
    }
    let minor = sdp.popcount().min(n as u32 - sdp.popcount());
    if minor as usize >= min_minor_count {
        out.push(sdp);
    }
    for &(_, child_id) in &tree.nodes[id].children {
        collect(tree, child_id, index_of, n, min_minor_count, out);
    }
}

fn subtree_samples(tree: &Tree, id: usize, out: &mut Vec<SampleId>) {
    out.extend(tree.nodes[id].samples.iter().cloned());
    for &(_, child_id) in &tree.nodes[id].children {
        subtree_samples(tree, child_id, out);
    }
}
