use callmatrix::{SampleId, Sdp};

use crate::error::PhylogenyError;
use crate::phylogeny::hierarchy::HierarchyNode;

/// A materialized rooted tree. Each node carries the sample ids that attach
/// directly at that node (members of its SDP not already covered by a
/// child's SDP) plus edges to its children.
#[derive(Debug, Clone)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
    pub root: usize,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub samples: Vec<SampleId>,
    pub children: Vec<(f64, usize)>,
}

/// Materialize an inclusion hierarchy into a rooted tree over `sample_ids`.
/// The root represents the full sample universe; every sample not claimed
/// by a deeper node attaches directly to the root.
///
/// # Errors
/// Returns [`PhylogenyError::EmptyPhylogeny`] if `top_level` is empty.
pub fn materialize(arena: &[HierarchyNode], top_level: &[usize], sample_ids: &[SampleId]) -> Result<Tree, PhylogenyError> {
    if top_level.is_empty() {
        return Err(PhylogenyError::EmptyPhylogeny);
    }
    let sample_count = sample_ids.len();
    let mut nodes = Vec::new();
    let mut root_edges = Vec::new();
    let mut covered = Sdp::empty(sample_count);
    for &cid in top_level {
        covered = covered.union(&arena[cid].sdp);
        let child_id = convert(arena, cid, sample_ids, &mut nodes);
        root_edges.push((1.0, child_id));
    }

    let universe = Sdp::empty(sample_count).complement();
    let exclusive = universe.difference(&covered);
    let root_samples = members(&exclusive, sample_ids);
    nodes.push(TreeNode { samples: root_samples, children: root_edges });
    let root = nodes.len() - 1;
    Ok(Tree { nodes, root })
}

fn convert(arena: &[HierarchyNode], hid: usize, sample_ids: &[SampleId], nodes: &mut Vec<TreeNode>) -> usize {
    let node = &arena[hid];
    let mut covered = Sdp::empty(node.sdp.capacity());
    let mut children = Vec::new();
    for &cid in &node.children {
        covered = covered.union(&arena[cid].sdp);
        let child_id = convert(arena, cid, sample_ids, nodes);
        children.push((1.0, child_id));
    }
    let exclusive = node.sdp.difference(&covered);
    let samples = members(&exclusive, sample_ids);
    nodes.push(TreeNode { samples, children });
    nodes.len() - 1
}

fn members(sdp: &Sdp, sample_ids: &[SampleId]) -> Vec<SampleId> {
    (0..sample_ids.len()).filter(|&i| sdp.get(i)).map(|i| sample_ids[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phylogeny::hierarchy::Hierarchy;

    fn sample_ids(n: usize) -> Vec<SampleId> {
        (0..n).map(|i| SampleId::from(format!("S{}", i + 1))).collect()
    }

    fn sdp(n: usize, members: &[usize]) -> Sdp {
        let mut s = Sdp::empty(n);
        for &i in members {
            s.set(i, true);
        }
        s
    }

    #[test]
    fn empty_hierarchy_is_an_error() {
        let arena = Vec::new();
        let top_level = Vec::new();
        let ids = sample_ids(4);
        assert!(materialize(&arena, &top_level, &ids).is_err());
    }

    #[test]
    fn leftover_samples_attach_to_root() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[0, 1])).unwrap();
        let ids = sample_ids(4);
        let tree = materialize(&h.arena, &h.top_level, &ids).unwrap();
        let root = &tree.nodes[tree.root];
        assert_eq!(root.samples.len(), 2); // S3, S4 never appear in any SDP
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn nested_sdp_produces_two_level_tree() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[0, 1, 2])).unwrap();
        h.insert(sdp(4, &[0, 1])).unwrap();
        let ids = sample_ids(4);
        let tree = materialize(&h.arena, &h.top_level, &ids).unwrap();
        let root = &tree.nodes[tree.root];
        assert_eq!(root.children.len(), 1);
        let (_, outer_id) = root.children[0];
        let outer = &tree.nodes[outer_id];
        assert_eq!(outer.samples, vec![SampleId::from("S3")]);
        assert_eq!(outer.children.len(), 1);
        let (_, inner_id) = outer.children[0];
        let inner = &tree.nodes[inner_id];
        assert_eq!(inner.samples.len(), 2);
        assert!(inner.children.is_empty());
    }
}
