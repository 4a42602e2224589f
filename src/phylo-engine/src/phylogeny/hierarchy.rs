use callmatrix::Sdp;

use crate::error::PhylogenyError;

/// One node of the inclusion hierarchy, stored in an arena rather than via
/// owned pointers so that a sibling can be pulled under a freshly inserted
/// superset node without fighting the borrow checker.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub sdp: Sdp,
    pub children: Vec<usize>,
}

/// An arena of [`HierarchyNode`]s plus the list of top-level sibling ids.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    pub arena: Vec<HierarchyNode>,
    pub top_level: Vec<usize>,
}

impl Hierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a minority-normalized SDP into the hierarchy.
    ///
    /// # Errors
    /// Returns [`PhylogenyError::IncompatibleSdp`] if `sdp` intersects an
    /// existing entry without one being a subset of the other.
    pub fn insert(&mut self, sdp: Sdp) -> Result<(), PhylogenyError> {
        let mut top_level = std::mem::take(&mut self.top_level);
        let result = insert_among(&mut self.arena, &mut top_level, sdp);
        self.top_level = top_level;
        result
    }
}

fn insert_among(arena: &mut Vec<HierarchyNode>, siblings: &mut Vec<usize>, new_sdp: Sdp) -> Result<(), PhylogenyError> {
    let mut idx = 0;
    while idx < siblings.len() {
        let n_id = siblings[idx];

        if arena[n_id].sdp == new_sdp {
            return Ok(());
        }

        if new_sdp.is_subset_of(&arena[n_id].sdp) {
            let mut children = std::mem::take(&mut arena[n_id].children);
            let result = insert_among(arena, &mut children, new_sdp);
            arena[n_id].children = children;
            return result;
        }

        if arena[n_id].sdp.is_subset_of(&new_sdp) {
            let new_id = arena.len();
            arena.push(HierarchyNode { sdp: new_sdp.clone(), children: vec![n_id] });
            siblings[idx] = new_id;

            let mut j = idx + 1;
            while j < siblings.len() {
                let sib_id = siblings[j];
                if arena[sib_id].sdp.is_disjoint_from(&new_sdp) {
                    j += 1;
                    continue;
                }
                if arena[sib_id].sdp.is_subset_of(&new_sdp) {
                    arena[new_id].children.push(sib_id);
                    siblings.remove(j);
                } else {
                    return Err(PhylogenyError::IncompatibleSdp);
                }
            }
            return Ok(());
        }

        if !arena[n_id].sdp.is_disjoint_from(&new_sdp) {
            return Err(PhylogenyError::IncompatibleSdp);
        }
        idx += 1;
    }

    let new_id = arena.len();
    arena.push(HierarchyNode { sdp: new_sdp, children: Vec::new() });
    siblings.push(new_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdp(n: usize, members: &[usize]) -> Sdp {
        let mut s = Sdp::empty(n);
        for &i in members {
            s.set(i, true);
        }
        s
    }

    #[test]
    fn disjoint_sdps_become_separate_top_level_siblings() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[0])).unwrap();
        h.insert(sdp(4, &[1])).unwrap();
        assert_eq!(h.top_level.len(), 2);
    }

    #[test]
    fn nested_subset_becomes_a_child() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[2, 3])).unwrap();
        h.insert(sdp(4, &[3])).unwrap();
        assert_eq!(h.top_level.len(), 1);
        let root = h.top_level[0];
        assert_eq!(h.arena[root].children.len(), 1);
    }

    #[test]
    fn superset_pulls_existing_sibling_under_it() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[3])).unwrap();
        h.insert(sdp(4, &[2, 3])).unwrap();
        assert_eq!(h.top_level.len(), 1);
        let root = h.top_level[0];
        assert_eq!(h.arena[root].sdp, sdp(4, &[2, 3]));
        assert_eq!(h.arena[root].children.len(), 1);
    }

    #[test]
    fn overlapping_non_subset_is_incompatible() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[0, 1])).unwrap();
        let err = h.insert(sdp(4, &[1, 2])).unwrap_err();
        assert!(matches!(err, PhylogenyError::IncompatibleSdp));
    }

    #[test]
    fn duplicate_insertion_is_a_no_op() {
        let mut h = Hierarchy::new();
        h.insert(sdp(4, &[0, 1])).unwrap();
        h.insert(sdp(4, &[0, 1])).unwrap();
        assert_eq!(h.top_level.len(), 1);
    }
}
