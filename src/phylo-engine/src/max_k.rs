use callmatrix::IndexedSnpInterval;

/// The core interval at each index `k`: the intersection of the forward and
/// reverse greedy intervals at that index.
///
/// # Panics
/// Panics if `forward.len() != reverse.len()` — an invariant of running the
/// two greedy scans over the same matrix.
#[must_use]
pub fn core_intervals(forward: &[IndexedSnpInterval], reverse: &[IndexedSnpInterval]) -> Vec<IndexedSnpInterval> {
    assert_eq!(forward.len(), reverse.len(), "forward/reverse greedy scans must produce equally many intervals");
    forward
        .iter()
        .zip(reverse)
        .map(|(f, r)| {
            assert!(f.start <= r.end(), "forward.start must not exceed reverse.end at the same index");
            IndexedSnpInterval::new(f.start, r.end() - f.start + 1)
        })
        .collect()
}

/// Group uber intervals by which core they support: `G[k]` holds every
/// uber interval that contains `cores[k]` and is disjoint from the
/// neighboring cores `cores[k-1]` and `cores[k+1]`, sorted by start.
#[must_use]
pub fn uber_cores(uber: &[IndexedSnpInterval], cores: &[IndexedSnpInterval]) -> Vec<Vec<IndexedSnpInterval>> {
    cores
        .iter()
        .enumerate()
        .map(|(k, &core)| {
            let prev = k.checked_sub(1).map(|p| cores[p]);
            let next = cores.get(k + 1).copied();
            let mut group: Vec<IndexedSnpInterval> = uber
                .iter()
                .copied()
                .filter(|u| {
                    u.contains(core)
                        && prev.map_or(true, |p| !u.intersects(p))
                        && next.map_or(true, |n| !u.intersects(n))
                })
                .collect();
            group.sort();
            group
        })
        .collect()
}

/// Backward dynamic-programming selection of one representative uber
/// interval per core group, maximizing total extent subject to consecutive
/// picks being adjacent-or-overlapping. Ties in the DP argmax resolve to
/// the lowest candidate index, for deterministic, reproducible output.
///
/// # Panics
/// Panics if `groups` is empty, any group is empty, or no feasible chain
/// exists — all invariant violations given well-formed scanner output.
#[must_use]
pub fn select_max_k(groups: &[Vec<IndexedSnpInterval>]) -> Vec<IndexedSnpInterval> {
    let m = groups.len();
    assert!(m > 0, "uber-core groups must be non-empty");
    for (k, g) in groups.iter().enumerate() {
        assert!(!g.is_empty(), "uber-core group {k} must be non-empty");
    }

    // cumulative[k][j] = Some((total_extent, best_next_index)); None if infeasible.
    let mut cumulative: Vec<Vec<Option<(u32, usize)>>> = vec![Vec::new(); m];
    cumulative[m - 1] = groups[m - 1].iter().map(|u| Some((u.extent, usize::MAX))).collect();

    for k in (0..m - 1).rev() {
        let mut row = Vec::with_capacity(groups[k].len());
        for u in &groups[k] {
            let mut best: Option<(u32, usize)> = None;
            for (jp, next) in groups[k + 1].iter().enumerate() {
                if cumulative[k + 1][jp].is_none() {
                    continue;
                }
                if !u.adjacent_or_overlapping(*next) {
                    continue;
                }
                let (next_total, _) = cumulative[k + 1][jp].expect("checked is_none above");
                let total = next_total + u.extent;
                let better = match best {
                    None => true,
                    Some((best_total, best_jp)) => total > best_total || (total == best_total && jp < best_jp),
                };
                if better {
                    best = Some((total, jp));
                }
            }
            row.push(best);
        }
        cumulative[k] = row;
    }

    let start_idx = (0..groups[0].len())
        .filter_map(|j| cumulative[0][j].map(|(total, _)| (total, j)))
        .fold(None, |acc: Option<(u32, usize)>, (total, j)| match acc {
            None => Some((total, j)),
            Some((best_total, best_j)) => {
                if total > best_total || (total == best_total && j < best_j) {
                    Some((total, j))
                } else {
                    acc
                }
            }
        })
        .map(|(_, j)| j)
        .expect("at least one feasible chain from k=0");

    let mut chosen = Vec::with_capacity(m);
    let mut j = start_idx;
    for k in 0..m {
        chosen.push(groups[k][j]);
        if k + 1 < m {
            let (_, next_j) = cumulative[k][j].expect("feasible chain traced from k=0");
            j = next_j;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_is_intersection_of_forward_and_reverse() {
        let forward = vec![IndexedSnpInterval::new(0, 5)];
        let reverse = vec![IndexedSnpInterval::new(2, 6)]; // covers 2..7
        let cores = core_intervals(&forward, &reverse);
        assert_eq!(cores, vec![IndexedSnpInterval::new(0, 8)]);
    }

    #[test]
    fn uber_cores_excludes_intervals_overlapping_neighbor_cores() {
        let cores = vec![IndexedSnpInterval::new(0, 3), IndexedSnpInterval::new(3, 3)];
        let uber = vec![
            IndexedSnpInterval::new(0, 3),
            IndexedSnpInterval::new(0, 6), // contains both cores, overlaps neighbor -> excluded from both groups
            IndexedSnpInterval::new(3, 3),
        ];
        let groups = uber_cores(&uber, &cores);
        assert_eq!(groups[0], vec![IndexedSnpInterval::new(0, 3)]);
        assert_eq!(groups[1], vec![IndexedSnpInterval::new(3, 3)]);
    }

    #[test]
    fn select_max_k_picks_single_feasible_chain() {
        let groups = vec![vec![IndexedSnpInterval::new(0, 3)], vec![IndexedSnpInterval::new(3, 3)]];
        let chosen = select_max_k(&groups);
        assert_eq!(chosen, vec![IndexedSnpInterval::new(0, 3), IndexedSnpInterval::new(3, 3)]);
    }

    #[test]
    fn select_max_k_maximizes_total_extent() {
        // k=0 choices: a short one that connects to a longer k=1 choice should win
        // over a longer k=0 choice that only connects to a shorter k=1 choice.
        let groups = vec![
            vec![IndexedSnpInterval::new(0, 2), IndexedSnpInterval::new(0, 4)],
            vec![IndexedSnpInterval::new(1, 10)],
        ];
        // IndexedSnpInterval::new(0,2).end()=1, adjacent to group1 start=1: ok.
        // IndexedSnpInterval::new(0,4).end()=3, adjacent to group1 start=1: ok (3>=0).
        let chosen = select_max_k(&groups);
        assert_eq!(chosen[1], IndexedSnpInterval::new(1, 10));
        // Both k=0 choices connect; the DP should pick whichever maximizes total (the longer one).
        assert_eq!(chosen[0], IndexedSnpInterval::new(0, 4));
    }
}
