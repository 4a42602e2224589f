use callmatrix::{four_gamete_compatible, reverse_indexed_intervals, CallCode, CallMatrix, IndexedSnpInterval};

/// Greedy compatibility scan: partition `[0, snp_count)` into contiguous,
/// disjoint intervals, extending each interval left-to-right while every
/// new row is compatible with every row already accumulated (duplicate
/// rows are absorbed without being re-checked).
#[must_use]
pub fn greedy_scan<M: CallMatrix + ?Sized>(matrix: &M) -> Vec<IndexedSnpInterval> {
    let n = matrix.snp_count();
    if n == 0 {
        return Vec::new();
    }
    let mut intervals = Vec::new();
    let mut start = 0usize;
    let mut accumulator: Vec<&[CallCode]> = vec![matrix.calls_at(0)];

    for j in 1..n {
        let row_j = matrix.calls_at(j);
        if accumulator.iter().any(|row| *row == row_j) {
            continue;
        }
        if accumulator.iter().all(|row| four_gamete_compatible(row, row_j)) {
            accumulator.push(row_j);
        } else {
            intervals.push(IndexedSnpInterval::new(start as u32, (j - start) as u32));
            start = j;
            accumulator.clear();
            accumulator.push(row_j);
        }
    }
    intervals.push(IndexedSnpInterval::new(start as u32, (n - start) as u32));
    intervals
}

/// The greedy scan run against the reverse view, with results mirrored
/// back to forward indices.
#[must_use]
pub fn reverse_greedy_scan<M: CallMatrix>(matrix: &M) -> Vec<IndexedSnpInterval> {
    let view = matrix.reverse_view();
    let mirrored = greedy_scan(&view);
    reverse_indexed_intervals(&mirrored, matrix.snp_count() as u32)
}

/// Exhaustive "uber" scan: every maximal right-extending compatible run,
/// via a single left-to-right sweep that tracks, for the current window,
/// which stored row most recently conflicted with an incoming one.
#[must_use]
pub fn uber_scan<M: CallMatrix + ?Sized>(matrix: &M) -> Vec<IndexedSnpInterval> {
    let n = matrix.snp_count();
    if n == 0 {
        return Vec::new();
    }
    let mut intervals = Vec::new();
    let mut start = 0usize;
    // (source_index, row) ordered oldest-to-newest.
    let mut window: Vec<(usize, &[CallCode])> = Vec::new();

    for k in 0..n {
        let row_k = matrix.calls_at(k);

        let mut duplicate_pos = None;
        let mut conflict = None;
        for idx in (0..window.len()).rev() {
            let (source, row) = window[idx];
            if row == row_k {
                duplicate_pos = Some(idx);
                break;
            }
            if !four_gamete_compatible(row, row_k) {
                conflict = Some((idx, source));
                break;
            }
        }

        if let Some(pos) = duplicate_pos {
            window.remove(pos);
            window.push((k, row_k));
            continue;
        }

        if let Some((p, q)) = conflict {
            intervals.push(IndexedSnpInterval::new(start as u32, (k - start) as u32));
            window.drain(0..=p);
            window.push((k, row_k));
            start = q + 1;
            continue;
        }

        window.push((k, row_k));
    }
    intervals.push(IndexedSnpInterval::new(start as u32, (n - start) as u32));
    intervals
}
