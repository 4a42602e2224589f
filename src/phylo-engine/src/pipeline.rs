use callmatrix::{BpPosition, CallMatrix, ChrName};
use located_error::prelude::*;

use crate::cancel::Cancel;
use crate::error::PipelineErrorPolicy;
use crate::max_k::{core_intervals, select_max_k, uber_cores};
use crate::phylogeny::{newick, PhylogenyBuilder};
use crate::scanner::{greedy_scan, reverse_greedy_scan, uber_scan};

/// One emitted output row: a chromosome, its bp span, and the Newick
/// encoding of the perfect phylogeny built over that span's SDPs.
pub struct PhylogenyRow {
    pub chr: ChrName,
    pub bp_start: BpPosition,
    pub bp_end: BpPosition,
    pub newick: String,
}

/// Run the full scan → max-K → phylogeny pipeline over every chromosome in
/// `matrix`, in `ChromosomeOrdering` order (the order `chromosome_views`
/// already returns them in), streaming each completed row to `on_row` as
/// soon as it is available rather than buffering the whole run.
///
/// `cancel` is polled between chromosomes and between max-K intervals
/// within a chromosome. `policy` decides what happens when a chromosome's
/// phylogeny construction fails: abort the whole run, or skip the rest of
/// that chromosome and continue.
///
/// # Errors
/// Returns the first error encountered, wrapped with call-site location via
/// `located_error`, unless `policy` is `SkipChromosome` and the error
/// originated from phylogeny construction rather than `on_row` itself.
pub fn run_pipeline<M: CallMatrix>(
    matrix: &M,
    cancel: &impl Cancel,
    policy: PipelineErrorPolicy,
    mut on_row: impl FnMut(PhylogenyRow) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let chromosomes = matrix.chromosome_views().loc("listing chromosome views")?;

    for chr_view in &chromosomes {
        if cancel.is_cancelled() {
            return Ok(());
        }
        if chr_view.snp_count() == 0 {
            continue;
        }

        let chr = chr_view.chr_name(0).cloned().expect("chromosome_views guarantees chromosome metadata");

        match run_chromosome(chr_view, &chr, cancel, &mut on_row) {
            Ok(()) => {}
            Err(err) => match policy {
                PipelineErrorPolicy::AbortRun => return Err(err),
                PipelineErrorPolicy::SkipChromosome => continue,
            },
        }
    }
    Ok(())
}

fn run_chromosome<V: CallMatrix>(
    view: &V,
    chr: &ChrName,
    cancel: &impl Cancel,
    on_row: &mut impl FnMut(PhylogenyRow) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let forward = greedy_scan(view);
    let reverse = reverse_greedy_scan(view);
    let uber = uber_scan(view);
    let cores = core_intervals(&forward, &reverse);
    let groups = uber_cores(&uber, &cores);
    let chosen = select_max_k(&groups);

    for interval in chosen {
        if cancel.is_cancelled() {
            return Ok(());
        }

        let sample_ids = view.sample_ids().to_vec();
        let mut builder = PhylogenyBuilder::new(sample_ids);
        for row_index in interval.start as usize..=interval.end() as usize {
            builder
                .insert_row(row_index, view.calls_at(row_index))
                .with_loc(|| format!("building phylogeny for {chr} rows {}..={}", interval.start, interval.end()))?;
        }
        let tree = builder.build().loc("materializing phylogeny tree")?;
        let newick = newick::emit(&tree);

        let bp_start = view
            .position(interval.start as usize)
            .ok_or_else(|| anyhow!("matrix has no position metadata for {chr}"))
            .loc("reading max-K interval start position")?;
        let bp_end = view
            .position(interval.end() as usize)
            .ok_or_else(|| anyhow!("matrix has no position metadata for {chr}"))
            .loc("reading max-K interval end position")?;

        on_row(PhylogenyRow { chr: chr.clone(), bp_start, bp_end, newick }).loc("emitting phylogeny row")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use callmatrix::{BpPosition as Bp, CallCode, ChrName as Chr, MutableCallMatrix, SampleId};
    use matrix_io::InMemoryCallMatrix;

    use crate::cancel::{AtomicCancel, NeverCancel};

    fn matrix_from_rows(rows: &[&str]) -> InMemoryCallMatrix {
        let n_samples = rows[0].len();
        let samples: Vec<SampleId> = (0..n_samples).map(|i| SampleId::from(format!("S{}", i + 1))).collect();
        let mut m = InMemoryCallMatrix::new(samples);
        for row in rows {
            let calls: Vec<CallCode> = row
                .chars()
                .map(|c| match c {
                    'A' => CallCode::A,
                    'B' => CallCode::B,
                    'H' => CallCode::H,
                    _ => CallCode::N,
                })
                .collect();
            m.push_row(calls).unwrap();
        }
        let chr = Chr::parse("1").unwrap();
        let n = rows.len();
        m.set_chr_ids(Some(vec![chr; n])).unwrap();
        m.set_positions(Some((0..n).map(|i| Bp::from(100 + i as i64)).collect())).unwrap();
        m
    }

    #[test]
    fn streams_one_row_per_max_k_interval() {
        let m = matrix_from_rows(&["AABB", "AABB", "ABAB"]);
        let mut rows = Vec::new();
        run_pipeline(&m, &NeverCancel, PipelineErrorPolicy::AbortRun, |row| {
            rows.push(row);
            Ok(())
        })
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].newick.ends_with(';'));
    }

    #[test]
    fn cancellation_stops_before_any_row_is_emitted() {
        let m = matrix_from_rows(&["AABB", "AABB", "ABAB"]);
        let cancel = AtomicCancel::new();
        cancel.cancel();
        let mut rows = Vec::new();
        run_pipeline(&m, &cancel, PipelineErrorPolicy::AbortRun, |row| {
            rows.push(row);
            Ok(())
        })
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn skip_chromosome_policy_does_not_abort_the_run() {
        let m = matrix_from_rows(&["AABB", "ABAB", "AABB", "BABA"]);
        let mut rows = Vec::new();
        let result = run_pipeline(&m, &NeverCancel, PipelineErrorPolicy::SkipChromosome, |row| {
            rows.push(row);
            Ok(())
        });
        assert!(result.is_ok());
    }
}
