//! Thin orchestration layer wiring the `cli` argument structs into
//! `matrix-io` ingest/emit and the `phylo-engine` scan → max-K → phylogeny
//! pipeline. Each binary under `src/bin/` is a CLI shell around one of the
//! two functions below.

use std::collections::BTreeSet;

use callmatrix::{BpPosition, SampleId, Sdp};
use cli::{MaxKPhylogenyArgs, PhylogenyToSdpArgs};
use located_error::prelude::*;
use matrix_io::{
    emit::{PhylogenyRowWriter, SdpAggregateRow, SdpAggregateWriter},
    ingest::{ingest_call_matrix, read_phylogeny_rows, IngestConfig},
};
use phylo_engine::{newick, pipeline::run_pipeline, sdp_extract::extract_sdps, NeverCancel, PipelineErrorPolicy, Tree};

/// Ingest the call matrix described by `args`, run the scan → max-K →
/// phylogeny pipeline over every chromosome, and write one
/// `(chr, bpStart, bpEnd, newick)` row per selected interval.
///
/// # Errors
/// Propagates ingest failures, phylogeny-construction failures not absorbed
/// by `--abort-on-error`'s opposite (per-chromosome skip), and output errors.
pub fn run_max_k_phylogeny(args: &MaxKPhylogenyArgs) -> anyhow::Result<()> {
    let config = IngestConfig {
        delimiter: args.delimiter.as_byte(),
        a_allele_col: args.a_allele_col,
        b_allele_col: args.b_allele_col,
        snp_id_col: args.snp_id_col,
        chr_col: args.chr_col,
        position_col: args.position_col,
        build_id: args.build_id.clone(),
        first_genotype_col: args.first_genotype_col,
        last_genotype_col: args.last_genotype_col,
    };
    let matrix = ingest_call_matrix(&args.input, &config).loc("ingesting call matrix")?;

    let policy = if args.abort_on_error { PipelineErrorPolicy::AbortRun } else { PipelineErrorPolicy::SkipChromosome };

    let mut writer =
        PhylogenyRowWriter::new(args.output.as_deref(), args.delimiter.as_byte()).loc("opening phylogeny output")?;
    run_pipeline(&matrix, &NeverCancel, policy, |row| {
        writer.write_row(row.chr.as_str(), row.bp_start.get(), row.bp_end.get(), &row.newick)
    })
    .loc("running max-K phylogeny pipeline")?;
    writer.flush().loc("flushing phylogeny output")?;
    Ok(())
}

/// Read back a phylogeny-rows table, parse each Newick tree, extract the
/// SDPs whose minor-side cardinality meets `args.minor_count`, and write the
/// aggregate SDP membership table.
///
/// # Errors
/// Propagates ingest failures, malformed Newick, and output errors.
pub fn run_phylogeny_to_sdp(args: &PhylogenyToSdpArgs) -> anyhow::Result<()> {
    let records = read_phylogeny_rows(&args.input, args.delimiter.as_byte()).loc("reading phylogeny rows")?;

    let mut trees = Vec::with_capacity(records.len());
    let mut universe: BTreeSet<SampleId> = BTreeSet::new();
    for record in &records {
        let tree = newick::parse(&record.newick).with_loc(|| format!("parsing newick for {}", record.chr))?;
        universe.extend(tree_samples(&tree));
        trees.push(tree);
    }
    let sample_ids: Vec<SampleId> = universe.into_iter().collect();

    let mut aggregate: Vec<(Sdp, Vec<(String, BpPosition, BpPosition)>)> = Vec::new();
    for (record, tree) in records.iter().zip(&trees) {
        for sdp in extract_sdps(tree, &sample_ids, args.minor_count) {
            match aggregate.iter_mut().find(|(existing, _)| *existing == sdp) {
                Some((_, intervals)) => intervals.push((record.chr.clone(), record.bp_start, record.bp_end)),
                None => aggregate.push((sdp, vec![(record.chr.clone(), record.bp_start, record.bp_end)])),
            }
        }
    }

    let mut writer = SdpAggregateWriter::new(args.output.as_deref(), args.delimiter.as_byte(), &sample_ids)
        .loc("opening SDP aggregate output")?;
    for (sdp, genomic_intervals) in &aggregate {
        writer.write_row(&SdpAggregateRow { sdp, genomic_intervals }).loc("writing an SDP aggregate row")?;
    }
    writer.flush().loc("flushing SDP aggregate output")?;
    Ok(())
}

fn tree_samples(tree: &Tree) -> Vec<SampleId> {
    tree.nodes.iter().flat_map(|n| n.samples.iter().cloned()).collect()
}
