use std::io::Write;

use cli::{Delimiter, MaxKPhylogenyArgs, PhylogenyToSdpArgs};
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

fn max_k_args(input: &NamedTempFile, output: &NamedTempFile, abort_on_error: bool) -> MaxKPhylogenyArgs {
    MaxKPhylogenyArgs {
        verbose: 0,
        quiet: true,
        input: vec![input.path().to_path_buf()],
        output: Some(output.path().to_path_buf()),
        delimiter: Delimiter::Csv,
        a_allele_col: None,
        b_allele_col: None,
        snp_id_col: None,
        chr_col: Some(0),
        position_col: Some(1),
        build_id: None,
        first_genotype_col: 2,
        last_genotype_col: None,
        abort_on_error,
    }
}

#[test]
fn max_k_then_phylogeny_to_sdp_round_trip() {
    // A single compatible window of two disjoint splits: {S1,S2} and {S4},
    // leaving S3 unconstrained. Unambiguously four-gamete compatible: no
    // sample pair exhibits all four gamete combinations across the two rows.
    let matrix = write_file("chr,pos,S1,S2,S3,S4\n1,100,A,A,B,B\n1,200,A,A,A,B\n");
    let phylo_out = NamedTempFile::new().unwrap();

    maxk_phylogeny::run_max_k_phylogeny(&max_k_args(&matrix, &phylo_out, true)).unwrap();

    let contents = std::fs::read_to_string(phylo_out.path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), matrix_io::emit::HEADER);
    let row = lines.next().unwrap();
    let fields: Vec<&str> = row.split(',').collect();
    assert_eq!(fields[0], "1");
    assert_eq!(fields[1], "100");
    assert_eq!(fields[2], "200");
    assert!(row.ends_with(';'));
    assert!(lines.next().is_none());

    let sdp_out = NamedTempFile::new().unwrap();
    let sdp_args = PhylogenyToSdpArgs {
        verbose: 0,
        quiet: true,
        input: phylo_out.path().to_path_buf(),
        output: Some(sdp_out.path().to_path_buf()),
        delimiter: Delimiter::Csv,
        minor_count: 1,
    };
    maxk_phylogeny::run_phylogeny_to_sdp(&sdp_args).unwrap();

    let sdp_contents = std::fs::read_to_string(sdp_out.path()).unwrap();
    let mut sdp_lines = sdp_contents.lines();
    assert_eq!(sdp_lines.next().unwrap(), "S1,S2,S3,S4,genomicIntervals");
    let body: Vec<&str> = sdp_lines.collect();
    assert_eq!(body.len(), 2, "two disjoint splits should surface as two aggregate rows");
    for line in &body {
        assert!(line.ends_with("1;100;200"), "both splits came from the same [100,200] window");
    }
}

#[test]
fn skip_chromosome_policy_drops_only_the_failing_chromosome() {
    // chr1 is a clean two-row compatible window; chr2 carries a single row
    // with a heterozygous call, which PhylogenyBuilder must reject.
    let matrix = write_file(
        "chr,pos,S1,S2,S3,S4\n1,100,A,A,B,B\n1,200,A,A,A,B\n2,100,A,H,B,B\n",
    );
    let phylo_out = NamedTempFile::new().unwrap();

    maxk_phylogeny::run_max_k_phylogeny(&max_k_args(&matrix, &phylo_out, false)).unwrap();

    let contents = std::fs::read_to_string(phylo_out.path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), matrix_io::emit::HEADER);
    let row = lines.next().unwrap();
    assert!(row.starts_with("1,100,200,"));
    assert!(lines.next().is_none(), "chr2's row should have been dropped, not emitted");
}

#[test]
fn abort_on_error_propagates_the_non_biallelic_failure() {
    let matrix = write_file(
        "chr,pos,S1,S2,S3,S4\n1,100,A,A,B,B\n1,200,A,A,A,B\n2,100,A,H,B,B\n",
    );
    let phylo_out = NamedTempFile::new().unwrap();

    let result = maxk_phylogeny::run_max_k_phylogeny(&max_k_args(&matrix, &phylo_out, true));
    assert!(result.is_err());
}
