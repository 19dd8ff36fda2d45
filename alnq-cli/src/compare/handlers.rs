use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use alnq_grounding::ground_alignment;
use alnq_io::read_fasta;
use alnq_scoring::compare_alignments;

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let [aln1, aln2, full_seq, output] = ["aln1", "aln2", "full_seq", "output"].map(|name| {
        matches
            .get_one::<String>(name)
            .map(Path::new)
            .with_context(|| format!("The {} argument is required.", name))
    });
    let (aln1, aln2, full_seq, output) = (aln1?, aln2?, full_seq?, output?);

    let aln1 = read_fasta(aln1, None)?;
    let aln2 = read_fasta(aln2, None)?;
    let full = read_fasta(full_seq, None)?.into_map();

    let grounded1 = ground_alignment(&aln1.seqs, &full, None, None)?;
    let grounded2 = ground_alignment(&aln2.seqs, &full, None, None)?;

    let result = compare_alignments(&grounded1, &grounded2);

    let file = fs::File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    serde_json::to_writer_pretty(file, &result)?;
    info!("Created the output file: {}", output.display());

    Ok(())
}
