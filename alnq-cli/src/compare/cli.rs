use clap::{Arg, Command};

pub const COMPARE_CMD: &str = "compare";

pub fn create_compare_cli() -> Command {
    Command::new(COMPARE_CMD)
        .about("Compare two alignments of the same sequences and report the columns where they differ.")
        .arg(Arg::new("aln1").required(true).help("First alignment (FASTA)"))
        .arg(Arg::new("aln2").required(true).help("Second alignment (FASTA)"))
        .arg(Arg::new("full_seq").required(true).help("Full sequences (FASTA)"))
        .arg(Arg::new("output").required(true).help("JSON output file"))
}
