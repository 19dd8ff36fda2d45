use clap::{Arg, ArgAction, ArgGroup, Command, arg};

pub const SCORE_CMD: &str = "score";

pub const GOLD_DIR: &str = "gold-dir";
pub const GOLD_MULTI: &str = "gold-multi";
pub const GOLD_JSON: &str = "gold-json";

pub fn create_score_cli() -> Command {
    Command::new(SCORE_CMD)
        .about("Score a test alignment against a gold standard.")
        .arg(Arg::new("test_aln").required(true).help("Alignment to score"))
        .arg(
            Arg::new("output")
                .required(true)
                .help("Text report; the JSON report is written next to it"),
        )
        .arg(arg!(--"gold-dir" <dir> "Directory of pairwise gold standard .Var files"))
        .arg(arg!(--"gold-multi" <file> "Multiple gold standard .Var file"))
        .arg(arg!(--"gold-json" <file> "Multi-solution gold standard JSON file"))
        .group(
            ArgGroup::new("gold")
                .args([GOLD_DIR, GOLD_MULTI, GOLD_JSON])
                .required(true),
        )
        .arg(
            arg!(--"input-format" <format>)
                .help("fasta, 3dm, 3SSP, fatcat or csv; detected from the first line when absent"),
        )
        .arg(arg!(--"final-core" <file> "final_core file with the core boundaries"))
        .arg(arg!(--full <fasta> "Full sequences for the JSON gold standard"))
        .arg(arg!(--config <toml> "Scoring weights and mode"))
        .arg(
            arg!(--lenient)
                .help("Do not penalise residues left out of the cores (JSON gold standard)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--json)
                .help("Also write the report as JSON")
                .action(ArgAction::SetTrue),
        )
}
